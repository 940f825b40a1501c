/// Allocation search policy identifier, reported alongside recommendations.
pub const OPTIMIZER_POLICY_VERSION: &str = "allocation/v1";

/// Pruning widths and sample counts for the allocation search.
///
/// Notes:
/// - Candidate limits bound the search to `O(C^2 * S)` pairs and
///   `O(C^3 * S)` triples regardless of catalog size.
/// - Uniform sweeps only sample the uncategorized remainder; categorized
///   spend is always routed to the best-rate member.
#[derive(Debug, Clone, Copy)]
pub struct OptimizerPolicy {
    pub pair_candidate_limit: usize,
    pub triple_candidate_limit: usize,
    pub min_usage_amount: f64,
    pub pair_uniform_steps: usize,
    pub triple_remainder_steps: usize,
    pub triple_grid_steps: usize,
    /// Float slack when the third share of a grid point is computed as a
    /// remainder.
    pub share_tolerance: f64,
}

impl OptimizerPolicy {
    pub fn meets_usage_floor(self, allocated_amount: f64) -> bool {
        allocated_amount >= self.min_usage_amount
    }

    /// `steps + 1` evenly spaced points from 0 to `amount`, inclusive.
    pub fn uniform_points(self, amount: f64, steps: usize) -> Vec<f64> {
        let steps = steps.max(1);
        (0..=steps)
            .map(|step| amount * step as f64 / steps as f64)
            .collect()
    }

    /// Normalizes a remainder share, rejecting ones that are meaningfully
    /// negative.
    pub fn remainder_share(self, share: f64) -> Option<f64> {
        if share < -self.share_tolerance {
            return None;
        }
        Some(share.max(0.0))
    }
}

pub const OPTIMIZER_POLICY_V1: OptimizerPolicy = OptimizerPolicy {
    pair_candidate_limit: 15,
    triple_candidate_limit: 10,
    min_usage_amount: 100_000.0,
    pair_uniform_steps: 5,
    triple_remainder_steps: 10,
    triple_grid_steps: 4,
    share_tolerance: 1e-6,
};

#[cfg(test)]
mod tests {
    use crate::engine::policy::OPTIMIZER_POLICY_V1;

    #[test]
    fn usage_floor_is_inclusive() {
        let policy = OPTIMIZER_POLICY_V1;
        assert!(policy.meets_usage_floor(100_000.0));
        assert!(!policy.meets_usage_floor(99_999.99));
    }

    #[test]
    fn pair_sweep_has_six_points_at_twenty_percent_steps() {
        let policy = OPTIMIZER_POLICY_V1;
        let points = policy.uniform_points(500_000.0, policy.pair_uniform_steps);
        assert_eq!(
            points,
            vec![0.0, 100_000.0, 200_000.0, 300_000.0, 400_000.0, 500_000.0]
        );
        assert_eq!(
            policy.uniform_points(10.0, policy.triple_remainder_steps).len(),
            11
        );
    }

    #[test]
    fn zero_steps_degrade_to_endpoints() {
        let policy = OPTIMIZER_POLICY_V1;
        assert_eq!(policy.uniform_points(8.0, 0), vec![0.0, 8.0]);
    }

    #[test]
    fn remainder_share_absorbs_rounding_only() {
        let policy = OPTIMIZER_POLICY_V1;
        assert_eq!(policy.remainder_share(-1e-9), Some(0.0));
        assert_eq!(policy.remainder_share(25.0), Some(25.0));
        assert!(policy.remainder_share(-1.0).is_none());
    }
}
