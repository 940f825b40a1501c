use std::cmp::Ordering;
use std::collections::{BTreeMap, BTreeSet};

use tracing::{debug, trace};

use crate::catalog::{Catalog, Instrument};
use crate::engine::calculator::calculate_for_allocation;
use crate::engine::policy::{OPTIMIZER_POLICY_V1, OptimizerPolicy};
use crate::engine::ranking::rank_all;
use crate::engine::rates::resolve_base_rate;
use crate::engine::thresholds::thresholds;
use crate::engine::types::{AllocationEntry, AllocationRecommendation, rate_of_return};
use crate::profile::SpendingProfile;

/// Multi-instrument allocations that beat every single instrument, best first.
pub fn recommend<'a>(
    catalog: &'a Catalog,
    profile: &SpendingProfile,
) -> Vec<AllocationRecommendation<'a>> {
    recommend_with_policy(catalog, profile, OPTIMIZER_POLICY_V1)
}

pub fn recommend_with_policy<'a>(
    catalog: &'a Catalog,
    profile: &SpendingProfile,
    policy: OptimizerPolicy,
) -> Vec<AllocationRecommendation<'a>> {
    let ranked = rank_all(catalog, profile);
    let Some(best_single) = ranked.first().map(|result| result.net_return) else {
        return Vec::new();
    };

    let candidate_count = policy
        .pair_candidate_limit
        .max(policy.triple_candidate_limit);
    let candidates = ranked
        .iter()
        .take(candidate_count)
        .map(|result| Candidate::new(result.instrument, profile))
        .collect::<Vec<Candidate<'a>>>();

    let search = Search {
        profile,
        policy,
        best_single,
    };
    let mut bests: BTreeMap<Vec<String>, AllocationRecommendation<'a>> = BTreeMap::new();

    let pair_pool = &candidates[..policy.pair_candidate_limit.min(candidates.len())];
    let mut pairs_evaluated = 0usize;
    for (index, first) in pair_pool.iter().enumerate() {
        for second in &pair_pool[index + 1..] {
            if first.instrument.is_exclusive_with(second.instrument) {
                continue;
            }
            pairs_evaluated += 1;
            search.search_pair(first, second, &mut bests);
        }
    }

    let triple_pool = &candidates[..policy.triple_candidate_limit.min(candidates.len())];
    let mut triples_evaluated = 0usize;
    for (i, first) in triple_pool.iter().enumerate() {
        for (j, second) in triple_pool.iter().enumerate().skip(i + 1) {
            if first.instrument.is_exclusive_with(second.instrument) {
                continue;
            }
            for third in &triple_pool[j + 1..] {
                if first.instrument.is_exclusive_with(third.instrument)
                    || second.instrument.is_exclusive_with(third.instrument)
                {
                    continue;
                }
                triples_evaluated += 1;
                search.search_triple(first, second, third, &mut bests);
            }
        }
    }

    let accepted = bests.len();
    let mut merged = bests.into_values().collect::<Vec<AllocationRecommendation<'a>>>();
    merged.sort_by(compare_recommendations);
    let kept = drop_dominated(merged);

    debug!(
        candidates = candidates.len(),
        pairs_evaluated,
        triples_evaluated,
        accepted,
        kept = kept.len(),
        best_single,
        "allocation search finished"
    );

    kept
}

#[derive(Debug, Clone)]
struct Candidate<'a> {
    instrument: &'a Instrument,
    /// Rate paid on spend outside the instrument's bonus categories.
    base_rate: f64,
    /// Net return when the instrument carries the full total alone.
    alone_return: f64,
    thresholds: Vec<f64>,
}

impl<'a> Candidate<'a> {
    fn new(instrument: &'a Instrument, profile: &SpendingProfile) -> Self {
        let alone = calculate_for_allocation(
            instrument,
            profile.total,
            &BTreeMap::new(),
            &profile.additional_info,
        );
        Self {
            instrument,
            base_rate: resolve_base_rate(instrument, &profile.additional_info).rate,
            alone_return: alone.net_return,
            thresholds: thresholds(instrument),
        }
    }

    fn category_rate(&self, category: &str) -> f64 {
        self.instrument.category_rate(category, self.base_rate)
    }
}

/// Category spend routed to each member, in member order.
#[derive(Debug, Clone)]
struct CategoryPlan {
    per_member: Vec<BTreeMap<String, f64>>,
    uncategorized: f64,
}

impl CategoryPlan {
    fn categorized(&self, member: usize) -> f64 {
        self.per_member
            .get(member)
            .map(|categories| categories.values().sum())
            .unwrap_or(0.0)
    }
}

struct Search<'p> {
    profile: &'p SpendingProfile,
    policy: OptimizerPolicy,
    best_single: f64,
}

impl Search<'_> {
    fn search_pair<'a>(
        &self,
        first: &Candidate<'a>,
        second: &Candidate<'a>,
        bests: &mut BTreeMap<Vec<String>, AllocationRecommendation<'a>>,
    ) {
        let members = [first, second];
        let plan = self.assign_categories(&members);
        for share in self.pair_splits(first, second, &plan) {
            let shares = [share, plan.uncategorized - share];
            if let Some(recommendation) = self.evaluate(&members, &plan, &shares) {
                keep_best(bests, recommendation);
            }
        }
    }

    fn search_triple<'a>(
        &self,
        first: &Candidate<'a>,
        second: &Candidate<'a>,
        third: &Candidate<'a>,
        bests: &mut BTreeMap<Vec<String>, AllocationRecommendation<'a>>,
    ) {
        let members = [first, second, third];
        let plan = self.assign_categories(&members);
        for [first_share, second_share] in self.triple_splits(first, second, &plan) {
            let Some(third_share) = self
                .policy
                .remainder_share(plan.uncategorized - first_share - second_share)
            else {
                continue;
            };
            let shares = [first_share, second_share, third_share];
            if let Some(recommendation) = self.evaluate(&members, &plan, &shares) {
                keep_best(bests, recommendation);
            }
        }
    }

    /// Each category goes whole to the member with the highest rate for it;
    /// ties go to the earlier member.
    fn assign_categories(&self, members: &[&Candidate<'_>]) -> CategoryPlan {
        let mut per_member = vec![BTreeMap::new(); members.len()];
        let mut categorized = 0.0;

        for (category, amount) in &self.profile.breakdown {
            if *amount <= 0.0 {
                continue;
            }
            let mut winner = 0usize;
            let mut winning_rate = f64::NEG_INFINITY;
            for (index, member) in members.iter().enumerate() {
                let rate = member.category_rate(category);
                if rate > winning_rate {
                    winner = index;
                    winning_rate = rate;
                }
            }
            if let Some(categories) = per_member.get_mut(winner) {
                categories.insert(category.clone(), *amount);
                categorized += *amount;
            }
        }

        CategoryPlan {
            per_member,
            uncategorized: (self.profile.total - categorized).max(0.0),
        }
    }

    /// Candidate uncategorized shares for the first member of a pair.
    fn pair_splits(
        &self,
        first: &Candidate<'_>,
        second: &Candidate<'_>,
        plan: &CategoryPlan,
    ) -> Vec<f64> {
        let uncategorized = plan.uncategorized;
        let in_range = |share: &f64| (0.0..=uncategorized).contains(share);

        let mut splits = first
            .thresholds
            .iter()
            .map(|threshold| threshold - plan.categorized(0))
            .filter(in_range)
            .collect::<Vec<f64>>();
        splits.extend(
            second
                .thresholds
                .iter()
                .map(|threshold| uncategorized - (threshold - plan.categorized(1)))
                .filter(in_range),
        );
        splits.extend(
            self.policy
                .uniform_points(uncategorized, self.policy.pair_uniform_steps),
        );

        splits.sort_by(f64::total_cmp);
        splits.dedup();
        splits
    }

    /// Candidate `(first, second)` uncategorized shares for a triple; the
    /// third member takes the remainder.
    fn triple_splits(
        &self,
        first: &Candidate<'_>,
        second: &Candidate<'_>,
        plan: &CategoryPlan,
    ) -> Vec<[f64; 2]> {
        let uncategorized = plan.uncategorized;
        let in_range = |share: &f64| (0.0..=uncategorized).contains(share);
        let sweep = self.policy.triple_remainder_steps;
        let mut splits: Vec<[f64; 2]> = Vec::new();

        for first_share in first
            .thresholds
            .iter()
            .map(|threshold| threshold - plan.categorized(0))
            .filter(in_range)
        {
            for second_share in self.policy.uniform_points(uncategorized - first_share, sweep) {
                splits.push([first_share, second_share]);
            }
        }

        for second_share in second
            .thresholds
            .iter()
            .map(|threshold| threshold - plan.categorized(1))
            .filter(in_range)
        {
            for first_share in self.policy.uniform_points(uncategorized - second_share, sweep) {
                splits.push([first_share, second_share]);
            }
        }

        let grid = self.policy.triple_grid_steps.max(1);
        for first_step in 0..=grid {
            for second_step in 0..=(grid - first_step) {
                splits.push([
                    uncategorized * first_step as f64 / grid as f64,
                    uncategorized * second_step as f64 / grid as f64,
                ]);
            }
        }

        splits.sort_by(|left, right| {
            left[0]
                .total_cmp(&right[0])
                .then_with(|| left[1].total_cmp(&right[1]))
        });
        splits.dedup();
        splits
    }

    fn evaluate<'a>(
        &self,
        members: &[&Candidate<'a>],
        plan: &CategoryPlan,
        shares: &[f64],
    ) -> Option<AllocationRecommendation<'a>> {
        let mut entries = Vec::with_capacity(members.len());
        for (index, member) in members.iter().enumerate() {
            let categories = plan.per_member.get(index)?;
            let allocated_amount = plan.categorized(index) + shares.get(index)?;
            if !self.policy.meets_usage_floor(allocated_amount) {
                return None;
            }

            let result = calculate_for_allocation(
                member.instrument,
                allocated_amount,
                categories,
                &self.profile.additional_info,
            );
            entries.push(AllocationEntry {
                instrument: member.instrument,
                allocated_amount,
                category_allocations: categories.clone(),
                total_points: result.total_points,
                points_value: result.points_value,
                net_return: result.net_return,
                breakdown: result.breakdown,
            });
        }

        let total_net_return = entries.iter().map(|entry| entry.net_return).sum::<f64>();
        let beats_every_member_alone = members
            .iter()
            .all(|member| total_net_return > member.alone_return);
        let improvement = total_net_return - self.best_single;
        if !beats_every_member_alone || improvement <= 0.0 {
            return None;
        }

        trace!(
            members = ?entries.iter().map(|entry| entry.instrument.id.as_str()).collect::<Vec<&str>>(),
            shares = ?shares,
            total_net_return,
            "accepted allocation"
        );

        Some(AllocationRecommendation {
            entries,
            total_net_return,
            total_effective_rate: rate_of_return(total_net_return, self.profile.total),
            improvement,
        })
    }
}

fn keep_best<'a>(
    bests: &mut BTreeMap<Vec<String>, AllocationRecommendation<'a>>,
    recommendation: AllocationRecommendation<'a>,
) {
    let key = recommendation.id_set();
    match bests.get(&key) {
        Some(existing) if existing.total_net_return >= recommendation.total_net_return => {}
        _ => {
            bests.insert(key, recommendation);
        }
    }
}

fn compare_recommendations(
    left: &AllocationRecommendation<'_>,
    right: &AllocationRecommendation<'_>,
) -> Ordering {
    return_key(right.total_net_return)
        .total_cmp(&return_key(left.total_net_return))
        .then_with(|| left.entries.len().cmp(&right.entries.len()))
        .then_with(|| left.id_set().cmp(&right.id_set()))
}

// Micro-unit resolution so float noise cannot reorder equal returns.
fn return_key(value: f64) -> f64 {
    (value * 1_000_000.0).round()
}

/// Drops any result whose instrument set strictly contains an
/// already-kept, better-or-equal result's set. Input must be sorted.
fn drop_dominated<'a>(
    sorted: Vec<AllocationRecommendation<'a>>,
) -> Vec<AllocationRecommendation<'a>> {
    let mut kept: Vec<AllocationRecommendation<'a>> = Vec::new();
    let mut kept_sets: Vec<BTreeSet<String>> = Vec::new();

    for recommendation in sorted {
        let ids = recommendation.id_set().into_iter().collect::<BTreeSet<String>>();
        let dominated = kept_sets
            .iter()
            .any(|smaller| smaller.len() < ids.len() && smaller.is_subset(&ids));
        if dominated {
            continue;
        }
        kept_sets.push(ids);
        kept.push(recommendation);
    }

    kept
}
