use crate::engine::types::{AllocationRecommendation, CalculationResult};

pub const DEFAULT_MERGE_LIMIT: usize = 10;

#[derive(Debug, Clone)]
pub enum RankedItem<'a> {
    Single(CalculationResult<'a>),
    Multi(AllocationRecommendation<'a>),
}

impl RankedItem<'_> {
    pub fn net_return(&self) -> f64 {
        match self {
            Self::Single(result) => result.net_return,
            Self::Multi(recommendation) => recommendation.total_net_return,
        }
    }

    pub fn effective_rate(&self) -> f64 {
        match self {
            Self::Single(result) => result.effective_rate,
            Self::Multi(recommendation) => recommendation.total_effective_rate,
        }
    }

    pub fn is_multi(&self) -> bool {
        matches!(self, Self::Multi(_))
    }
}

/// Singles and multi-instrument results in one list, best first. Singles
/// come first among equal returns.
pub fn merge_results<'a>(
    singles: Vec<CalculationResult<'a>>,
    multis: Vec<AllocationRecommendation<'a>>,
    limit: usize,
) -> Vec<RankedItem<'a>> {
    let mut merged = singles
        .into_iter()
        .map(RankedItem::Single)
        .chain(multis.into_iter().map(RankedItem::Multi))
        .collect::<Vec<RankedItem<'a>>>();
    merged.sort_by(|left, right| right.net_return().total_cmp(&left.net_return()));
    merged.truncate(limit);
    merged
}
