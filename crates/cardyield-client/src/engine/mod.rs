pub mod calculator;
pub mod curve;
pub mod merge;
pub mod optimizer;
pub mod policy;
pub mod ranking;
pub mod rates;
pub mod thresholds;
mod types;
pub mod waiver;

#[cfg(test)]
pub(crate) mod fixtures;

pub use types::{
    AllocationEntry, AllocationRecommendation, CalculationResult, CategoryDetail, ResultBreakdown,
};
