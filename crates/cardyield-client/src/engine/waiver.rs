use serde::Serialize;

use crate::catalog::Instrument;
use crate::engine::types::{AllocationRecommendation, CalculationResult, rate_of_return};

const SECOND_YEAR: u32 = 2;

/// Second-year net return when the fee waiver is earned: the points value
/// with no fee deducted. `None` when no waiver applies.
pub fn second_year_return(
    instrument: &Instrument,
    allocated_amount: f64,
    points_value: f64,
) -> Option<f64> {
    let rule = instrument.fee_waiver?;
    let earned = rule.applies_from_year <= SECOND_YEAR
        && instrument.annual_fee > 0.0
        && allocated_amount >= rule.spend_threshold;
    earned.then_some(points_value)
}

pub fn result_second_year(result: &CalculationResult<'_>) -> Option<f64> {
    second_year_return(result.instrument, result.total_expense, result.points_value)
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SecondYearProjection {
    pub total_net_return: f64,
    pub total_effective_rate: f64,
}

/// Combined second-year figures when at least one member earns its waiver;
/// other members contribute their first-year net return.
pub fn recommendation_second_year(
    recommendation: &AllocationRecommendation<'_>,
    total: f64,
) -> Option<SecondYearProjection> {
    let mut any_waived = false;
    let mut total_net_return = 0.0;
    for entry in &recommendation.entries {
        match second_year_return(entry.instrument, entry.allocated_amount, entry.points_value) {
            Some(waived) => {
                any_waived = true;
                total_net_return += waived;
            }
            None => total_net_return += entry.net_return,
        }
    }

    any_waived.then(|| SecondYearProjection {
        total_net_return,
        total_effective_rate: rate_of_return(total_net_return, total),
    })
}
