use std::collections::BTreeMap;

use serde::Serialize;

use crate::catalog::Instrument;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryDetail {
    pub category: String,
    pub category_name: String,
    pub amount: f64,
    pub rate: f64,
    pub points: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ResultBreakdown {
    pub base_points: f64,
    pub bonus_points: f64,
    pub special_bonus_points: f64,
    pub annual_fee: f64,
    pub details: Vec<CategoryDetail>,
    /// Present only when a balance tier raised the rate above `base_rate`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub effective_base_rate: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub applied_balance: Option<f64>,
}

/// Outcome of running one instrument over one spend.
#[derive(Debug, Clone)]
pub struct CalculationResult<'a> {
    pub instrument: &'a Instrument,
    pub total_points: f64,
    pub points_value: f64,
    pub net_return: f64,
    pub effective_rate: f64,
    pub total_expense: f64,
    pub breakdown: ResultBreakdown,
}

#[derive(Debug, Clone)]
pub struct AllocationEntry<'a> {
    pub instrument: &'a Instrument,
    pub allocated_amount: f64,
    pub category_allocations: BTreeMap<String, f64>,
    pub total_points: f64,
    pub points_value: f64,
    pub net_return: f64,
    pub breakdown: ResultBreakdown,
}

impl AllocationEntry<'_> {
    pub fn uncategorized_share(&self) -> f64 {
        self.allocated_amount - self.category_allocations.values().sum::<f64>()
    }
}

/// Split of one year's spend across two or three instruments.
#[derive(Debug, Clone)]
pub struct AllocationRecommendation<'a> {
    pub entries: Vec<AllocationEntry<'a>>,
    pub total_net_return: f64,
    pub total_effective_rate: f64,
    /// Gain over the best single-instrument net return.
    pub improvement: f64,
}

impl AllocationRecommendation<'_> {
    /// Instrument ids in canonical (sorted) order.
    pub fn id_set(&self) -> Vec<String> {
        let mut ids = self
            .entries
            .iter()
            .map(|entry| entry.instrument.id.clone())
            .collect::<Vec<String>>();
        ids.sort();
        ids
    }

    pub fn allocated_total(&self) -> f64 {
        self.entries.iter().map(|entry| entry.allocated_amount).sum()
    }
}

pub(crate) fn rate_of_return(net_return: f64, total: f64) -> f64 {
    if total > 0.0 {
        return net_return / total * 100.0;
    }
    0.0
}
