use crate::catalog::{Instrument, SpecialBonus};

/// Ascending, distinct spend amounts where the instrument's return jumps:
/// usage-bonus thresholds plus the fee-waiver spend threshold.
pub fn thresholds(instrument: &Instrument) -> Vec<f64> {
    let mut amounts = instrument
        .special_bonuses
        .iter()
        .filter_map(|bonus| match bonus {
            SpecialBonus::AnnualUsage { threshold, .. } => Some(*threshold),
            _ => None,
        })
        .chain(instrument.fee_waiver.map(|rule| rule.spend_threshold))
        .filter(|amount| *amount > 0.0 && amount.is_finite())
        .collect::<Vec<f64>>();

    amounts.sort_by(f64::total_cmp);
    amounts.dedup();
    amounts
}
