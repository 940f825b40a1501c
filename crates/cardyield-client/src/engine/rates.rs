use crate::catalog::Instrument;
use crate::profile::AdditionalInfo;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResolvedRate {
    pub rate: f64,
    /// Balance figure that lifted the rate above the nominal base rate.
    pub applied_balance: Option<f64>,
}

impl ResolvedRate {
    fn nominal(instrument: &Instrument) -> Self {
        Self {
            rate: instrument.base_rate,
            applied_balance: None,
        }
    }
}

pub fn resolve_base_rate(instrument: &Instrument, info: &AdditionalInfo) -> ResolvedRate {
    let Some(tiered) = instrument.tiered_rate.as_ref() else {
        return ResolvedRate::nominal(instrument);
    };
    let Some(balance) = info
        .balance(&tiered.parameter)
        .filter(|balance| *balance > 0.0)
    else {
        return ResolvedRate::nominal(instrument);
    };

    rate_for_balance(instrument, balance)
}

/// Highest tier whose `min_balance` the balance meets; base rate otherwise.
pub fn rate_for_balance(instrument: &Instrument, balance: f64) -> ResolvedRate {
    let Some(tiered) = instrument.tiered_rate.as_ref() else {
        return ResolvedRate::nominal(instrument);
    };

    let satisfied = tiered
        .tiers
        .iter()
        .filter(|tier| tier.min_balance <= balance)
        .max_by(|left, right| left.min_balance.total_cmp(&right.min_balance));

    match satisfied {
        Some(tier) => ResolvedRate {
            rate: tier.rate,
            applied_balance: (tier.rate > instrument.base_rate).then_some(balance),
        },
        None => ResolvedRate::nominal(instrument),
    }
}
