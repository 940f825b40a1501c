use crate::catalog::{BonusRate, FeeWaiverRule, Instrument, RateTier, SpecialBonus, TieredRate};

pub(crate) fn card(id: &str, base_rate: f64, annual_fee: f64) -> Instrument {
    Instrument {
        id: id.to_string(),
        name: id.to_uppercase(),
        issuer: "Test Issuer".to_string(),
        annual_fee,
        annual_fee_conditions: None,
        base_rate,
        bonus_rates: Vec::new(),
        special_bonuses: Vec::new(),
        point_value: None,
        max_annual_points: None,
        description: None,
        exclusive_group: None,
        tiered_rate: None,
        fee_waiver: None,
    }
}

pub(crate) fn with_bonus(mut instrument: Instrument, category: &str, rate: f64) -> Instrument {
    instrument.bonus_rates.push(BonusRate {
        category: category.to_string(),
        category_name: category.to_string(),
        rate,
        description: None,
    });
    instrument
}

pub(crate) fn with_usage_bonus(mut instrument: Instrument, threshold: f64, bonus: f64) -> Instrument {
    instrument.special_bonuses.push(SpecialBonus::AnnualUsage {
        threshold,
        bonus,
        description: None,
    });
    instrument
}

pub(crate) fn with_fixed_bonus(
    mut instrument: Instrument,
    bonus: f64,
    captured_elsewhere: bool,
) -> Instrument {
    instrument.special_bonuses.push(SpecialBonus::Fixed {
        bonus,
        captured_elsewhere,
        description: None,
    });
    instrument
}

pub(crate) fn with_waiver(mut instrument: Instrument, spend_threshold: f64) -> Instrument {
    instrument.fee_waiver = Some(FeeWaiverRule {
        spend_threshold,
        applies_from_year: 2,
    });
    instrument
}

pub(crate) fn in_group(mut instrument: Instrument, group: &str) -> Instrument {
    instrument.exclusive_group = Some(group.to_string());
    instrument
}

pub(crate) fn with_tier(
    mut instrument: Instrument,
    parameter: &str,
    min_balance: f64,
    rate: f64,
) -> Instrument {
    let tiered = instrument.tiered_rate.get_or_insert_with(|| TieredRate {
        parameter: parameter.to_string(),
        tiers: Vec::new(),
    });
    tiered.tiers.push(RateTier { min_balance, rate });
    instrument
}
