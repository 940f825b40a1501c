use std::collections::BTreeMap;

use crate::catalog::{Instrument, SpecialBonus};
use crate::engine::rates::resolve_base_rate;
use crate::engine::types::{CalculationResult, CategoryDetail, ResultBreakdown, rate_of_return};
use crate::profile::{AdditionalInfo, SpendingProfile};

/// Runs one instrument over the whole profile.
pub fn calculate<'a>(
    instrument: &'a Instrument,
    profile: &SpendingProfile,
) -> CalculationResult<'a> {
    calculate_for_allocation(
        instrument,
        profile.total,
        &profile.breakdown,
        &profile.additional_info,
    )
}

/// Runs one instrument over `amount`, of which `categories` is the
/// categorized part. The annual fee is always charged.
pub fn calculate_for_allocation<'a>(
    instrument: &'a Instrument,
    amount: f64,
    categories: &BTreeMap<String, f64>,
    info: &AdditionalInfo,
) -> CalculationResult<'a> {
    let resolved = resolve_base_rate(instrument, info);
    let base_points = amount * resolved.rate / 100.0;

    let mut bonus_points = 0.0;
    let mut details = Vec::new();
    for bonus in &instrument.bonus_rates {
        let spent = categories.get(&bonus.category).copied().unwrap_or(0.0);
        if spent <= 0.0 {
            continue;
        }
        let category_points = spent * bonus.rate / 100.0;
        bonus_points += category_points - spent * resolved.rate / 100.0;
        details.push(CategoryDetail {
            category: bonus.category.clone(),
            category_name: bonus.category_name.clone(),
            amount: spent,
            rate: bonus.rate,
            points: category_points,
        });
    }

    let special_bonus_points = special_bonus_points(instrument, amount);
    let total_points = base_points + bonus_points + special_bonus_points;
    let point_value = info
        .point_value_override(&instrument.id)
        .unwrap_or_else(|| instrument.effective_point_value());
    let points_value = total_points * point_value;
    let net_return = points_value - instrument.annual_fee;

    CalculationResult {
        instrument,
        total_points,
        points_value,
        net_return,
        effective_rate: rate_of_return(net_return, amount),
        total_expense: amount,
        breakdown: ResultBreakdown {
            base_points,
            bonus_points,
            special_bonus_points,
            annual_fee: instrument.annual_fee,
            details,
            effective_base_rate: resolved.applied_balance.map(|_| resolved.rate),
            applied_balance: resolved.applied_balance,
        },
    }
}

pub(crate) fn special_bonus_points(instrument: &Instrument, amount: f64) -> f64 {
    instrument
        .special_bonuses
        .iter()
        .map(|bonus| match bonus {
            SpecialBonus::AnnualUsage {
                threshold, bonus, ..
            } if *threshold > 0.0 && amount >= *threshold => *bonus,
            SpecialBonus::Fixed {
                bonus,
                captured_elsewhere: false,
                ..
            } => *bonus,
            _ => 0.0,
        })
        .sum()
}

/// Usage-threshold bonuses only; fixed bonuses are excluded.
pub(crate) fn usage_bonus_points(instrument: &Instrument, amount: f64) -> f64 {
    instrument
        .special_bonuses
        .iter()
        .map(|bonus| match bonus {
            SpecialBonus::AnnualUsage {
                threshold, bonus, ..
            } if *threshold > 0.0 && amount >= *threshold => *bonus,
            _ => 0.0,
        })
        .sum()
}
