use serde::Serialize;

use crate::catalog::Instrument;
use crate::engine::calculator::usage_bonus_points;
use crate::engine::rates::rate_for_balance;

pub const DEFAULT_CURVE_MAX: f64 = 20_000_000.0;
pub const DEFAULT_CURVE_STEP: f64 = 500_000.0;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CurvePoint {
    pub amount: f64,
    pub effective_rate: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BalanceSeries {
    pub balance: f64,
    pub base_rate: f64,
    pub points: Vec<CurvePoint>,
}

/// Net return rate at `amount` of annual spend with no category spend.
/// Negative rates are reported as 0.
pub fn effective_rate_at(instrument: &Instrument, amount: f64, balance: Option<f64>) -> f64 {
    if amount <= 0.0 {
        return 0.0;
    }

    let base_rate = match balance {
        Some(balance) => rate_for_balance(instrument, balance).rate,
        None => instrument.base_rate,
    };
    let total_points = amount * base_rate / 100.0 + usage_bonus_points(instrument, amount);
    let net_return = total_points * instrument.effective_point_value() - instrument.annual_fee;
    (net_return / amount * 100.0).max(0.0)
}

pub fn rate_curve(
    instrument: &Instrument,
    balance: Option<f64>,
    max_amount: f64,
    step: f64,
) -> Vec<CurvePoint> {
    if step <= 0.0 || max_amount < 0.0 || !step.is_finite() || !max_amount.is_finite() {
        return vec![CurvePoint {
            amount: 0.0,
            effective_rate: 0.0,
        }];
    }

    let steps = (max_amount / step).floor() as usize;
    (0..=steps)
        .map(|index| {
            let amount = index as f64 * step;
            CurvePoint {
                amount,
                effective_rate: effective_rate_at(instrument, amount, balance),
            }
        })
        .collect()
}

/// One curve per balance tier (plus zero balance) for tiered instruments;
/// empty otherwise.
pub fn balance_series(instrument: &Instrument, max_amount: f64, step: f64) -> Vec<BalanceSeries> {
    let Some(tiered) = instrument.tiered_rate.as_ref() else {
        return Vec::new();
    };

    let mut balances = tiered
        .tiers
        .iter()
        .map(|tier| tier.min_balance)
        .filter(|balance| *balance > 0.0)
        .collect::<Vec<f64>>();
    balances.push(0.0);
    balances.sort_by(f64::total_cmp);
    balances.dedup();

    balances
        .into_iter()
        .map(|balance| BalanceSeries {
            balance,
            base_rate: rate_for_balance(instrument, balance).rate,
            points: rate_curve(instrument, Some(balance), max_amount, step),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::{DEFAULT_CURVE_MAX, DEFAULT_CURVE_STEP, balance_series, effective_rate_at, rate_curve};
    use crate::catalog::Catalog;
    use crate::engine::fixtures::{card, with_fixed_bonus, with_usage_bonus};

    #[test]
    fn default_curve_has_forty_one_points_starting_at_zero() {
        let instrument = card("flat", 1.0, 0.0);
        let curve = rate_curve(&instrument, None, DEFAULT_CURVE_MAX, DEFAULT_CURVE_STEP);
        assert_eq!(curve.len(), 41);
        assert!((curve[0].effective_rate - 0.0).abs() < f64::EPSILON);
        assert!((curve[1].effective_rate - 1.0).abs() < 1e-9);
        assert!((curve[40].amount - 20_000_000.0).abs() < f64::EPSILON);
    }

    #[test]
    fn fee_heavy_low_spend_clamps_to_zero() {
        let instrument = card("premium", 1.0, 77_000.0);
        assert!((effective_rate_at(&instrument, 500_000.0, None) - 0.0).abs() < f64::EPSILON);
        assert!(effective_rate_at(&instrument, 20_000_000.0, None) > 0.0);
    }

    #[test]
    fn usage_bonus_steps_the_curve_but_fixed_bonus_does_not() {
        let instrument = with_fixed_bonus(
            with_usage_bonus(card("step", 1.0, 0.0), 1_000_000.0, 10_000.0),
            50_000.0,
            false,
        );
        assert!((effective_rate_at(&instrument, 500_000.0, None) - 1.0).abs() < 1e-9);
        assert!((effective_rate_at(&instrument, 1_000_000.0, None) - 2.0).abs() < 1e-9);
    }

    #[test]
    fn tiered_instrument_gets_one_series_per_tier_and_zero() {
        let catalog = Catalog::bundled_demo();
        assert!(catalog.is_ok());
        if let Ok(catalog) = catalog {
            let platinum = catalog.by_id("deposit-platinum-debit");
            assert!(platinum.is_some());
            if let Some(card) = platinum {
                let series = balance_series(card, 1_000_000.0, 500_000.0);
                let balances = series.iter().map(|entry| entry.balance).collect::<Vec<f64>>();
                assert_eq!(
                    balances,
                    vec![0.0, 1_000_000.0, 2_000_000.0, 5_000_000.0, 10_000_000.0]
                );
                assert!((series[0].base_rate - 1.25).abs() < f64::EPSILON);
                assert!((series[4].base_rate - 2.5).abs() < f64::EPSILON);
                assert_eq!(series[0].points.len(), 3);
            }

            if let Some(flat) = catalog.by_id("flat-one") {
                assert!(balance_series(flat, 1_000_000.0, 500_000.0).is_empty());
            }
        }
    }
}
