use std::path::Path;

use crate::contracts::envelope::{SuccessEnvelope, success};
use crate::contracts::types::CurveData;
use crate::engine::curve::{DEFAULT_CURVE_MAX, DEFAULT_CURVE_STEP, balance_series, rate_curve};
use crate::setup::resolve_catalog;
use crate::{ClientError, ClientResult};

#[derive(Debug, Default)]
pub struct CurveOptions<'a> {
    pub id: String,
    pub balance: Option<f64>,
    pub max_amount: Option<f64>,
    pub step: Option<f64>,
    pub catalog_path: Option<&'a Path>,
    pub home_override: Option<&'a Path>,
}

pub fn run(id: &str, balance: Option<f64>) -> ClientResult<SuccessEnvelope> {
    run_with_options(CurveOptions {
        id: id.to_string(),
        balance,
        ..CurveOptions::default()
    })
}

#[doc(hidden)]
pub fn run_with_options(options: CurveOptions<'_>) -> ClientResult<SuccessEnvelope> {
    let max_amount = options.max_amount.unwrap_or(DEFAULT_CURVE_MAX);
    let step = options.step.unwrap_or(DEFAULT_CURVE_STEP);
    if !step.is_finite() || step <= 0.0 || !max_amount.is_finite() || max_amount < step {
        return Err(ClientError::invalid_argument_for_command(
            "`--step` must be positive and no larger than `--max`.",
            Some("curve"),
        ));
    }
    if let Some(balance) = options.balance
        && (!balance.is_finite() || balance < 0.0)
    {
        return Err(ClientError::invalid_argument_for_command(
            "`--balance` must be a non-negative number.",
            Some("curve"),
        ));
    }

    let context = resolve_catalog(options.catalog_path, options.home_override)?;
    let instrument = context
        .catalog
        .by_id(&options.id)
        .ok_or_else(|| ClientError::instrument_not_found(&options.id))?;

    let series = if options.balance.is_none() {
        balance_series(instrument, max_amount, step)
    } else {
        Vec::new()
    };

    let data = CurveData {
        instrument_id: instrument.id.clone(),
        instrument_name: instrument.name.clone(),
        balance: options.balance,
        max_amount,
        step,
        points: rate_curve(instrument, options.balance, max_amount, step),
        balance_series: series,
    };

    success("curve", data)
}
