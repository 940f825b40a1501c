use std::path::Path;

use crate::commands::common::instrument_summary;
use crate::contracts::envelope::{SuccessEnvelope, success};
use crate::contracts::types::{CardShowData, CardsListData, InstrumentSummary};
use crate::engine::thresholds::thresholds;
use crate::setup::resolve_catalog;
use crate::{ClientError, ClientResult};

#[derive(Debug, Default)]
pub struct CardsListOptions<'a> {
    pub issuer: Option<String>,
    pub max_fee: Option<f64>,
    pub catalog_path: Option<&'a Path>,
    pub home_override: Option<&'a Path>,
}

#[derive(Debug, Default)]
pub struct CardsShowOptions<'a> {
    pub id: String,
    pub catalog_path: Option<&'a Path>,
    pub home_override: Option<&'a Path>,
}

pub fn list() -> ClientResult<SuccessEnvelope> {
    list_with_options(CardsListOptions::default())
}

#[doc(hidden)]
pub fn list_with_options(options: CardsListOptions<'_>) -> ClientResult<SuccessEnvelope> {
    if let Some(max_fee) = options.max_fee
        && (!max_fee.is_finite() || max_fee < 0.0)
    {
        return Err(ClientError::invalid_argument_for_command(
            "`--max-fee` must be a non-negative number.",
            Some("cards list"),
        ));
    }

    let context = resolve_catalog(options.catalog_path, options.home_override)?;
    let catalog = &context.catalog;
    let cards: Vec<InstrumentSummary> = match (options.issuer.as_deref(), options.max_fee) {
        (Some(issuer), Some(max_fee)) => catalog
            .by_issuer(issuer)
            .filter(|card| card.annual_fee <= max_fee)
            .map(instrument_summary)
            .collect(),
        (Some(issuer), None) => catalog.by_issuer(issuer).map(instrument_summary).collect(),
        (None, Some(max_fee)) => catalog.with_max_fee(max_fee).map(instrument_summary).collect(),
        (None, None) => catalog.all().iter().map(instrument_summary).collect(),
    };

    let data = CardsListData {
        total_instruments: catalog.len(),
        catalog: context.source,
        issuer: options.issuer,
        max_fee: options.max_fee,
        cards,
    };

    success("cards list", data)
}

pub fn show(id: &str) -> ClientResult<SuccessEnvelope> {
    show_with_options(CardsShowOptions {
        id: id.to_string(),
        ..CardsShowOptions::default()
    })
}

#[doc(hidden)]
pub fn show_with_options(options: CardsShowOptions<'_>) -> ClientResult<SuccessEnvelope> {
    let context = resolve_catalog(options.catalog_path, options.home_override)?;
    let instrument = context
        .catalog
        .by_id(&options.id)
        .ok_or_else(|| ClientError::instrument_not_found(&options.id))?;

    let data = CardShowData {
        thresholds: thresholds(instrument),
        instrument: instrument.clone(),
        catalog: context.source,
    };

    success("cards show", data)
}
