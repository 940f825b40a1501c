use std::collections::BTreeMap;

use serde::Serialize;

use crate::catalog::Instrument;
use crate::engine::ResultBreakdown;
use crate::engine::curve::{BalanceSeries, CurvePoint};
use crate::engine::waiver::SecondYearProjection;
use crate::setup::CatalogSource;

#[derive(Debug, Clone, Serialize)]
pub struct SpendingSource {
    pub kind: String,
    pub reference: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ProfileSummary {
    pub total: f64,
    pub categorized_total: f64,
    pub uncategorized_total: f64,
    pub breakdown: BTreeMap<String, f64>,
    pub balances: BTreeMap<String, f64>,
    pub custom_point_values: BTreeMap<String, f64>,
    pub enable_multi_card: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct InstrumentSummary {
    pub id: String,
    pub name: String,
    pub issuer: String,
    pub annual_fee: f64,
    pub base_rate: f64,
    pub point_value: f64,
    pub bonus_categories: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exclusive_group: Option<String>,
    pub tiered: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct CalculationRow {
    pub rank: usize,
    pub instrument_id: String,
    pub instrument_name: String,
    pub issuer: String,
    pub total_points: f64,
    pub points_value: f64,
    pub net_return: f64,
    pub effective_rate: f64,
    pub total_expense: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub second_year_return: Option<f64>,
    pub breakdown: ResultBreakdown,
}

#[derive(Debug, Clone, Serialize)]
pub struct AllocationEntryRow {
    pub instrument_id: String,
    pub instrument_name: String,
    pub allocated_amount: f64,
    pub category_allocations: BTreeMap<String, f64>,
    pub uncategorized_share: f64,
    pub total_points: f64,
    pub points_value: f64,
    pub net_return: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub second_year_return: Option<f64>,
    pub breakdown: ResultBreakdown,
}

#[derive(Debug, Clone, Serialize)]
pub struct AllocationRow {
    pub instrument_ids: Vec<String>,
    pub entries: Vec<AllocationEntryRow>,
    pub total_net_return: f64,
    pub total_effective_rate: f64,
    pub improvement: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub second_year: Option<SecondYearProjection>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RankedRow {
    Single(CalculationRow),
    Multi(AllocationRow),
}

#[derive(Debug, Clone, Serialize)]
pub struct RankData {
    pub catalog: CatalogSource,
    pub source: SpendingSource,
    pub profile: ProfileSummary,
    pub total_instruments: usize,
    pub top: usize,
    pub results: Vec<CalculationRow>,
}

#[derive(Debug, Clone, Serialize)]
pub struct RecommendData {
    pub catalog: CatalogSource,
    pub source: SpendingSource,
    pub profile: ProfileSummary,
    pub policy_version: String,
    pub multi_card_searched: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub best_single: Option<CalculationRow>,
    pub recommendations: Vec<AllocationRow>,
    pub merged: Vec<RankedRow>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ValidateData {
    pub valid: bool,
    pub source: SpendingSource,
    pub profile: ProfileSummary,
    pub unknown_categories: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct CardsListData {
    pub catalog: CatalogSource,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub issuer: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_fee: Option<f64>,
    pub total_instruments: usize,
    pub cards: Vec<InstrumentSummary>,
}

#[derive(Debug, Clone, Serialize)]
pub struct CardShowData {
    pub catalog: CatalogSource,
    pub instrument: Instrument,
    pub thresholds: Vec<f64>,
}

#[derive(Debug, Clone, Serialize)]
pub struct CurveData {
    pub instrument_id: String,
    pub instrument_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub balance: Option<f64>,
    pub max_amount: f64,
    pub step: f64,
    pub points: Vec<CurvePoint>,
    pub balance_series: Vec<BalanceSeries>,
}
