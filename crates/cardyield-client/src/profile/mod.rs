pub(crate) mod input;
pub(crate) mod parse;
pub mod validate;

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

pub use validate::{MAX_ANNUAL_TOTAL, ValidationReport, validate};

/// Spending categories known to the bundled catalog, with display labels.
pub const KNOWN_CATEGORIES: [(&str, &str); 10] = [
    ("amazon", "Amazon"),
    ("rakuten", "Online mall"),
    ("yahoo_shopping", "Yahoo! Shopping"),
    ("seven_eleven", "Seven-Eleven"),
    ("family_mart", "FamilyMart"),
    ("lawson", "Lawson"),
    ("restaurant", "Partner restaurants"),
    ("travel", "Airline and partner hotels"),
    ("jal_group", "Airline tickets and in-flight sales"),
    ("other", "Everything else"),
];

pub fn category_label(category: &str) -> Option<&'static str> {
    KNOWN_CATEGORIES
        .iter()
        .find(|(id, _)| *id == category)
        .map(|(_, label)| *label)
}

/// One year of spend. Categories absent from `breakdown` are uncategorized.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SpendingProfile {
    pub total: f64,
    #[serde(default)]
    pub breakdown: BTreeMap<String, f64>,
    #[serde(default)]
    pub additional_info: AdditionalInfo,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AdditionalInfo {
    /// External balance figures keyed by tiered-rate parameter name.
    #[serde(default)]
    pub balances: BTreeMap<String, f64>,
    #[serde(default)]
    pub enable_multi_card: bool,
    /// Point value overrides keyed by instrument id.
    #[serde(default)]
    pub custom_point_values: BTreeMap<String, f64>,
}

impl SpendingProfile {
    pub fn new(total: f64) -> Self {
        Self {
            total,
            ..Self::default()
        }
    }

    pub fn with_category(mut self, category: &str, amount: f64) -> Self {
        self.breakdown.insert(category.to_string(), amount);
        self
    }

    pub fn with_balance(mut self, parameter: &str, balance: f64) -> Self {
        self.additional_info
            .balances
            .insert(parameter.to_string(), balance);
        self
    }

    pub fn with_point_value(mut self, instrument_id: &str, value: f64) -> Self {
        self.additional_info
            .custom_point_values
            .insert(instrument_id.to_string(), value);
        self
    }

    pub fn categorized_total(&self) -> f64 {
        self.breakdown.values().sum()
    }

    pub fn uncategorized_amount(&self) -> f64 {
        (self.total - self.categorized_total()).max(0.0)
    }
}

impl AdditionalInfo {
    pub fn balance(&self, parameter: &str) -> Option<f64> {
        self.balances.get(parameter).copied()
    }

    pub fn point_value_override(&self, instrument_id: &str) -> Option<f64> {
        self.custom_point_values.get(instrument_id).copied()
    }
}
