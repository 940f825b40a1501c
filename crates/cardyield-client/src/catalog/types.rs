use serde::{Deserialize, Serialize};

/// One reward card as published in the catalog. Never mutated after load.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Instrument {
    pub id: String,
    pub name: String,
    pub issuer: String,
    pub annual_fee: f64,
    /// Human-readable waiver wording; informational only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub annual_fee_conditions: Option<String>,
    /// Base accrual rate in percent.
    pub base_rate: f64,
    #[serde(default)]
    pub bonus_rates: Vec<BonusRate>,
    #[serde(default)]
    pub special_bonuses: Vec<SpecialBonus>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub point_value: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_annual_points: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exclusive_group: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tiered_rate: Option<TieredRate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fee_waiver: Option<FeeWaiverRule>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BonusRate {
    pub category: String,
    pub category_name: String,
    pub rate: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SpecialBonus {
    /// Granted in full once annual spend reaches `threshold`; never prorated.
    AnnualUsage {
        threshold: f64,
        bonus: f64,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        description: Option<String>,
    },
    /// Granted unconditionally unless the value is already modelled elsewhere
    /// (a balance-linked rate or a currency-exchange benefit, for example).
    Fixed {
        bonus: f64,
        #[serde(default)]
        captured_elsewhere: bool,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        description: Option<String>,
    },
    /// Declared for display; waivers are evaluated through `fee_waiver`.
    AnnualFeeWaiver {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        threshold: Option<f64>,
        #[serde(default)]
        bonus: f64,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        description: Option<String>,
    },
}

/// Base-rate table driven by an external balance figure named by `parameter`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TieredRate {
    pub parameter: String,
    pub tiers: Vec<RateTier>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RateTier {
    pub min_balance: f64,
    pub rate: f64,
}

/// Annual fee is waived from `applies_from_year` onward once the card's
/// yearly spend reaches `spend_threshold`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FeeWaiverRule {
    pub spend_threshold: f64,
    #[serde(default = "default_waiver_year")]
    pub applies_from_year: u32,
}

fn default_waiver_year() -> u32 {
    2
}

impl Instrument {
    pub fn effective_point_value(&self) -> f64 {
        self.point_value.unwrap_or(1.0)
    }

    pub fn bonus_rate_for(&self, category: &str) -> Option<&BonusRate> {
        self.bonus_rates
            .iter()
            .find(|bonus| bonus.category == category)
    }

    /// Rate paid on `category` when the base accrual is `base_rate`.
    pub fn category_rate(&self, category: &str, base_rate: f64) -> f64 {
        self.bonus_rate_for(category)
            .map(|bonus| bonus.rate)
            .unwrap_or(base_rate)
    }

    pub fn exclusive_group(&self) -> Option<&str> {
        self.exclusive_group
            .as_deref()
            .map(str::trim)
            .filter(|group| !group.is_empty())
    }

    pub fn is_exclusive_with(&self, other: &Instrument) -> bool {
        match (self.exclusive_group(), other.exclusive_group()) {
            (Some(left), Some(right)) => left == right,
            _ => false,
        }
    }

    pub fn is_fee_free(&self) -> bool {
        self.annual_fee <= 0.0
    }
}
