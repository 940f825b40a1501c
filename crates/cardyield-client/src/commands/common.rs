use crate::catalog::Instrument;
use crate::contracts::types::{
    AllocationEntryRow, AllocationRow, CalculationRow, InstrumentSummary, ProfileSummary,
    SpendingSource,
};
use crate::engine::waiver::{recommendation_second_year, result_second_year, second_year_return};
use crate::engine::{AllocationRecommendation, CalculationResult};
use crate::profile::input::resolve_source;
use crate::profile::parse::parse_profile;
use crate::profile::{SpendingProfile, validate};
use crate::{ClientError, ClientResult};

/// Profile values supplied on the command line, applied over the file.
#[derive(Debug, Clone, Default)]
pub struct ProfileOverrides {
    pub balances: Vec<(String, f64)>,
    pub point_values: Vec<(String, f64)>,
}

#[derive(Debug, Clone)]
pub(crate) struct LoadedProfile {
    pub(crate) profile: SpendingProfile,
    pub(crate) source: SpendingSource,
}

/// Reads, parses, applies overrides, and validates a spending profile.
/// Validation failures carry every message at once.
pub(crate) fn load_profile(
    command: &str,
    path: Option<&str>,
    stdin_override: Option<String>,
    overrides: &ProfileOverrides,
) -> ClientResult<LoadedProfile> {
    let resolved = resolve_source(path, stdin_override)?;
    let mut profile = parse_profile(&resolved.content)?;
    apply_overrides(command, &mut profile, overrides)?;

    let report = validate(&profile);
    if !report.valid {
        return Err(ClientError::spending_validation_failed(report.errors));
    }

    Ok(LoadedProfile {
        profile,
        source: SpendingSource {
            kind: resolved.kind.as_str().to_string(),
            reference: resolved.reference,
        },
    })
}

fn apply_overrides(
    command: &str,
    profile: &mut SpendingProfile,
    overrides: &ProfileOverrides,
) -> ClientResult<()> {
    for (parameter, balance) in &overrides.balances {
        if !balance.is_finite() || *balance < 0.0 {
            return Err(ClientError::invalid_argument_for_command(
                &format!("Balance `{parameter}` must be a non-negative number."),
                Some(command),
            ));
        }
        profile
            .additional_info
            .balances
            .insert(parameter.clone(), *balance);
    }

    for (instrument_id, value) in &overrides.point_values {
        if !value.is_finite() || *value <= 0.0 {
            return Err(ClientError::invalid_argument_for_command(
                &format!("Point value for `{instrument_id}` must be greater than zero."),
                Some(command),
            ));
        }
        profile
            .additional_info
            .custom_point_values
            .insert(instrument_id.clone(), *value);
    }

    Ok(())
}

pub(crate) fn profile_summary(profile: &SpendingProfile) -> ProfileSummary {
    ProfileSummary {
        total: profile.total,
        categorized_total: profile.categorized_total(),
        uncategorized_total: profile.uncategorized_amount(),
        breakdown: profile.breakdown.clone(),
        balances: profile.additional_info.balances.clone(),
        custom_point_values: profile.additional_info.custom_point_values.clone(),
        enable_multi_card: profile.additional_info.enable_multi_card,
    }
}

pub(crate) fn instrument_summary(instrument: &Instrument) -> InstrumentSummary {
    InstrumentSummary {
        id: instrument.id.clone(),
        name: instrument.name.clone(),
        issuer: instrument.issuer.clone(),
        annual_fee: instrument.annual_fee,
        base_rate: instrument.base_rate,
        point_value: instrument.effective_point_value(),
        bonus_categories: instrument
            .bonus_rates
            .iter()
            .map(|bonus| bonus.category.clone())
            .collect(),
        exclusive_group: instrument.exclusive_group().map(str::to_string),
        tiered: instrument.tiered_rate.is_some(),
    }
}

pub(crate) fn calculation_row(rank: usize, result: &CalculationResult<'_>) -> CalculationRow {
    CalculationRow {
        rank,
        instrument_id: result.instrument.id.clone(),
        instrument_name: result.instrument.name.clone(),
        issuer: result.instrument.issuer.clone(),
        total_points: result.total_points,
        points_value: result.points_value,
        net_return: result.net_return,
        effective_rate: result.effective_rate,
        total_expense: result.total_expense,
        second_year_return: result_second_year(result),
        breakdown: result.breakdown.clone(),
    }
}

pub(crate) fn allocation_row(
    recommendation: &AllocationRecommendation<'_>,
    total: f64,
) -> AllocationRow {
    let entries = recommendation
        .entries
        .iter()
        .map(|entry| AllocationEntryRow {
            instrument_id: entry.instrument.id.clone(),
            instrument_name: entry.instrument.name.clone(),
            allocated_amount: entry.allocated_amount,
            category_allocations: entry.category_allocations.clone(),
            uncategorized_share: entry.uncategorized_share(),
            total_points: entry.total_points,
            points_value: entry.points_value,
            net_return: entry.net_return,
            second_year_return: second_year_return(
                entry.instrument,
                entry.allocated_amount,
                entry.points_value,
            ),
            breakdown: entry.breakdown.clone(),
        })
        .collect();

    AllocationRow {
        instrument_ids: recommendation
            .entries
            .iter()
            .map(|entry| entry.instrument.id.clone())
            .collect(),
        entries,
        total_net_return: recommendation.total_net_return,
        total_effective_rate: recommendation.total_effective_rate,
        improvement: recommendation.improvement,
        second_year: recommendation_second_year(recommendation, total),
    }
}

#[cfg(test)]
mod tests {
    use super::{ProfileOverrides, load_profile};

    #[test]
    fn overrides_are_applied_before_validation() {
        let loaded = load_profile(
            "rank",
            Some("-"),
            Some(r#"{"total": 1000000}"#.to_string()),
            &ProfileOverrides {
                balances: vec![("deposit_balance".to_string(), 2_000_000.0)],
                point_values: vec![("sky-miles-premium".to_string(), 2.0)],
            },
        );
        assert!(loaded.is_ok());
        if let Ok(loaded) = loaded {
            assert_eq!(loaded.source.kind, "stdin");
            assert_eq!(
                loaded.profile.additional_info.balance("deposit_balance"),
                Some(2_000_000.0)
            );
        }
    }

    #[test]
    fn invalid_profile_reports_every_problem() {
        let loaded = load_profile(
            "rank",
            Some("-"),
            Some(r#"{"total": 0, "breakdown": {"travel": -5}}"#.to_string()),
            &ProfileOverrides::default(),
        );
        assert!(loaded.is_err());
        if let Err(error) = loaded {
            assert_eq!(error.code, "spending_validation_failed");
            assert_eq!(error.recovery_steps.len(), 2);
        }
    }

    #[test]
    fn non_positive_point_value_override_is_rejected() {
        let loaded = load_profile(
            "recommend",
            Some("-"),
            Some(r#"{"total": 1000}"#.to_string()),
            &ProfileOverrides {
                balances: Vec::new(),
                point_values: vec![("card".to_string(), 0.0)],
            },
        );
        assert!(loaded.is_err());
        if let Err(error) = loaded {
            assert_eq!(error.code, "invalid_argument");
            assert!(error.recovery_steps[0].contains("recommend"));
        }
    }
}
