use serde::Serialize;

use crate::profile::SpendingProfile;

/// Largest annual total accepted, in currency units.
pub const MAX_ANNUAL_TOTAL: f64 = 100_000_000.0;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValidationReport {
    pub valid: bool,
    pub errors: Vec<String>,
}

/// Checks every rule and reports all violations, not just the first.
pub fn validate(profile: &SpendingProfile) -> ValidationReport {
    let mut errors = Vec::new();

    if profile.total <= 0.0 {
        errors.push("total must be ≥ 1".to_string());
    }

    if profile.total > MAX_ANNUAL_TOTAL {
        errors.push(format!(
            "total exceeds maximum of {}",
            group_thousands(MAX_ANNUAL_TOTAL)
        ));
    }

    let breakdown_total = profile.categorized_total();
    if breakdown_total > profile.total {
        errors.push(format!(
            "breakdown sum ({}) exceeds total ({})",
            group_thousands(breakdown_total),
            group_thousands(profile.total)
        ));
    }

    for (category, amount) in &profile.breakdown {
        if *amount < 0.0 {
            errors.push(format!("category `{category}` amount must be ≥ 0"));
        }
    }

    ValidationReport {
        valid: errors.is_empty(),
        errors,
    }
}

fn group_thousands(value: f64) -> String {
    let rounded = value.round();
    let negative = rounded < 0.0;
    let digits = format!("{:.0}", rounded.abs());
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (index, ch) in digits.chars().enumerate() {
        if index > 0 && (digits.len() - index).is_multiple_of(3) {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    if negative {
        return format!("-{grouped}");
    }
    grouped
}

#[cfg(test)]
mod tests {
    use super::{group_thousands, validate};
    use crate::profile::SpendingProfile;

    #[test]
    fn zero_total_yields_exactly_one_minimum_error() {
        let report = validate(&SpendingProfile::new(0.0));
        assert!(!report.valid);
        assert_eq!(report.errors.len(), 1);
        assert!(report.errors[0].contains("≥ 1"));
    }

    #[test]
    fn breakdown_over_total_names_both_sums() {
        let profile = SpendingProfile::new(500_000.0)
            .with_category("amazon", 400_000.0)
            .with_category("lawson", 200_000.0);
        let report = validate(&profile);
        assert_eq!(report.errors.len(), 1);
        assert!(report.errors[0].contains("600,000"));
        assert!(report.errors[0].contains("500,000"));
    }

    #[test]
    fn violations_are_collected_together() {
        let profile = SpendingProfile::new(-5.0)
            .with_category("travel", -10.0)
            .with_category("amazon", 20.0);
        let report = validate(&profile);
        assert!(!report.valid);
        assert_eq!(report.errors.len(), 3);
        assert!(report.errors.iter().any(|error| error.contains("`travel`")));
    }

    #[test]
    fn oversized_total_is_rejected_but_boundary_is_accepted() {
        let over = validate(&SpendingProfile::new(100_000_001.0));
        assert_eq!(over.errors, vec!["total exceeds maximum of 100,000,000".to_string()]);

        let boundary = validate(&SpendingProfile::new(100_000_000.0));
        assert!(boundary.valid);
    }

    #[test]
    fn thousands_grouping_handles_short_and_long_values() {
        assert_eq!(group_thousands(0.0), "0");
        assert_eq!(group_thousands(999.0), "999");
        assert_eq!(group_thousands(1_000.0), "1,000");
        assert_eq!(group_thousands(1_234_567.4), "1,234,567");
    }
}
