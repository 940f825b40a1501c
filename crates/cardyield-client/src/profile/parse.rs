use std::collections::BTreeMap;

use serde_json::Value;

use crate::profile::SpendingProfile;
use crate::{ClientError, ClientResult};

const CSV_HEADERS: [&str; 2] = ["category", "amount"];
const CSV_TOTAL_ROW: &str = "total";

pub(crate) fn parse_profile(content: &str) -> ClientResult<SpendingProfile> {
    let trimmed = content.trim();
    if trimmed.is_empty() {
        return Err(ClientError::spending_invalid_format(
            "Spending source is empty.",
            "empty",
        ));
    }

    if trimmed.starts_with('{') {
        return parse_json_object(trimmed);
    }

    if trimmed.starts_with('[') {
        return Err(ClientError::spending_invalid_format(
            "JSON spending input must be a single object, not an array.",
            "json_array",
        ));
    }

    if looks_like_csv(trimmed) {
        return parse_csv(trimmed);
    }

    Err(ClientError::spending_invalid_format(
        "Unsupported spending format. Provide a JSON object or CSV with a `category,amount` header.",
        "unknown",
    ))
}

fn parse_json_object(content: &str) -> ClientResult<SpendingProfile> {
    let value = serde_json::from_str::<Value>(content).map_err(|error| {
        ClientError::spending_invalid_format(
            &format!("Invalid JSON spending input: {error}"),
            "json_object",
        )
    })?;

    if value.get("total").is_none() {
        return Err(ClientError::spending_invalid_format(
            "JSON spending input requires a numeric `total` field.",
            "json_object",
        ));
    }

    serde_json::from_value::<SpendingProfile>(value).map_err(|error| {
        ClientError::spending_invalid_format(
            &format!("JSON spending input has the wrong shape: {error}"),
            "json_object",
        )
    })
}

fn looks_like_csv(content: &str) -> bool {
    let Some(first_line) = content.lines().next() else {
        return false;
    };
    let headers = first_line
        .split(',')
        .map(|header| header.trim().to_ascii_lowercase())
        .collect::<Vec<String>>();
    headers == CSV_HEADERS
}

fn parse_csv(content: &str) -> ClientResult<SpendingProfile> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(content.as_bytes());

    let mut breakdown: BTreeMap<String, f64> = BTreeMap::new();
    let mut explicit_total: Option<f64> = None;

    for (index, record) in reader.records().enumerate() {
        let row = index + 2;
        let record = record.map_err(|error| {
            ClientError::spending_invalid_format(
                &format!("CSV row {row} could not be read: {error}"),
                "csv",
            )
        })?;

        let category = record.get(0).unwrap_or_default().to_string();
        if category.is_empty() {
            return Err(ClientError::spending_invalid_format(
                &format!("CSV row {row} is missing a category."),
                "csv",
            ));
        }

        let raw_amount = record.get(1).unwrap_or_default();
        let amount = raw_amount
            .replace('_', "")
            .parse::<f64>()
            .ok()
            .filter(|value| value.is_finite())
            .ok_or_else(|| {
                ClientError::spending_invalid_format(
                    &format!("CSV row {row} amount must be numeric; got \"{raw_amount}\"."),
                    "csv",
                )
            })?;

        if category.eq_ignore_ascii_case(CSV_TOTAL_ROW) {
            explicit_total = Some(amount);
            continue;
        }

        *breakdown.entry(category).or_insert(0.0) += amount;
    }

    let total = explicit_total.unwrap_or_else(|| breakdown.values().sum());
    Ok(SpendingProfile {
        total,
        breakdown,
        ..SpendingProfile::default()
    })
}
