use std::io;

use serde_json::Value;

use super::fields::{catalog_label, number, optional_number, require, rows, text};
use super::format::{
    Align, Column, format_amount, format_points, format_rate, key_value_rows,
    render_table_or_blocks, terminal_width,
};

const RESULT_COLUMNS: [Column<'static>; 6] = [
    Column {
        name: "#",
        align: Align::Right,
    },
    Column {
        name: "Card",
        align: Align::Left,
    },
    Column {
        name: "Issuer",
        align: Align::Left,
    },
    Column {
        name: "Points",
        align: Align::Right,
    },
    Column {
        name: "Net return",
        align: Align::Right,
    },
    Column {
        name: "Rate",
        align: Align::Right,
    },
];

pub fn render_rank(data: &Value) -> io::Result<String> {
    let profile = require(data, "profile", "rank")?;
    let results = rows(data, "results");

    let mut lines = vec![
        format!(
            "Top {} of {} instruments for {} annual spend ({})",
            results.len(),
            data.get("total_instruments")
                .and_then(Value::as_u64)
                .unwrap_or(0),
            format_amount(number(profile, "total")),
            catalog_label(data)
        ),
        String::new(),
    ];
    lines.extend(profile_lines(profile));
    lines.push(String::new());

    if results.is_empty() {
        lines.push("  The catalog has no instruments to rank.".to_string());
        return Ok(lines.join("\n"));
    }

    lines.extend(result_table(results));

    let notes = result_notes(results);
    if !notes.is_empty() {
        lines.push(String::new());
        lines.push("Notes:".to_string());
        lines.extend(notes);
    }

    Ok(lines.join("\n"))
}

pub(super) fn profile_lines(profile: &Value) -> Vec<String> {
    let mut entries = vec![
        ("Annual spend:", format_amount(number(profile, "total"))),
        (
            "Categorized:",
            format_amount(number(profile, "categorized_total")),
        ),
        (
            "Uncategorized:",
            format_amount(number(profile, "uncategorized_total")),
        ),
    ];

    if let Some(balances) = profile.get("balances").and_then(Value::as_object)
        && !balances.is_empty()
    {
        let rendered = balances
            .iter()
            .map(|(name, value)| format!("{name}={}", format_amount(value.as_f64().unwrap_or(0.0))))
            .collect::<Vec<String>>()
            .join(", ");
        entries.push(("Balances:", rendered));
    }

    key_value_rows(&entries, 2)
}

pub(super) fn result_table(results: &[Value]) -> Vec<String> {
    let table_rows = results
        .iter()
        .map(|row| {
            vec![
                row.get("rank")
                    .and_then(Value::as_u64)
                    .map(|rank| rank.to_string())
                    .unwrap_or_default(),
                text(row, "instrument_name").to_string(),
                text(row, "issuer").to_string(),
                format_points(number(row, "total_points")),
                format_amount(number(row, "net_return")),
                format_rate(number(row, "effective_rate")),
            ]
        })
        .collect::<Vec<Vec<String>>>();

    render_table_or_blocks(&RESULT_COLUMNS, &table_rows, terminal_width(), "Result")
}

fn result_notes(results: &[Value]) -> Vec<String> {
    let mut notes = Vec::new();
    for row in results {
        let name = text(row, "instrument_name");
        let breakdown = row.get("breakdown").unwrap_or(&Value::Null);
        if let Some(rate) = optional_number(breakdown, "effective_base_rate") {
            notes.push(format!(
                "  {name}: base rate {} from a balance of {}",
                format_rate(rate),
                format_amount(number(breakdown, "applied_balance"))
            ));
        }
        if let Some(second_year) = optional_number(row, "second_year_return") {
            notes.push(format!(
                "  {name}: annual fee waived from year two, net return then {}",
                format_amount(second_year)
            ));
        }
    }
    notes
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::render_rank;

    #[test]
    fn rank_renders_table_and_tier_notes() {
        let data = json!({
            "catalog": { "kind": "bundled" },
            "total_instruments": 10,
            "profile": {
                "total": 1_000_000.0,
                "categorized_total": 0.0,
                "uncategorized_total": 1_000_000.0,
                "balances": { "deposit_balance": 10_000_000.0 }
            },
            "results": [
                {
                    "rank": 1,
                    "instrument_name": "Deposit Platinum Debit",
                    "issuer": "Harbor Bank",
                    "total_points": 25_000.0,
                    "net_return": 25_000.0,
                    "effective_rate": 2.5,
                    "breakdown": { "effective_base_rate": 2.5, "applied_balance": 10_000_000.0 }
                },
                {
                    "rank": 2,
                    "instrument_name": "Flat One",
                    "issuer": "North Card",
                    "total_points": 10_000.0,
                    "net_return": 10_000.0,
                    "effective_rate": 1.0,
                    "breakdown": {}
                }
            ]
        });

        let rendered = render_rank(&data);
        assert!(rendered.is_ok());
        if let Ok(text) = rendered {
            assert!(text.starts_with(
                "Top 2 of 10 instruments for 1,000,000 annual spend (bundled demo catalog)"
            ));
            assert!(text.contains("Balances:"));
            assert!(text.contains("deposit_balance=10,000,000"));
            assert!(text.contains("Net return"));
            assert!(text.contains("25,000"));
            assert!(text.contains("2.50%"));
            assert!(text.contains("Deposit Platinum Debit: base rate 2.50% from a balance of 10,000,000"));
            assert!(!text.contains("Flat One: base rate"));
        }
    }

    #[test]
    fn rank_requires_profile() {
        assert!(render_rank(&json!({ "results": [] })).is_err());
    }
}
