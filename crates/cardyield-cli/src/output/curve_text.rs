use std::io;

use serde_json::Value;

use super::fields::{number, optional_number, rows, text};
use super::format::{
    Align, Column, format_amount, format_rate, render_table_or_blocks, terminal_width,
};

pub fn render_curve(data: &Value) -> io::Result<String> {
    let points = rows(data, "points");
    if points.is_empty() {
        return Err(io::Error::other("curve output requires `points`"));
    }

    let mut lines = vec![format!(
        "Effective rate for {} ({}) from {} to {} in steps of {}",
        text(data, "instrument_name"),
        text(data, "instrument_id"),
        format_amount(number(&points[0], "amount")),
        format_amount(number(data, "max_amount")),
        format_amount(number(data, "step"))
    )];
    if let Some(balance) = optional_number(data, "balance") {
        lines.push(format!("Balance: {}", format_amount(balance)));
    }
    lines.push(String::new());

    let series = rows(data, "balance_series");
    let headers = series
        .iter()
        .map(|entry| format!("bal {}", format_amount(number(entry, "balance"))))
        .collect::<Vec<String>>();
    let mut columns = vec![Column {
        name: "Spend",
        align: Align::Right,
    }];
    if series.is_empty() {
        columns.push(Column {
            name: "Rate",
            align: Align::Right,
        });
    } else {
        columns.extend(headers.iter().map(|name| Column {
            name: name.as_str(),
            align: Align::Right,
        }));
    }

    let table_rows = points
        .iter()
        .enumerate()
        .map(|(index, point)| {
            let mut row = vec![format_amount(number(point, "amount"))];
            if series.is_empty() {
                row.push(format_rate(number(point, "effective_rate")));
            } else {
                for entry in series {
                    let rate = rows(entry, "points")
                        .get(index)
                        .map(|value| number(value, "effective_rate"))
                        .unwrap_or(0.0);
                    row.push(format_rate(rate));
                }
            }
            row
        })
        .collect::<Vec<Vec<String>>>();

    lines.extend(render_table_or_blocks(
        &columns,
        &table_rows,
        terminal_width(),
        "Point",
    ));

    Ok(lines.join("\n"))
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::render_curve;

    #[test]
    fn single_balance_curve_has_one_rate_column() {
        let data = json!({
            "instrument_id": "flat-one",
            "instrument_name": "Flat One",
            "balance": 5_000_000.0,
            "max_amount": 1_000_000.0,
            "step": 500_000.0,
            "points": [
                { "amount": 0.0, "effective_rate": 0.0 },
                { "amount": 500_000.0, "effective_rate": 1.0 },
                { "amount": 1_000_000.0, "effective_rate": 1.0 }
            ],
            "balance_series": []
        });

        let rendered = render_curve(&data);
        assert!(rendered.is_ok());
        if let Ok(text) = rendered {
            assert!(text.starts_with(
                "Effective rate for Flat One (flat-one) from 0 to 1,000,000 in steps of 500,000"
            ));
            assert!(text.contains("Balance: 5,000,000"));
            assert!(text.contains("1.00%"));
        }
    }

    #[test]
    fn tier_series_become_columns() {
        let data = json!({
            "instrument_id": "step-up-card",
            "instrument_name": "Step Up Card",
            "max_amount": 500_000.0,
            "step": 500_000.0,
            "points": [
                { "amount": 0.0, "effective_rate": 0.0 },
                { "amount": 500_000.0, "effective_rate": 0.5 }
            ],
            "balance_series": [
                { "balance": 0.0, "base_rate": 0.5, "points": [
                    { "amount": 0.0, "effective_rate": 0.0 },
                    { "amount": 500_000.0, "effective_rate": 0.5 }
                ]},
                { "balance": 3_000_000.0, "base_rate": 1.0, "points": [
                    { "amount": 0.0, "effective_rate": 0.0 },
                    { "amount": 500_000.0, "effective_rate": 1.0 }
                ]}
            ]
        });

        let rendered = render_curve(&data);
        assert!(rendered.is_ok());
        if let Ok(text) = rendered {
            assert!(text.contains("bal 3,000,000"));
            assert!(text.contains("0.50%"));
            assert!(text.contains("1.00%"));
        }
    }

    #[test]
    fn empty_curve_is_rejected() {
        assert!(render_curve(&json!({ "points": [] })).is_err());
    }
}
