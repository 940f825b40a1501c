use std::io;

use serde_json::Value;

use super::fields::{catalog_label, number, optional_number, require, rows, text};
use super::format::{
    Align, Column, format_amount, format_points, format_rate, key_value_rows,
    render_table_or_blocks, terminal_width,
};

const CARD_COLUMNS: [Column<'static>; 5] = [
    Column {
        name: "Id",
        align: Align::Left,
    },
    Column {
        name: "Name",
        align: Align::Left,
    },
    Column {
        name: "Issuer",
        align: Align::Left,
    },
    Column {
        name: "Fee",
        align: Align::Right,
    },
    Column {
        name: "Base",
        align: Align::Right,
    },
];

pub fn render_cards_list(data: &Value) -> io::Result<String> {
    let cards = rows(data, "cards");
    let total = data
        .get("total_instruments")
        .and_then(Value::as_u64)
        .unwrap_or(0);

    let mut filters = Vec::new();
    if let Some(issuer) = data.get("issuer").and_then(Value::as_str) {
        filters.push(format!("issuer {issuer}"));
    }
    if let Some(max_fee) = optional_number(data, "max_fee") {
        filters.push(format!("annual fee at most {}", format_amount(max_fee)));
    }

    let mut header = format!(
        "{} of {total} instruments in the {}",
        cards.len(),
        catalog_label(data)
    );
    if !filters.is_empty() {
        header.push_str(&format!(" ({})", filters.join(", ")));
    }

    let mut lines = vec![header, String::new()];
    if cards.is_empty() {
        lines.push("  No instruments match these filters.".to_string());
        return Ok(lines.join("\n"));
    }

    let table_rows = cards
        .iter()
        .map(|card| {
            let mut base = format_rate(number(card, "base_rate"));
            if card.get("tiered").and_then(Value::as_bool).unwrap_or(false) {
                base.push_str(" (tiered)");
            }
            vec![
                text(card, "id").to_string(),
                text(card, "name").to_string(),
                text(card, "issuer").to_string(),
                format_amount(number(card, "annual_fee")),
                base,
            ]
        })
        .collect::<Vec<Vec<String>>>();
    lines.extend(render_table_or_blocks(
        &CARD_COLUMNS,
        &table_rows,
        terminal_width(),
        "Card",
    ));

    Ok(lines.join("\n"))
}

pub fn render_card_show(data: &Value) -> io::Result<String> {
    let instrument = require(data, "instrument", "cards show")?;

    let mut lines = vec![
        format!("{} ({})", text(instrument, "name"), text(instrument, "id")),
        String::new(),
    ];

    let mut entries = vec![
        ("Issuer:", text(instrument, "issuer").to_string()),
        ("Annual fee:", format_amount(number(instrument, "annual_fee"))),
        ("Base rate:", format_rate(number(instrument, "base_rate"))),
        (
            "Point value:",
            format!(
                "{}",
                optional_number(instrument, "point_value").unwrap_or(1.0)
            ),
        ),
    ];
    if let Some(conditions) = instrument
        .get("annual_fee_conditions")
        .and_then(Value::as_str)
    {
        entries.push(("Fee conditions:", conditions.to_string()));
    }
    if let Some(group) = instrument.get("exclusive_group").and_then(Value::as_str) {
        entries.push(("Exclusive group:", group.to_string()));
    }
    lines.extend(key_value_rows(&entries, 2));

    let bonuses = rows(instrument, "bonus_rates");
    if !bonuses.is_empty() {
        lines.push(String::new());
        lines.push("Bonus categories:".to_string());
        for bonus in bonuses {
            lines.push(format!(
                "  {} ({}): {}",
                text(bonus, "category_name"),
                text(bonus, "category"),
                format_rate(number(bonus, "rate"))
            ));
        }
    }

    if let Some(tiered) = instrument.get("tiered_rate") {
        lines.push(String::new());
        lines.push(format!(
            "Base rate by `{}`:",
            text(tiered, "parameter")
        ));
        for tier in rows(tiered, "tiers") {
            lines.push(format!(
                "  from {}: {}",
                format_amount(number(tier, "min_balance")),
                format_rate(number(tier, "rate"))
            ));
        }
    }

    let specials = rows(instrument, "special_bonuses");
    if !specials.is_empty() {
        lines.push(String::new());
        lines.push("Special bonuses:".to_string());
        for special in specials {
            lines.push(format!("  {}", special_bonus_line(special)));
        }
    }

    if let Some(waiver) = instrument.get("fee_waiver") {
        lines.push(String::new());
        lines.push(format!(
            "Annual fee waived from year {} once yearly spend reaches {}.",
            waiver
                .get("applies_from_year")
                .and_then(Value::as_u64)
                .unwrap_or(2),
            format_amount(number(waiver, "spend_threshold"))
        ));
    }

    let thresholds = rows(data, "thresholds")
        .iter()
        .filter_map(Value::as_f64)
        .map(format_amount)
        .collect::<Vec<String>>();
    if !thresholds.is_empty() {
        lines.push(String::new());
        lines.push(format!("Spend thresholds: {}", thresholds.join(", ")));
    }

    Ok(lines.join("\n"))
}

fn special_bonus_line(special: &Value) -> String {
    let bonus = format_points(number(special, "bonus"));
    let described = special
        .get("description")
        .and_then(Value::as_str)
        .map(|description| format!(" ({description})"))
        .unwrap_or_default();
    match text(special, "type") {
        "annual_usage" => format!(
            "{bonus} points once annual spend reaches {}{described}",
            format_amount(number(special, "threshold"))
        ),
        "fixed" => {
            if special
                .get("captured_elsewhere")
                .and_then(Value::as_bool)
                .unwrap_or(false)
            {
                format!("{bonus} points, already counted in the rate{described}")
            } else {
                format!("{bonus} points every year{described}")
            }
        }
        "annual_fee_waiver" => format!("annual fee waiver{described}"),
        other => format!("{other}: {bonus}{described}"),
    }
}
