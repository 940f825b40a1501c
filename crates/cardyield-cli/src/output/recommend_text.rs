use std::io;

use serde_json::Value;

use super::fields::{catalog_label, number, optional_number, require, rows, text};
use super::format::{
    Align, Column, format_amount, format_rate, render_table_or_blocks, terminal_width,
};
use super::rank_text::profile_lines;

const MERGED_COLUMNS: [Column<'static>; 5] = [
    Column {
        name: "#",
        align: Align::Right,
    },
    Column {
        name: "Kind",
        align: Align::Left,
    },
    Column {
        name: "Cards",
        align: Align::Left,
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

pub fn render_recommend(data: &Value) -> io::Result<String> {
    let profile = require(data, "profile", "recommend")?;

    let mut lines = vec![
        format!(
            "Recommendation for {} annual spend ({})",
            format_amount(number(profile, "total")),
            catalog_label(data)
        ),
        String::new(),
    ];
    lines.extend(profile_lines(profile));
    lines.push(String::new());

    match data.get("best_single") {
        Some(best) if !best.is_null() => lines.push(format!(
            "Best single card: {} ({}), net return {} at {}",
            text(best, "instrument_name"),
            text(best, "issuer"),
            format_amount(number(best, "net_return")),
            format_rate(number(best, "effective_rate"))
        )),
        _ => lines.push("Best single card: none, the catalog is empty".to_string()),
    }
    lines.push(String::new());

    let searched = data
        .get("multi_card_searched")
        .and_then(Value::as_bool)
        .unwrap_or(false);
    let recommendations = rows(data, "recommendations");
    if !searched {
        lines.push("Card combinations were not searched.".to_string());
        lines.push(
            "  Drop `--single-only` or set `enable_multi_card` in the profile to search them."
                .to_string(),
        );
    } else if recommendations.is_empty() {
        lines.push("No card combination beats the best single card.".to_string());
    } else {
        lines.push("Card combinations:".to_string());
        for (index, recommendation) in recommendations.iter().enumerate() {
            lines.push(String::new());
            lines.extend(allocation_lines(index + 1, recommendation));
        }
    }

    let merged = rows(data, "merged");
    if !merged.is_empty() {
        lines.push(String::new());
        lines.push("Overall ranking:".to_string());
        lines.extend(merged_table(merged));
    }

    Ok(lines.join("\n"))
}

fn allocation_lines(position: usize, recommendation: &Value) -> Vec<String> {
    let mut lines = vec![format!(
        "  {position}. Net return {} at {} (+{} over the best single card)",
        format_amount(number(recommendation, "total_net_return")),
        format_rate(number(recommendation, "total_effective_rate")),
        format_amount(number(recommendation, "improvement"))
    )];

    for entry in rows(recommendation, "entries") {
        lines.push(format!(
            "     {}: {} allocated, net return {}",
            text(entry, "instrument_name"),
            format_amount(number(entry, "allocated_amount")),
            format_amount(number(entry, "net_return"))
        ));

        let categories = entry
            .get("category_allocations")
            .and_then(Value::as_object)
            .map(|allocations| {
                allocations
                    .iter()
                    .map(|(category, amount)| {
                        format!("{category} {}", format_amount(amount.as_f64().unwrap_or(0.0)))
                    })
                    .collect::<Vec<String>>()
            })
            .unwrap_or_default();
        if !categories.is_empty() {
            lines.push(format!("       categories: {}", categories.join(", ")));
        }
        let uncategorized = number(entry, "uncategorized_share");
        if uncategorized > 0.0 {
            lines.push(format!(
                "       other spend: {}",
                format_amount(uncategorized)
            ));
        }
    }

    if let Some(second_year) = recommendation.get("second_year")
        && let Some(net) = optional_number(second_year, "total_net_return")
    {
        lines.push(format!(
            "     From year two, with annual fees waived: net return {} at {}",
            format_amount(net),
            format_rate(number(second_year, "total_effective_rate"))
        ));
    }

    lines
}

fn merged_table(merged: &[Value]) -> Vec<String> {
    let table_rows = merged
        .iter()
        .enumerate()
        .map(|(index, row)| {
            let is_multi = text(row, "kind") == "multi";
            let (cards, net, rate) = if is_multi {
                (
                    rows(row, "entries")
                        .iter()
                        .map(|entry| text(entry, "instrument_name").to_string())
                        .collect::<Vec<String>>()
                        .join(" + "),
                    number(row, "total_net_return"),
                    number(row, "total_effective_rate"),
                )
            } else {
                (
                    text(row, "instrument_name").to_string(),
                    number(row, "net_return"),
                    number(row, "effective_rate"),
                )
            };
            vec![
                (index + 1).to_string(),
                if is_multi { "combo" } else { "single" }.to_string(),
                cards,
                format_amount(net),
                format_rate(rate),
            ]
        })
        .collect::<Vec<Vec<String>>>();

    render_table_or_blocks(&MERGED_COLUMNS, &table_rows, terminal_width(), "Option")
}
