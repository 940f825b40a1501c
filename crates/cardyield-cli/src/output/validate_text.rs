use std::io;

use serde_json::Value;

use super::fields::{require, rows, text};
use super::rank_text::profile_lines;

pub fn render_validate(data: &Value) -> io::Result<String> {
    let profile = require(data, "profile", "validate")?;
    let source = data.get("source").unwrap_or(&Value::Null);
    let origin = match source.get("reference").and_then(Value::as_str) {
        Some(path) => path.to_string(),
        None => text(source, "kind").to_string(),
    };

    let mut lines = vec![
        format!("Spending profile from {origin} is valid."),
        String::new(),
    ];
    lines.extend(profile_lines(profile));

    let unknown = rows(data, "unknown_categories")
        .iter()
        .filter_map(Value::as_str)
        .collect::<Vec<&str>>();
    if !unknown.is_empty() {
        lines.push(String::new());
        lines.push(format!(
            "Categories outside the known list: {}",
            unknown.join(", ")
        ));
        lines.push("  These amounts still earn each card's base rate.".to_string());
    }

    Ok(lines.join("\n"))
}
