use std::fs;
use std::path::{Path, PathBuf};

use serde_json::{Value, json};
use tempfile::{Builder, TempDir};

pub fn temp_home_in_tmp(prefix: &str) -> std::io::Result<(TempDir, PathBuf)> {
    let dir = Builder::new().prefix(prefix).tempdir_in("/tmp")?;
    let home = dir.path().join("cardyield-home");
    fs::create_dir_all(&home)?;
    Ok((dir, home))
}

pub fn write_fixture(dir: &Path, name: &str, body: &str) -> std::io::Result<PathBuf> {
    let path = dir.join(name);
    fs::write(&path, body)?;
    Ok(path)
}

pub fn write_catalog(dir: &Path, name: &str, cards: &[Value]) -> std::io::Result<PathBuf> {
    let body = json!({ "cards": cards }).to_string();
    write_fixture(dir, name, &body)
}

pub fn card(id: &str, base_rate: f64, annual_fee: f64) -> Value {
    json!({
        "id": id,
        "name": id.to_uppercase(),
        "issuer": "Fixture Bank",
        "annual_fee": annual_fee,
        "base_rate": base_rate,
    })
}

pub fn with_bonus(mut card: Value, category: &str, rate: f64) -> Value {
    push(
        &mut card,
        "bonus_rates",
        json!({ "category": category, "category_name": category, "rate": rate }),
    );
    card
}

pub fn with_usage_bonus(mut card: Value, threshold: f64, bonus: f64) -> Value {
    push(
        &mut card,
        "special_bonuses",
        json!({ "type": "annual_usage", "threshold": threshold, "bonus": bonus }),
    );
    card
}

pub fn with_field(mut card: Value, key: &str, value: Value) -> Value {
    if let Some(object) = card.as_object_mut() {
        object.insert(key.to_string(), value);
    }
    card
}

pub fn spending_json(total: f64, breakdown: &[(&str, f64)]) -> String {
    let breakdown = breakdown
        .iter()
        .map(|(category, amount)| ((*category).to_string(), json!(amount)))
        .collect::<serde_json::Map<String, Value>>();
    json!({ "total": total, "breakdown": breakdown }).to_string()
}

pub fn array_len(data: &Value, key: &str) -> usize {
    data.get(key)
        .and_then(Value::as_array)
        .map(Vec::len)
        .unwrap_or_default()
}

fn push(card: &mut Value, key: &str, entry: Value) {
    if let Some(object) = card.as_object_mut() {
        let list = object.entry(key.to_string()).or_insert_with(|| json!([]));
        if let Some(items) = list.as_array_mut() {
            items.push(entry);
        }
    }
}
