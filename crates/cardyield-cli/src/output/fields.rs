use std::io;

use serde_json::Value;

pub fn number(value: &Value, key: &str) -> f64 {
    value.get(key).and_then(Value::as_f64).unwrap_or(0.0)
}

pub fn optional_number(value: &Value, key: &str) -> Option<f64> {
    value.get(key).and_then(Value::as_f64)
}

pub fn text<'a>(value: &'a Value, key: &str) -> &'a str {
    value.get(key).and_then(Value::as_str).unwrap_or("")
}

pub fn rows<'a>(value: &'a Value, key: &str) -> &'a [Value] {
    value
        .get(key)
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or(&[])
}

pub fn require<'a>(value: &'a Value, key: &str, command: &str) -> io::Result<&'a Value> {
    value
        .get(key)
        .ok_or_else(|| io::Error::other(format!("{command} output requires `{key}`")))
}

/// `bundled demo catalog` or `catalog at <path>` for the catalog source block.
pub fn catalog_label(data: &Value) -> String {
    let catalog = data.get("catalog").unwrap_or(&Value::Null);
    match (text(catalog, "kind"), catalog.get("path").and_then(Value::as_str)) {
        ("bundled", _) => "bundled demo catalog".to_string(),
        (_, Some(path)) => format!("catalog at {path}"),
        (kind, None) => format!("{kind} catalog"),
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::{catalog_label, number, rows, text};

    #[test]
    fn missing_fields_fall_back_to_empty_values() {
        let value = json!({ "name": "flat-one" });
        assert!(number(&value, "net_return").abs() < f64::EPSILON);
        assert_eq!(text(&value, "issuer"), "");
        assert!(rows(&value, "results").is_empty());
    }

    #[test]
    fn catalog_label_names_the_source() {
        assert_eq!(
            catalog_label(&json!({ "catalog": { "kind": "bundled", "path": null } })),
            "bundled demo catalog"
        );
        assert_eq!(
            catalog_label(&json!({ "catalog": { "kind": "home", "path": "/h/catalog.json" } })),
            "catalog at /h/catalog.json"
        );
    }
}
