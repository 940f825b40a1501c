use std::io;

use cardyield_client::{ClientError, SuccessEnvelope};
use serde::Serialize;
use serde_json::json;

/// Success output keeps the client envelope as-is so `command` and `version`
/// stay machine readable.
pub fn render_success_json(success: &SuccessEnvelope) -> io::Result<String> {
    serialize_json_pretty(success)
}

pub fn render_error_json(error: &ClientError) -> io::Result<String> {
    let mut payload = json!({
        "error": {
            "code": error.code,
            "message": error.message,
            "recovery_steps": error.recovery_steps,
        }
    });
    if let Some(data) = &error.data {
        payload["error"]["data"] = data.clone();
    }
    serialize_json_pretty(&payload)
}

fn serialize_json_pretty<T>(value: &T) -> io::Result<String>
where
    T: Serialize,
{
    serde_json::to_string_pretty(value).map_err(io::Error::other)
}

#[cfg(test)]
mod tests {
    use cardyield_client::{ClientError, SuccessEnvelope};
    use serde_json::{Value, json};

    use super::{render_error_json, render_success_json};

    #[test]
    fn success_json_keeps_envelope_fields() {
        let payload = SuccessEnvelope {
            ok: true,
            command: "rank".to_string(),
            version: "0.1.0".to_string(),
            data: json!({ "results": [] }),
        };

        let rendered = render_success_json(&payload);
        assert!(rendered.is_ok());
        if let Ok(text) = rendered {
            let parsed: Result<Value, _> = serde_json::from_str(&text);
            assert!(parsed.is_ok());
            if let Ok(value) = parsed {
                assert_eq!(value["ok"], Value::Bool(true));
                assert_eq!(value["command"], Value::String("rank".to_string()));
                assert!(value["data"]["results"].is_array());
            }
        }
    }

    #[test]
    fn runtime_error_json_uses_universal_shape() {
        let error = ClientError::spending_validation_failed(vec![
            "total must be ≥ 1".to_string(),
        ]);
        let rendered = render_error_json(&error);
        assert!(rendered.is_ok());
        if let Ok(text) = rendered {
            let parsed: Result<Value, _> = serde_json::from_str(&text);
            assert!(parsed.is_ok());
            if let Ok(value) = parsed {
                assert_eq!(
                    value["error"]["code"],
                    Value::String("spending_validation_failed".to_string())
                );
                assert!(value["error"]["recovery_steps"].is_array());
                assert!(value.get("ok").is_none());
            }
        }
    }
}
