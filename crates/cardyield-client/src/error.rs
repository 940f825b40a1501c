use std::path::Path;

use serde_json::{Value, json};
use thiserror::Error;

pub(crate) const SPENDING_HELP_COMMAND: &str = "cardyield validate --help";

#[derive(Debug, Clone, Error)]
#[error("{message}")]
pub struct ClientError {
    pub code: String,
    pub message: String,
    pub recovery_steps: Vec<String>,
    pub data: Option<Value>,
}

impl ClientError {
    pub fn new(code: &str, message: &str, recovery_steps: Vec<String>) -> Self {
        Self {
            code: code.to_string(),
            message: message.to_string(),
            recovery_steps,
            data: None,
        }
    }

    pub fn with_data(mut self, data: Value) -> Self {
        self.data = Some(data);
        self
    }

    pub fn invalid_argument(message: &str) -> Self {
        Self::invalid_argument_for_command(message, None)
    }

    pub fn invalid_argument_for_command(message: &str, command: Option<&str>) -> Self {
        let help_hint = match command {
            Some(cmd) => format!("Run `cardyield {cmd} --help` for usage."),
            None => "Run `cardyield --help` for usage.".to_string(),
        };
        let error = Self::new("invalid_argument", message, vec![help_hint]);
        if let Some(cmd) = command {
            return error.with_data(json!({
                "command_hint": cmd,
            }));
        }
        error
    }

    pub fn invalid_argument_with_recovery(message: &str, recovery_steps: Vec<String>) -> Self {
        Self::new("invalid_argument", message, recovery_steps)
    }

    pub fn spending_invalid_format(message: &str, received_format: &str) -> Self {
        Self::new(
            "spending_invalid_format",
            message,
            vec![
                "Provide a JSON object with `total` and `breakdown`, or a CSV with a `category,amount` header."
                    .to_string(),
                format!("Run `{SPENDING_HELP_COMMAND}` to review the spending file layout."),
            ],
        )
        .with_data(json!({
            "received_format": received_format,
            "supported_formats": ["json_object", "csv"],
        }))
    }

    pub fn spending_validation_failed(errors: Vec<String>) -> Self {
        let count = errors.len();
        let noun = if count == 1 { "problem" } else { "problems" };
        Self::new(
            "spending_validation_failed",
            &format!("Spending profile failed validation: {count} {noun} must be fixed before calculating."),
            errors.clone(),
        )
        .with_data(json!({
            "errors": errors,
            "help_command": SPENDING_HELP_COMMAND,
        }))
    }

    pub fn catalog_unreadable(path: &Path, detail: &str) -> Self {
        let location = path.display().to_string();
        Self::new(
            "catalog_unreadable",
            &format!("Cannot read card catalog at `{location}`: {detail}"),
            vec![
                "Verify the catalog path exists and is readable.".to_string(),
                "Or omit `--catalog` to use the bundled demo catalog.".to_string(),
            ],
        )
        .with_data(json!({
            "path": location,
        }))
    }

    pub fn catalog_invalid(source: &str, detail: &str) -> Self {
        Self::new(
            "catalog_invalid",
            &format!("Card catalog from {source} is not valid JSON: {detail}"),
            vec![
                "The catalog must be a JSON object with a top-level `cards` array.".to_string(),
                "Run `cardyield cards list --catalog <path>` after fixing the file.".to_string(),
            ],
        )
        .with_data(json!({
            "source": source,
        }))
    }

    pub fn instrument_not_found(instrument_id: &str) -> Self {
        Self::new(
            "instrument_not_found",
            &format!("Card id `{instrument_id}` was not found in the catalog."),
            vec![
                "Run `cardyield cards list` to find a valid card id.".to_string(),
                "Retry with one of the listed ids.".to_string(),
            ],
        )
        .with_data(json!({
            "instrument_id": instrument_id,
        }))
    }

    pub fn home_unresolved(detail: &str) -> Self {
        Self::new(
            "internal_home_unresolved",
            &format!("Could not resolve the cardyield home directory: {detail}"),
            vec!["Set `CARDYIELD_HOME` to a readable directory.".to_string()],
        )
    }

    pub fn internal_serialization(message: &str) -> Self {
        Self::new("internal_serialization_error", message, Vec::new())
    }
}

pub type ClientResult<T> = Result<T, ClientError>;
