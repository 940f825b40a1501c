mod cli;
mod dispatch;
mod output;
mod stdout_io;

use std::process::ExitCode;

use cardyield_client::ClientError;
use clap::{Parser, error::ErrorKind};
use stdout_io::write_stdout_text;
use tracing_subscriber::EnvFilter;

const LOG_ENV_VAR: &str = "CARDYIELD_LOG";

const ROOT_HELP: &str = "cardyield - reward card yield calculator

Usage:
  cardyield <command>

Start here:
  cardyield demo
  cardyield validate --help
  cardyield rank <spending-file>
";

const TOP_LEVEL_HELP: &str = "cardyield - reward card yield calculator and allocation optimizer

USAGE: cardyield <command>

Try it:
  cardyield demo                                          Recommend cards for a bundled sample profile

Check your spending profile:
  cardyield validate --help                               Read the JSON and CSV spending formats
  cardyield validate <path>                               Validate a profile without calculating

Compare cards:
  cardyield rank <path>                                   Rank every card by net annual return
  cardyield recommend <path>                              Search two- and three-card allocations
  cardyield curve <card-id>                               Effective rate across annual spend

Browse the catalog:
  cardyield cards list                                    List cards (filter with --issuer, --max-fee)
  cardyield cards show <card-id>                          Show one card's rates, bonuses, and thresholds

Catalog lookup order: --catalog <path>, then $CARDYIELD_HOME/catalog.json,
then the bundled demo catalog. Add --json to any command for machine output.
Set CARDYIELD_LOG=debug to trace catalog resolution and the allocation search.
";

fn main() -> ExitCode {
    init_tracing();
    match run() {
        Ok(code) => code,
        Err(code) => code,
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_env(LOG_ENV_VAR).unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

fn run() -> Result<ExitCode, ExitCode> {
    let raw_args = std::env::args().collect::<Vec<String>>();
    if raw_args.len() == 1 {
        if write_stdout_text(ROOT_HELP).is_err() {
            return Err(ExitCode::from(2));
        }
        return Ok(ExitCode::SUCCESS);
    }
    let parsed = cli::Cli::try_parse();
    let cli = match parsed {
        Ok(value) => value,
        Err(err) => {
            if matches!(
                err.kind(),
                ErrorKind::DisplayHelp
                    | ErrorKind::DisplayVersion
                    | ErrorKind::DisplayHelpOnMissingArgumentOrSubcommand
            ) {
                let body = if is_top_level_help_request(&raw_args) {
                    TOP_LEVEL_HELP.to_string()
                } else {
                    err.to_string()
                };
                if write_stdout_text(&body).is_err() {
                    return Err(ExitCode::from(2));
                }
                return Ok(ExitCode::SUCCESS);
            }
            let command_hint = if matches!(
                err.kind(),
                ErrorKind::MissingRequiredArgument
                    | ErrorKind::InvalidValue
                    | ErrorKind::ValueValidation
                    | ErrorKind::WrongNumberOfValues
                    | ErrorKind::UnknownArgument
                    | ErrorKind::InvalidSubcommand
            ) {
                command_path_from_args(&raw_args)
            } else {
                None
            };
            let clean_message = strip_clap_boilerplate(&err.to_string());
            let parse_error =
                parse_error_with_command_hint(&clean_message, command_hint.as_deref());
            let mode = infer_requested_output_mode(&raw_args);
            if output::print_failure(&parse_error, mode).is_err() {
                return Err(ExitCode::from(2));
            }
            return Err(ExitCode::from(1));
        }
    };
    let mode = output::mode_for_command(&cli.command);

    let dispatched = dispatch::dispatch(&cli);
    match dispatched {
        Ok(success) => {
            if output::print_success(&success, mode).is_err() {
                return Err(ExitCode::from(2));
            }
            Ok(ExitCode::SUCCESS)
        }
        Err(error) => {
            if output::print_failure(&error, mode).is_err() {
                return Err(ExitCode::from(2));
            }
            Err(exit_code_for_error(&error))
        }
    }
}

fn is_top_level_help_request(raw_args: &[String]) -> bool {
    raw_args.len() == 2 && matches!(raw_args[1].as_str(), "--help" | "-h")
}

/// Drops clap's trailing usage and "For more information" lines; recovery
/// steps carry the guidance instead.
fn strip_clap_boilerplate(message: &str) -> String {
    let end = message
        .find("\n\nUsage:")
        .or_else(|| message.find("\nFor more information"))
        .unwrap_or(message.len());
    message[..end].trim_end().to_string()
}

/// Maps the leading positional words to a known command path for help hints.
fn command_path_from_args(raw_args: &[String]) -> Option<String> {
    let words: Vec<&str> = raw_args
        .iter()
        .skip(1)
        .filter(|value| !value.starts_with('-'))
        .map(String::as_str)
        .collect();

    let hint = match words.as_slice() {
        ["cards", "list", ..] => "cards list",
        ["cards", "show", ..] => "cards show",
        ["cards", ..] => "cards",
        ["rank", ..] => "rank",
        ["recommend", ..] => "recommend",
        ["validate", ..] => "validate",
        ["curve", ..] => "curve",
        ["demo", ..] => "demo",
        _ => return None,
    };
    Some(hint.to_string())
}

fn parse_error_with_command_hint(clean_message: &str, command_hint: Option<&str>) -> ClientError {
    if matches!(command_hint, Some("rank" | "recommend"))
        && (clean_message.contains("--balance") || clean_message.contains("--point-value"))
    {
        return ClientError::invalid_argument_with_recovery(
            clean_message,
            vec![
                "Pass overrides as NAME=VALUE, e.g. `--balance deposit_balance=3000000`."
                    .to_string(),
                "Repeat the flag once per balance or card.".to_string(),
            ],
        );
    }

    ClientError::invalid_argument_for_command(clean_message, command_hint)
}

fn exit_code_for_error(error: &ClientError) -> ExitCode {
    if is_internal_error(error) {
        ExitCode::from(2)
    } else {
        ExitCode::from(1)
    }
}

fn infer_requested_output_mode(raw_args: &[String]) -> output::OutputMode {
    if raw_args.iter().skip(1).any(|value| value == "--json") {
        return output::OutputMode::Json;
    }
    output::OutputMode::Text
}

fn is_internal_error(error: &ClientError) -> bool {
    error.code.starts_with("internal_")
}

#[cfg(test)]
mod tests {
    use super::{command_path_from_args, parse_error_with_command_hint, strip_clap_boilerplate};

    fn args(values: &[&str]) -> Vec<String> {
        values.iter().map(|value| value.to_string()).collect()
    }

    #[test]
    fn command_path_ignores_flags_and_values_after_the_command() {
        assert_eq!(
            command_path_from_args(&args(&["cardyield", "cards", "show", "flat-one", "--json"])),
            Some("cards show".to_string())
        );
        assert_eq!(
            command_path_from_args(&args(&["cardyield", "--json", "rank", "spend.json"])),
            Some("rank".to_string())
        );
        assert_eq!(command_path_from_args(&args(&["cardyield", "dash"])), None);
    }

    #[test]
    fn clap_boilerplate_is_removed() {
        let cleaned = strip_clap_boilerplate(
            "error: unexpected argument '--nope' found\n\nUsage: cardyield rank [SPENDING]\n\nFor more information, try '--help'.\n",
        );
        assert_eq!(cleaned, "error: unexpected argument '--nope' found");
    }

    #[test]
    fn malformed_override_gets_format_guidance() {
        let error = parse_error_with_command_hint(
            "error: invalid value 'x' for '--balance <NAME=VALUE>': expected NAME=VALUE",
            Some("rank"),
        );
        assert_eq!(error.code, "invalid_argument");
        assert!(error.recovery_steps[0].contains("NAME=VALUE"));
    }
}
