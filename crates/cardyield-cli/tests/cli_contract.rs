use std::fs;
use std::io::Write;
use std::path::Path;
use std::process::{Command, Stdio};

use serde_json::Value;
use tempfile::TempDir;

struct CliOutput {
    success: bool,
    code: Option<i32>,
    stdout: String,
}

fn temp_home() -> TempDir {
    let dir = tempfile::tempdir();
    assert!(dir.is_ok());
    match dir {
        Ok(value) => value,
        Err(error) => panic!("could not create temp home: {error}"),
    }
}

fn run_cli_in_home(home: &Path, args: &[&str], input: Option<&str>) -> CliOutput {
    let mut command = Command::new(env!("CARGO_BIN_EXE_cardyield"));
    command.args(args);
    command.env("CARDYIELD_HOME", home);
    command.env_remove("CARDYIELD_LOG");
    command.stdin(if input.is_some() {
        Stdio::piped()
    } else {
        Stdio::null()
    });
    command.stdout(Stdio::piped());
    command.stderr(Stdio::piped());

    let child_spawn = command.spawn();
    assert!(child_spawn.is_ok());
    if let Ok(mut child) = child_spawn {
        if let Some(body) = input
            && let Some(mut pipe) = child.stdin.take()
        {
            let write_result = pipe.write_all(body.as_bytes());
            assert!(write_result.is_ok());
        }

        let output = child.wait_with_output();
        assert!(output.is_ok());
        if let Ok(result) = output {
            return CliOutput {
                success: result.status.success(),
                code: result.status.code(),
                stdout: String::from_utf8_lossy(&result.stdout).to_string(),
            };
        }
    }

    CliOutput {
        success: false,
        code: None,
        stdout: String::new(),
    }
}

fn parse_json(body: &str) -> Value {
    let parsed = serde_json::from_str::<Value>(body);
    assert!(parsed.is_ok(), "not JSON: {body}");
    parsed.unwrap_or(Value::Null)
}

#[test]
fn root_command_prints_short_help() {
    let home = temp_home();
    let output = run_cli_in_home(home.path(), &[], None);
    assert!(output.success);
    assert!(output.stdout.starts_with("cardyield - reward card yield calculator"));
}

#[test]
fn top_level_help_lists_every_command() {
    let home = temp_home();
    let output = run_cli_in_home(home.path(), &["--help"], None);
    assert!(output.success);
    for command in ["demo", "validate", "rank", "recommend", "curve", "cards list", "cards show"] {
        assert!(
            output.stdout.contains(&format!("cardyield {command}")),
            "missing {command}"
        );
    }
}

#[test]
fn demo_json_returns_success_envelope() {
    let home = temp_home();
    let output = run_cli_in_home(home.path(), &["demo", "--json"], None);
    assert!(output.success);
    let payload = parse_json(&output.stdout);
    assert_eq!(payload["ok"], Value::Bool(true));
    assert_eq!(payload["command"], Value::from("demo"));
    assert_eq!(payload["data"]["catalog"]["kind"], Value::from("bundled"));
    assert!(payload["data"]["merged"].is_array());
}

#[test]
fn rank_reads_stdin_and_honors_top() {
    let home = temp_home();
    let output = run_cli_in_home(
        home.path(),
        &["rank", "-", "--top", "2", "--json"],
        Some("category,amount\ntotal,1200000\nlawson,150000\n"),
    );
    assert!(output.success);
    let payload = parse_json(&output.stdout);
    assert_eq!(payload["command"], Value::from("rank"));
    assert_eq!(
        payload["data"]["results"].as_array().map(Vec::len),
        Some(2)
    );
    assert_eq!(payload["data"]["source"]["kind"], Value::from("stdin"));
}

#[test]
fn csv_without_total_row_ranks_the_category_sum() {
    let home = temp_home();
    let output = run_cli_in_home(
        home.path(),
        &["rank", "-", "--json"],
        Some("category,amount\namazon,240000\nrakuten,300000\n"),
    );
    assert!(output.success);
    let payload = parse_json(&output.stdout);
    assert_eq!(payload["data"]["profile"]["total"], Value::from(540000.0));
}

#[test]
fn rank_text_output_uses_home_catalog() {
    let home = temp_home();
    let catalog = r#"{"cards": [
        {"id": "only-card", "name": "Only Card", "issuer": "Test Bank", "annual_fee": 0, "base_rate": 1.0}
    ]}"#;
    assert!(fs::write(home.path().join("catalog.json"), catalog).is_ok());
    let spending = home.path().join("spend.json");
    assert!(fs::write(&spending, r#"{"total": 1000000}"#).is_ok());

    let spending_arg = spending.display().to_string();
    let output = run_cli_in_home(home.path(), &["rank", &spending_arg], None);
    assert!(output.success);
    assert!(output.stdout.contains("Top 1 of 1 instruments for 1,000,000 annual spend"));
    assert!(output.stdout.contains("Only Card"));
    assert!(output.stdout.contains("10,000"));
}

#[test]
fn invalid_spending_exits_with_user_error() {
    let home = temp_home();
    let output = run_cli_in_home(
        home.path(),
        &["recommend", "-", "--json"],
        Some(r#"{"total": 0, "breakdown": {"amazon": -5}}"#),
    );
    assert!(!output.success);
    assert_eq!(output.code, Some(1));
    let payload = parse_json(&output.stdout);
    assert_eq!(
        payload["error"]["code"],
        Value::from("spending_validation_failed")
    );
    assert!(payload["error"]["recovery_steps"].is_array());
}

#[test]
fn invalid_spending_text_lists_problems() {
    let home = temp_home();
    let output = run_cli_in_home(
        home.path(),
        &["validate", "-"],
        Some(r#"{"total": 0}"#),
    );
    assert_eq!(output.code, Some(1));
    assert!(output.stdout.contains("  Error:    spending_validation_failed"));
    assert!(output.stdout.contains("Fix these problems in your spending profile:"));
}

#[test]
fn unknown_card_is_a_user_error() {
    let home = temp_home();
    let output = run_cli_in_home(home.path(), &["cards", "show", "no-such-card", "--json"], None);
    assert_eq!(output.code, Some(1));
    let payload = parse_json(&output.stdout);
    assert_eq!(payload["error"]["code"], Value::from("instrument_not_found"));
}

#[test]
fn malformed_override_is_reported_as_invalid_argument() {
    let home = temp_home();
    let output = run_cli_in_home(
        home.path(),
        &["rank", "-", "--balance", "deposit_balance", "--json"],
        Some(r#"{"total": 1000000}"#),
    );
    assert_eq!(output.code, Some(1));
    let payload = parse_json(&output.stdout);
    assert_eq!(payload["error"]["code"], Value::from("invalid_argument"));
}

#[test]
fn cards_list_and_curve_render_text() {
    let home = temp_home();
    let listed = run_cli_in_home(home.path(), &["cards", "list", "--max-fee", "0"], None);
    assert!(listed.success);
    assert!(listed.stdout.contains("annual fee at most 0"));

    let curve = run_cli_in_home(
        home.path(),
        &["curve", "flat-one", "--max", "1000000", "--step", "500000"],
        None,
    );
    assert!(curve.success);
    assert!(curve.stdout.contains("Effective rate for"));
    assert!(curve.stdout.contains("1,000,000"));
}
