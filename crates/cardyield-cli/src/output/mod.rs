mod cards_text;
mod curve_text;
mod demo_text;
mod error_text;
mod fields;
mod format;
mod json;
mod mode;
mod rank_text;
mod recommend_text;
mod validate_text;

use std::io;

use cardyield_client::{ClientError, SuccessEnvelope};

use crate::stdout_io::write_stdout_line;

pub use mode::{OutputMode, mode_for_command};

pub fn print_success(success: &SuccessEnvelope, mode: OutputMode) -> io::Result<()> {
    let body = match mode {
        OutputMode::Text => render_text_success(success)?,
        OutputMode::Json => json::render_success_json(success)?,
    };
    write_stdout_line(&body)
}

pub fn print_failure(error: &ClientError, mode: OutputMode) -> io::Result<()> {
    let body = match mode {
        OutputMode::Json => json::render_error_json(error)?,
        OutputMode::Text => error_text::render_error(error),
    };
    write_stdout_line(&body)
}

fn render_text_success(success: &SuccessEnvelope) -> io::Result<String> {
    match success.command.as_str() {
        "rank" => rank_text::render_rank(&success.data),
        "recommend" => recommend_text::render_recommend(&success.data),
        "demo" => demo_text::render_demo(&success.data),
        "validate" => validate_text::render_validate(&success.data),
        "cards list" => cards_text::render_cards_list(&success.data),
        "cards show" => cards_text::render_card_show(&success.data),
        "curve" => curve_text::render_curve(&success.data),
        _ => Err(io::Error::other(format!(
            "unsupported text output command `{}`",
            success.command
        ))),
    }
}
