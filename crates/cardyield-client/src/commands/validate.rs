use crate::ClientResult;
use crate::commands::common::{ProfileOverrides, load_profile, profile_summary};
use crate::contracts::envelope::{SuccessEnvelope, success};
use crate::contracts::types::ValidateData;
use crate::profile::category_label;

#[derive(Debug, Default)]
pub struct ValidateOptions {
    pub path: Option<String>,
    pub stdin_override: Option<String>,
}

pub fn run(path: Option<String>) -> ClientResult<SuccessEnvelope> {
    run_with_options(ValidateOptions {
        path,
        stdin_override: None,
    })
}

#[doc(hidden)]
pub fn run_with_options(options: ValidateOptions) -> ClientResult<SuccessEnvelope> {
    let loaded = load_profile(
        "validate",
        options.path.as_deref(),
        options.stdin_override,
        &ProfileOverrides::default(),
    )?;

    let unknown_categories = loaded
        .profile
        .breakdown
        .keys()
        .filter(|category| category_label(category).is_none())
        .cloned()
        .collect();

    let data = ValidateData {
        valid: true,
        source: loaded.source,
        profile: profile_summary(&loaded.profile),
        unknown_categories,
    };

    success("validate", data)
}
