use std::path::Path;

use tracing::info;

use crate::ClientResult;
use crate::commands::common::{ProfileOverrides, calculation_row, load_profile, profile_summary};
use crate::contracts::envelope::{SuccessEnvelope, success};
use crate::contracts::types::RankData;
use crate::engine::ranking::{DEFAULT_TOP_N, top_n};
use crate::setup::resolve_catalog;

#[derive(Debug, Default)]
pub struct RankOptions<'a> {
    pub path: Option<String>,
    pub top: Option<usize>,
    pub overrides: ProfileOverrides,
    pub catalog_path: Option<&'a Path>,
    pub home_override: Option<&'a Path>,
    pub stdin_override: Option<String>,
}

pub fn run(path: Option<String>, top: Option<usize>) -> ClientResult<SuccessEnvelope> {
    run_with_options(RankOptions {
        path,
        top,
        ..RankOptions::default()
    })
}

#[doc(hidden)]
pub fn run_with_options(options: RankOptions<'_>) -> ClientResult<SuccessEnvelope> {
    let loaded = load_profile(
        "rank",
        options.path.as_deref(),
        options.stdin_override,
        &options.overrides,
    )?;
    let context = resolve_catalog(options.catalog_path, options.home_override)?;
    let top = options.top.unwrap_or(DEFAULT_TOP_N);

    let results = top_n(&context.catalog, &loaded.profile, top)
        .iter()
        .enumerate()
        .map(|(index, result)| calculation_row(index + 1, result))
        .collect::<Vec<_>>();
    info!(
        instruments = context.catalog.len(),
        returned = results.len(),
        "ranked catalog"
    );

    let data = RankData {
        catalog: context.source,
        source: loaded.source,
        profile: profile_summary(&loaded.profile),
        total_instruments: context.catalog.len(),
        top,
        results,
    };

    success("rank", data)
}
