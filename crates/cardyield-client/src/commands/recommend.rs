use std::path::Path;

use tracing::info;

use crate::ClientResult;
use crate::catalog::Catalog;
use crate::commands::common::{
    ProfileOverrides, allocation_row, calculation_row, load_profile, profile_summary,
};
use crate::contracts::envelope::{SuccessEnvelope, success};
use crate::contracts::types::{RankedRow, RecommendData, SpendingSource};
use crate::engine::merge::{DEFAULT_MERGE_LIMIT, RankedItem, merge_results};
use crate::engine::optimizer::recommend;
use crate::engine::policy::OPTIMIZER_POLICY_VERSION;
use crate::engine::ranking::rank_all;
use crate::profile::SpendingProfile;
use crate::setup::{CatalogSource, resolve_catalog};

#[derive(Debug, Default)]
pub struct RecommendOptions<'a> {
    pub path: Option<String>,
    /// Search combinations even when the profile does not ask for it.
    pub force_multi_card: bool,
    pub limit: Option<usize>,
    pub overrides: ProfileOverrides,
    pub catalog_path: Option<&'a Path>,
    pub home_override: Option<&'a Path>,
    pub stdin_override: Option<String>,
}

pub fn run(path: Option<String>) -> ClientResult<SuccessEnvelope> {
    run_with_options(RecommendOptions {
        path,
        force_multi_card: true,
        ..RecommendOptions::default()
    })
}

#[doc(hidden)]
pub fn run_with_options(options: RecommendOptions<'_>) -> ClientResult<SuccessEnvelope> {
    let loaded = load_profile(
        "recommend",
        options.path.as_deref(),
        options.stdin_override,
        &options.overrides,
    )?;
    let context = resolve_catalog(options.catalog_path, options.home_override)?;
    let search_multi = options.force_multi_card || loaded.profile.additional_info.enable_multi_card;

    let data = build_recommendation(
        &context.catalog,
        &loaded.profile,
        search_multi,
        options.limit.unwrap_or(DEFAULT_MERGE_LIMIT),
        context.source,
        loaded.source,
    );

    success("recommend", data)
}

pub(crate) fn build_recommendation(
    catalog: &Catalog,
    profile: &SpendingProfile,
    search_multi: bool,
    limit: usize,
    catalog_source: CatalogSource,
    spending_source: SpendingSource,
) -> RecommendData {
    let singles = rank_all(catalog, profile);
    let multis = if search_multi {
        recommend(catalog, profile)
    } else {
        Vec::new()
    };
    info!(
        singles = singles.len(),
        multis = multis.len(),
        search_multi,
        "built recommendation"
    );

    let best_single = singles.first().map(|result| calculation_row(1, result));
    let recommendations = multis
        .iter()
        .map(|recommendation| allocation_row(recommendation, profile.total))
        .collect::<Vec<_>>();

    let mut single_rank = 0usize;
    let merged = merge_results(singles, multis, limit)
        .iter()
        .map(|item| match item {
            RankedItem::Single(result) => {
                single_rank += 1;
                RankedRow::Single(calculation_row(single_rank, result))
            }
            RankedItem::Multi(recommendation) => {
                RankedRow::Multi(allocation_row(recommendation, profile.total))
            }
        })
        .collect::<Vec<_>>();

    RecommendData {
        catalog: catalog_source,
        source: spending_source,
        profile: profile_summary(profile),
        policy_version: OPTIMIZER_POLICY_VERSION.to_string(),
        multi_card_searched: search_multi,
        best_single,
        recommendations,
        merged,
    }
}
