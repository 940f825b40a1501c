use crate::ClientResult;
use crate::catalog::Catalog;
use crate::commands::recommend::build_recommendation;
use crate::contracts::envelope::{SuccessEnvelope, success};
use crate::contracts::types::SpendingSource;
use crate::engine::merge::DEFAULT_MERGE_LIMIT;
use crate::profile::SpendingProfile;
use crate::setup::{CatalogSource, CatalogSourceKind};

/// Annual spend used by `cardyield demo`.
pub fn sample_profile() -> SpendingProfile {
    SpendingProfile::new(2_400_000.0)
        .with_category("seven_eleven", 180_000.0)
        .with_category("restaurant", 120_000.0)
        .with_category("rakuten", 300_000.0)
        .with_category("amazon", 240_000.0)
        .with_category("travel", 150_000.0)
        .with_balance("deposit_balance", 3_000_000.0)
}

pub fn run() -> ClientResult<SuccessEnvelope> {
    let catalog = Catalog::bundled_demo()?;
    let profile = sample_profile();

    let data = build_recommendation(
        &catalog,
        &profile,
        true,
        DEFAULT_MERGE_LIMIT,
        CatalogSource {
            kind: CatalogSourceKind::Bundled,
            path: None,
        },
        SpendingSource {
            kind: "sample".to_string(),
            reference: None,
        },
    );

    success("demo", data)
}
