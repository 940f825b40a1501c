use crate::catalog::Catalog;
use crate::engine::calculator::calculate;
use crate::engine::types::CalculationResult;
use crate::profile::SpendingProfile;

pub const DEFAULT_TOP_N: usize = 3;

/// Every instrument, best net return first. Equal returns keep catalog order.
pub fn rank_all<'a>(catalog: &'a Catalog, profile: &SpendingProfile) -> Vec<CalculationResult<'a>> {
    let mut results = catalog
        .all()
        .iter()
        .map(|instrument| calculate(instrument, profile))
        .collect::<Vec<CalculationResult<'a>>>();
    results.sort_by(|left, right| right.net_return.total_cmp(&left.net_return));
    results
}

pub fn top_n<'a>(
    catalog: &'a Catalog,
    profile: &SpendingProfile,
    limit: usize,
) -> Vec<CalculationResult<'a>> {
    let mut ranked = rank_all(catalog, profile);
    ranked.truncate(limit);
    ranked
}
