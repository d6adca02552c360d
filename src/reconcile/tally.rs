use std::collections::BTreeMap;

use crate::store::models::InventoryItem;

use super::classify::{Classification, ScanResult};

/// Count matched results per asset id. Every task line item gets an entry,
/// zero when nothing matched for it. Counts are deliberately not capped at
/// the line item's required quantity; comparing the two is the caller's
/// display concern.
pub fn tally(results: &[ScanResult], items: &[InventoryItem]) -> BTreeMap<String, u32> {
    let mut counts: BTreeMap<String, u32> = items
        .iter()
        .map(|item| (item.asset_id.clone(), 0))
        .collect();

    for result in results {
        if let Classification::Matched { asset } = &result.classification {
            *counts.entry(asset.asset_id.clone()).or_insert(0) += 1;
        }
    }

    counts
}
