use anyhow::Result;

use crate::events::{AppEvent, EventBus};
use crate::store::models::AssetDetails;
use crate::store::Store;

/// Asset lookup: resolve a discovered tag batch or a scanned barcode to full
/// asset details, and push mapping corrections back.
#[derive(Clone)]
pub struct LookupService {
    store: Store,
    events: EventBus,
}

impl LookupService {
    pub fn new(store: Store, events: EventBus) -> Self {
        Self { store, events }
    }

    /// Resolve each identifier in a discovered batch, keeping order and
    /// dropping duplicates and misses. An empty result means nothing in the
    /// batch is known, which is the not-found flow.
    pub async fn by_epcs(&self, epcs: &[String]) -> Vec<AssetDetails> {
        let mut found = self.store.lookup_by_epcs(epcs).await;
        let mut seen = std::collections::HashSet::new();
        found.retain(|asset| seen.insert(asset.epc.clone()));
        found
    }

    pub async fn by_barcode(&self, barcode: &str) -> Option<AssetDetails> {
        self.store.lookup_by_barcode(barcode).await
    }

    pub async fn update_mapping(&self, details: AssetDetails) -> Result<AssetDetails> {
        let saved = self.store.upsert_mapping(details).await?;
        self.events.publish(AppEvent::AssetMappingUpdated {
            epc: saved.epc.clone(),
        });
        Ok(saved)
    }
}
