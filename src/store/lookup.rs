//! Asset lookup by tag or barcode, and mapping maintenance.

use anyhow::{bail, Result};
use log::info;

use super::models::AssetDetails;
use super::Store;

impl Store {
    pub async fn lookup_by_epc(&self, epc: &str) -> Option<AssetDetails> {
        self.delay(self.latency().lookup).await;
        self.read().await.asset_details.get(epc).cloned()
    }

    pub async fn lookup_by_epcs(&self, epcs: &[String]) -> Vec<AssetDetails> {
        self.delay(self.latency().lookup).await;
        let tables = self.read().await;
        epcs.iter()
            .filter_map(|epc| tables.asset_details.get(epc).cloned())
            .collect()
    }

    pub async fn lookup_by_barcode(&self, barcode: &str) -> Option<AssetDetails> {
        self.delay(self.latency().lookup).await;
        let tables = self.read().await;
        let epc = tables.barcode_index.get(barcode)?;
        tables.asset_details.get(epc).cloned()
    }

    /// Create or correct the mapping for one tag. Keeps the barcode index
    /// and the master asset table in step with the detail record.
    pub async fn upsert_mapping(&self, details: AssetDetails) -> Result<AssetDetails> {
        self.delay(self.latency().submit).await;

        if details.asset_name.trim().is_empty() {
            bail!("asset name is required");
        }
        if details.epc.trim().is_empty() {
            bail!("tag identifier is required");
        }

        let mut tables = self.write().await;
        let previous_barcode = tables
            .asset_details
            .get(&details.epc)
            .map(|previous| previous.barcode.clone());
        if let Some(previous) = previous_barcode {
            if !previous.is_empty() && previous != details.barcode {
                tables.barcode_index.remove(&previous);
            }
        }

        if !details.barcode.is_empty() {
            tables
                .barcode_index
                .insert(details.barcode.clone(), details.epc.clone());
        }
        tables
            .assets
            .insert(details.epc.clone(), details.record());
        tables
            .asset_details
            .insert(details.epc.clone(), details.clone());

        info!("updated mapping for tag {}", details.epc);
        Ok(details)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::LatencyConfig;

    fn new_mapping(epc: &str, barcode: &str) -> AssetDetails {
        AssetDetails {
            id: "ASSET-F6".to_string(),
            asset_type: "Scanner".to_string(),
            asset_name: "Handheld Scanner".to_string(),
            location: "IT Storage".to_string(),
            epc: epc.to_string(),
            barcode: barcode.to_string(),
            unit: "pcs".to_string(),
        }
    }

    #[tokio::test]
    async fn barcode_resolves_through_the_index() {
        let store = Store::seeded(LatencyConfig::zero());

        let asset = store.lookup_by_barcode("BC-B2-001").await.unwrap();
        assert_eq!(asset.epc, "EPC-B2-001");

        assert!(store.lookup_by_barcode("BC-NONE").await.is_none());
    }

    #[tokio::test]
    async fn upsert_registers_a_new_tag() {
        let store = Store::seeded(LatencyConfig::zero());

        store
            .upsert_mapping(new_mapping("EPC-F6-001", "BC-F6-001"))
            .await
            .unwrap();

        assert!(store.lookup_by_epc("EPC-F6-001").await.is_some());
        assert!(store.lookup_by_barcode("BC-F6-001").await.is_some());
        // The master table resolves the new tag too.
        assert_eq!(
            store.resolve("EPC-F6-001").await.unwrap().asset_id,
            "ASSET-F6"
        );
    }

    #[tokio::test]
    async fn upsert_moves_a_reassigned_barcode() {
        let store = Store::seeded(LatencyConfig::zero());

        let mut corrected = store.lookup_by_epc("EPC-B2-001").await.unwrap();
        corrected.barcode = "BC-B2-001-NEW".to_string();
        store.upsert_mapping(corrected).await.unwrap();

        assert!(store.lookup_by_barcode("BC-B2-001").await.is_none());
        assert_eq!(
            store.lookup_by_barcode("BC-B2-001-NEW").await.unwrap().epc,
            "EPC-B2-001"
        );
    }

    #[tokio::test]
    async fn upsert_requires_a_name() {
        let store = Store::seeded(LatencyConfig::zero());

        let mut unnamed = new_mapping("EPC-F6-002", "BC-F6-002");
        unnamed.asset_name = String::new();
        assert!(store.upsert_mapping(unnamed).await.is_err());
    }
}
