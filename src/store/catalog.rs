//! Pick-list reference data for the declaration form.

use super::models::{AssetType, Location, Warehouse};
use super::Store;

impl Store {
    pub async fn warehouses(&self) -> Vec<Warehouse> {
        self.delay(self.latency().listing).await;
        self.read().await.warehouses.clone()
    }

    pub async fn locations(&self) -> Vec<Location> {
        self.delay(self.latency().listing).await;
        self.read().await.locations.clone()
    }

    pub async fn locations_for_warehouse(&self, warehouse_id: &str) -> Vec<Location> {
        self.delay(self.latency().listing).await;
        self.read()
            .await
            .locations
            .iter()
            .filter(|location| location.warehouse_id == warehouse_id)
            .cloned()
            .collect()
    }

    pub async fn asset_types(&self) -> Vec<AssetType> {
        self.delay(self.latency().listing).await;
        self.read().await.asset_types.clone()
    }
}

#[cfg(test)]
mod tests {
    use crate::config::LatencyConfig;
    use crate::store::Store;

    #[tokio::test]
    async fn locations_filter_by_warehouse() {
        let store = Store::seeded(LatencyConfig::zero());

        let central = store.locations_for_warehouse("WH01").await;
        assert_eq!(central.len(), 3);
        assert!(central.iter().all(|l| l.warehouse_id == "WH01"));

        let returns = store.locations_for_warehouse("WH03").await;
        assert!(returns.is_empty());
    }
}
