//! In-memory mock backend. Every table a real deployment would keep behind
//! an API lives here, seeded at startup and served with artificial latency
//! so flows behave like network round-trips. Nothing is ever persisted.

pub mod models;

mod catalog;
mod declarations;
mod inventory;
mod lookup;
mod seed;

use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use std::time::Duration;

use log::info;
use tokio::sync::RwLock;

use crate::config::LatencyConfig;
use models::{
    AssetDetails, AssetRecord, AssetType, InventoryTaskDetail, Location, RegistrationDetail,
    Warehouse,
};

pub(crate) struct Tables {
    pub registrations: HashMap<String, RegistrationDetail>,
    /// EPCs already declared somewhere in the system; the duplicate check
    /// for declaration capture runs against this set.
    pub declared_epcs: HashSet<String>,
    /// Master asset table: EPC -> reference record.
    pub assets: HashMap<String, AssetRecord>,
    /// Lookup table: EPC -> full details.
    pub asset_details: HashMap<String, AssetDetails>,
    /// Barcode -> EPC index, maintained alongside `asset_details`.
    pub barcode_index: HashMap<String, String>,
    pub tasks: HashMap<String, InventoryTaskDetail>,
    /// Simulated radio environment per task: the tags physically present
    /// where the count happens, surplus and unknown ones included.
    pub tag_fields: HashMap<String, Vec<String>>,
    /// Simulated radio environment for declaration capture.
    pub declaration_field: Vec<String>,
    pub warehouses: Vec<Warehouse>,
    pub locations: Vec<Location>,
    pub asset_types: Vec<AssetType>,
}

/// Clonable handle over the mock tables.
#[derive(Clone)]
pub struct Store {
    tables: Arc<RwLock<Tables>>,
    latency: Arc<LatencyConfig>,
}

impl Store {
    pub fn seeded(latency: LatencyConfig) -> Self {
        let tables = seed::tables();
        info!(
            "mock store seeded: {} assets, {} inventory tasks, {} registrations",
            tables.assets.len(),
            tables.tasks.len(),
            tables.registrations.len()
        );

        Self {
            tables: Arc::new(RwLock::new(tables)),
            latency: Arc::new(latency),
        }
    }

    pub(crate) async fn read(&self) -> tokio::sync::RwLockReadGuard<'_, Tables> {
        self.tables.read().await
    }

    pub(crate) async fn write(&self) -> tokio::sync::RwLockWriteGuard<'_, Tables> {
        self.tables.write().await
    }

    pub(crate) fn latency(&self) -> &LatencyConfig {
        &self.latency
    }

    pub(crate) async fn delay(&self, duration: Duration) {
        if !duration.is_zero() {
            tokio::time::sleep(duration).await;
        }
    }
}
