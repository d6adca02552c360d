//! Inventory task data and the repository seam the scan engine is driven
//! through.

use std::collections::{BTreeMap, HashMap};

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use log::info;

use crate::inventory::InventoryRepository;

use super::models::{AssetRecord, InventoryTask, InventoryTaskDetail, TaskStatus};
use super::Store;

impl Store {
    pub async fn inventory_tasks(&self) -> Vec<InventoryTask> {
        self.delay(self.latency().listing).await;
        let mut list: Vec<InventoryTask> = self
            .read()
            .await
            .tasks
            .values()
            .map(InventoryTaskDetail::summary)
            .collect();
        list.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        list
    }

    pub async fn inventory_task_detail(&self, id: &str) -> Option<InventoryTaskDetail> {
        self.delay(self.latency().detail).await;
        self.read().await.tasks.get(id).cloned()
    }

    pub async fn resolve(&self, epc: &str) -> Option<AssetRecord> {
        self.delay(self.latency().resolve).await;
        self.read().await.assets.get(epc).cloned()
    }

    /// Resolve a whole discovered batch in one round-trip. Unknown
    /// identifiers are simply absent from the result.
    pub async fn resolve_batch(&self, epcs: &[String]) -> HashMap<String, AssetRecord> {
        self.delay(self.latency().resolve).await;
        let tables = self.read().await;
        epcs.iter()
            .filter_map(|epc| tables.assets.get(epc).map(|record| (epc.clone(), record.clone())))
            .collect()
    }

    /// Write a finished scan session's tallies back onto the task, replacing
    /// every line item's count. Items absent from the tally reset to zero.
    pub async fn commit_task_counts(
        &self,
        task_id: &str,
        counts: &BTreeMap<String, u32>,
    ) -> Result<()> {
        self.delay(self.latency().submit).await;

        let mut tables = self.write().await;
        let task = tables
            .tasks
            .get_mut(task_id)
            .ok_or_else(|| anyhow!("unknown inventory task '{task_id}'"))?;

        for item in &mut task.items {
            item.quantity_scanned = counts.get(&item.asset_id).copied().unwrap_or(0);
        }

        info!(
            "submitting inventory counts: {}",
            serde_json::json!({ "taskId": task_id, "counts": counts })
        );
        Ok(())
    }

    pub async fn complete_task(&self, task_id: &str) -> Result<()> {
        self.delay(self.latency().submit).await;

        let mut tables = self.write().await;
        let task = tables
            .tasks
            .get_mut(task_id)
            .ok_or_else(|| anyhow!("unknown inventory task '{task_id}'"))?;
        task.status = TaskStatus::Completed;
        Ok(())
    }

    pub async fn discoverable_task_tags(&self, task_id: &str) -> Vec<String> {
        self.read()
            .await
            .tag_fields
            .get(task_id)
            .cloned()
            .unwrap_or_default()
    }
}

#[async_trait]
impl InventoryRepository for Store {
    async fn task_detail(&self, task_id: &str) -> Result<Option<InventoryTaskDetail>> {
        Ok(self.inventory_task_detail(task_id).await)
    }

    async fn resolve_many(&self, epcs: &[String]) -> Result<HashMap<String, AssetRecord>> {
        Ok(self.resolve_batch(epcs).await)
    }

    async fn discoverable_tags(&self, task_id: &str) -> Result<Vec<String>> {
        Ok(self.discoverable_task_tags(task_id).await)
    }

    async fn commit_counts(&self, task_id: &str, counts: &BTreeMap<String, u32>) -> Result<()> {
        self.commit_task_counts(task_id, counts).await
    }
}
