use std::collections::{BTreeMap, HashMap};

use anyhow::Result;
use async_trait::async_trait;

use crate::store::models::{AssetRecord, InventoryTaskDetail};

/// Data access the scan controller is driven through. Injected so the
/// reconciliation flow has no compile-time dependency on how task data is
/// sourced; the mock store implements it today.
#[async_trait]
pub trait InventoryRepository: Send + Sync {
    async fn task_detail(&self, task_id: &str) -> Result<Option<InventoryTaskDetail>>;

    /// Resolve a discovered batch; unknown identifiers are absent from the
    /// returned map.
    async fn resolve_many(&self, epcs: &[String]) -> Result<HashMap<String, AssetRecord>>;

    /// The tag population a discovery pass over this task can observe.
    async fn discoverable_tags(&self, task_id: &str) -> Result<Vec<String>>;

    /// Overwrite the task's per-item counts with a finished session's tally.
    async fn commit_counts(&self, task_id: &str, counts: &BTreeMap<String, u32>) -> Result<()>;
}
