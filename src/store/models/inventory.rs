//! Inventory counting tasks. Each line item carries the tag identifiers the
//! task expects to observe for that asset, plus the last committed count.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TaskStatus {
    Pending,
    Completed,
}

impl TaskStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            TaskStatus::Pending => "Pending",
            TaskStatus::Completed => "Completed",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InventoryTask {
    pub id: String,
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub status: TaskStatus,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InventoryItem {
    pub asset_id: String,
    pub asset_type: String,
    pub asset_name: String,
    pub quantity_required: u32,
    pub quantity_scanned: u32,
    pub expected_epcs: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InventoryTaskDetail {
    pub id: String,
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub status: TaskStatus,
    pub location: String,
    pub items: Vec<InventoryItem>,
}

impl InventoryTaskDetail {
    pub fn summary(&self) -> InventoryTask {
        InventoryTask {
            id: self.id.clone(),
            name: self.name.clone(),
            created_at: self.created_at,
            status: self.status,
        }
    }
}
