//! Asset declaration documents: a registration lists the quantities of each
//! asset type to be declared, and tracks how many tags were captured per line.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum RegistrationStatus {
    Pending,
    Completed,
}

impl RegistrationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            RegistrationStatus::Pending => "Pending",
            RegistrationStatus::Completed => "Completed",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Registration {
    pub id: String,
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub status: RegistrationStatus,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistrationItem {
    pub id: String,
    pub name: String,
    pub quantity_required: u32,
    pub quantity_scanned: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistrationDetail {
    pub id: String,
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub status: RegistrationStatus,
    pub created_by: String,
    pub updated_at: DateTime<Utc>,
    pub notes: String,
    pub warehouse_id: Option<String>,
    pub location_id: Option<String>,
    pub items: Vec<RegistrationItem>,
}

impl RegistrationDetail {
    pub fn summary(&self) -> Registration {
        Registration {
            id: self.id.clone(),
            name: self.name.clone(),
            created_at: self.created_at,
            status: self.status,
        }
    }
}

/// Input for creating a new registration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeclarationDraft {
    pub name: String,
    pub warehouse_id: String,
    pub location_id: Option<String>,
    pub items: Vec<DraftItem>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DraftItem {
    pub asset_type_id: String,
    pub asset_type_name: String,
    pub quantity: u32,
}
