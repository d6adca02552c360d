use serde::{Deserialize, Serialize};

/// Reference data a tag identifier resolves to during reconciliation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssetRecord {
    pub asset_id: String,
    pub asset_type: String,
    pub asset_name: String,
}

/// Full record behind the lookup feature: one physical asset with its tag
/// and barcode mapping.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssetDetails {
    pub id: String,
    pub asset_type: String,
    pub asset_name: String,
    pub location: String,
    pub epc: String,
    pub barcode: String,
    pub unit: String,
}

impl AssetDetails {
    pub fn record(&self) -> AssetRecord {
        AssetRecord {
            asset_id: self.id.clone(),
            asset_type: self.asset_type.clone(),
            asset_name: self.asset_name.clone(),
        }
    }
}
