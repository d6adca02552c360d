use std::collections::{HashMap, HashSet};

use serde::Serialize;

use crate::store::models::{AssetRecord, InventoryItem};

/// Tag identifiers a task declares it should observe, each mapped to the
/// asset id of the owning line item. Built once when a task's scan session
/// opens.
#[derive(Debug, Clone, Default)]
pub struct ExpectedSet {
    epc_to_asset: HashMap<String, String>,
}

impl ExpectedSet {
    pub fn from_items(items: &[InventoryItem]) -> Self {
        let mut epc_to_asset = HashMap::new();
        for item in items {
            for epc in &item.expected_epcs {
                epc_to_asset.insert(epc.clone(), item.asset_id.clone());
            }
        }
        Self { epc_to_asset }
    }

    pub fn contains(&self, epc: &str) -> bool {
        self.epc_to_asset.contains_key(epc)
    }

    pub fn asset_id_for(&self, epc: &str) -> Option<&str> {
        self.epc_to_asset.get(epc).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.epc_to_asset.len()
    }

    pub fn is_empty(&self) -> bool {
        self.epc_to_asset.is_empty()
    }
}

/// The three mutually exclusive outcomes for an observed identifier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "camelCase")]
pub enum Classification {
    /// Member of the expected set.
    Matched { asset: AssetRecord },
    /// Resolves to a known asset but is not expected by this task.
    Surplus { asset: AssetRecord },
    /// Does not resolve to any asset in the system.
    Unrecognized,
}

impl Classification {
    pub fn as_str(&self) -> &'static str {
        match self {
            Classification::Matched { .. } => "Matched",
            Classification::Surplus { .. } => "Surplus",
            Classification::Unrecognized => "Unrecognized",
        }
    }

    pub fn asset(&self) -> Option<&AssetRecord> {
        match self {
            Classification::Matched { asset } | Classification::Surplus { asset } => Some(asset),
            Classification::Unrecognized => None,
        }
    }
}

/// One uniquely observed identifier with its classification.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScanResult {
    pub epc: String,
    #[serde(flatten)]
    pub classification: Classification,
}

impl ScanResult {
    pub fn is_matched(&self) -> bool {
        matches!(self.classification, Classification::Matched { .. })
    }

    pub fn is_surplus(&self) -> bool {
        matches!(self.classification, Classification::Surplus { .. })
    }

    pub fn is_unrecognized(&self) -> bool {
        matches!(self.classification, Classification::Unrecognized)
    }
}

/// Classify a batch of newly observed identifiers.
///
/// `seen` holds every identifier already accumulated in the session; those
/// are skipped, as are duplicates within the batch, so a tag observed any
/// number of times contributes exactly one result. Only newly created
/// results are returned; merging them into session state is the caller's
/// job. Total over its inputs: an unknown identifier is a classification
/// outcome, not an error.
pub fn classify(
    identifiers: &[String],
    expected: &ExpectedSet,
    lookup: &HashMap<String, AssetRecord>,
    seen: &HashSet<String>,
) -> Vec<ScanResult> {
    let mut batch_seen: HashSet<&str> = HashSet::new();
    let mut results = Vec::new();

    for epc in identifiers {
        if seen.contains(epc) || !batch_seen.insert(epc.as_str()) {
            continue;
        }

        let classification = match lookup.get(epc) {
            None => Classification::Unrecognized,
            Some(record) if expected.contains(epc) => Classification::Matched {
                asset: record.clone(),
            },
            Some(record) => Classification::Surplus {
                asset: record.clone(),
            },
        };

        results.push(ScanResult {
            epc: epc.clone(),
            classification,
        });
    }

    results
}
