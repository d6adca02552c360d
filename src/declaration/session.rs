use std::collections::HashSet;

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum TagStatus {
    /// Not yet declared anywhere; counts toward the line item.
    Fresh,
    /// Already declared in the system; kept visible so the operator can
    /// inspect and remove it.
    AlreadyRegistered,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CapturedTag {
    pub epc: String,
    pub status: TagStatus,
}

/// Accumulates captured tags for one registration line item, deduplicated
/// across passes. Pure bookkeeping; the duplicate check against the system
/// is the caller's input.
#[derive(Debug, Clone, Default)]
pub struct CaptureSession {
    tags: Vec<CapturedTag>,
    seen: HashSet<String>,
}

impl CaptureSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Merge one discovered batch. `registered` names the identifiers the
    /// system already knows; everything else is fresh. Returns how many
    /// entries were added.
    pub fn ingest(&mut self, batch: &[String], registered: &HashSet<String>) -> usize {
        let mut added = 0;
        for epc in batch {
            if !self.seen.insert(epc.clone()) {
                continue;
            }
            let status = if registered.contains(epc) {
                TagStatus::AlreadyRegistered
            } else {
                TagStatus::Fresh
            };
            self.tags.push(CapturedTag {
                epc: epc.clone(),
                status,
            });
            added += 1;
        }
        added
    }

    /// Remove one already-registered entry. Fresh entries stay.
    pub fn remove(&mut self, epc: &str) {
        if let Some(index) = self
            .tags
            .iter()
            .position(|tag| tag.epc == epc && tag.status == TagStatus::AlreadyRegistered)
        {
            self.tags.remove(index);
            self.seen.remove(epc);
        }
    }

    pub fn fresh_count(&self) -> u32 {
        self.tags
            .iter()
            .filter(|tag| tag.status == TagStatus::Fresh)
            .count() as u32
    }

    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }

    pub fn snapshot(&self) -> CaptureSnapshot {
        CaptureSnapshot {
            fresh: self
                .tags
                .iter()
                .filter(|tag| tag.status == TagStatus::Fresh)
                .cloned()
                .collect(),
            already_registered: self
                .tags
                .iter()
                .filter(|tag| tag.status == TagStatus::AlreadyRegistered)
                .cloned()
                .collect(),
        }
    }
}

/// The two capture tabs.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CaptureSnapshot {
    pub fresh: Vec<CapturedTag>,
    pub already_registered: Vec<CapturedTag>,
}

/// How a capture session compares against the line item's required quantity
/// on confirm. Only `Exact` writes back; mismatches are reported to the
/// operator and the session is kept so they can keep scanning or remove
/// entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "result", rename_all = "camelCase")]
pub enum ConfirmOutcome {
    Exact,
    #[serde(rename_all = "camelCase")]
    Short { missing: u32 },
    #[serde(rename_all = "camelCase")]
    Over { excess: u32 },
}
