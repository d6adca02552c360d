use std::collections::{BTreeMap, HashMap, HashSet};

use serde::Serialize;

use crate::store::models::{AssetRecord, InventoryItem};

use super::classify::{classify, ExpectedSet, ScanResult};
use super::tally::tally;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum SessionPhase {
    Idle,
    Scanning,
    Reviewing,
}

/// Inputs the reducer folds over session state. Batches arrive as one atomic
/// event per discovery pass; there are no partial deliveries.
#[derive(Debug, Clone)]
pub enum SessionEvent {
    /// A discovery pass started. Accumulated results are retained, so
    /// re-entering from `Reviewing` resumes accumulation.
    ScanStarted,
    /// A discovery pass delivered its batch, together with the slice of the
    /// lookup table covering it.
    BatchCompleted {
        identifiers: Vec<String>,
        lookup: HashMap<String, AssetRecord>,
    },
    /// The operator removed one surplus or unrecognized entry. Matched
    /// entries are not removable; the event is a no-op for them.
    ResultRemoved { epc: String },
    /// Explicit restart: the only way accumulated results are discarded.
    Restarted,
}

/// One scan session for an opened inventory task.
///
/// State transitions happen exclusively through [`ScanSession::apply`], which
/// is a pure `(state, event) -> state` reducer; the classification itself is
/// delegated to [`classify`]. Results accumulate monotonically across batches
/// and are deduplicated by identifier.
#[derive(Debug, Clone)]
pub struct ScanSession {
    task_id: String,
    phase: SessionPhase,
    expected: ExpectedSet,
    items: Vec<InventoryItem>,
    results: Vec<ScanResult>,
    seen: HashSet<String>,
}

impl ScanSession {
    pub fn open(task_id: String, items: Vec<InventoryItem>) -> Self {
        Self {
            task_id,
            phase: SessionPhase::Idle,
            expected: ExpectedSet::from_items(&items),
            items,
            results: Vec::new(),
            seen: HashSet::new(),
        }
    }

    pub fn apply(mut self, event: SessionEvent) -> Self {
        match event {
            SessionEvent::ScanStarted => {
                self.phase = SessionPhase::Scanning;
            }
            SessionEvent::BatchCompleted { identifiers, lookup } => {
                let new = classify(&identifiers, &self.expected, &lookup, &self.seen);
                self.seen.extend(new.iter().map(|r| r.epc.clone()));
                self.results.extend(new);
                self.phase = SessionPhase::Reviewing;
            }
            SessionEvent::ResultRemoved { epc } => {
                if let Some(index) = self
                    .results
                    .iter()
                    .position(|r| r.epc == epc && !r.is_matched())
                {
                    self.results.remove(index);
                    self.seen.remove(&epc);
                }
            }
            SessionEvent::Restarted => {
                self.results.clear();
                self.seen.clear();
                self.phase = SessionPhase::Idle;
            }
        }
        self
    }

    pub fn task_id(&self) -> &str {
        &self.task_id
    }

    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    pub fn results(&self) -> &[ScanResult] {
        &self.results
    }

    pub fn items(&self) -> &[InventoryItem] {
        &self.items
    }

    pub fn expected(&self) -> &ExpectedSet {
        &self.expected
    }

    /// Per-asset matched counts for commit, derived from accumulated results.
    pub fn tallies(&self) -> BTreeMap<String, u32> {
        tally(&self.results, &self.items)
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        let tallies = self.tallies();
        let matched = self
            .items
            .iter()
            .map(|item| MatchedLine {
                scanned: tallies.get(&item.asset_id).copied().unwrap_or(0),
                item: item.clone(),
            })
            .collect();

        SessionSnapshot {
            task_id: self.task_id.clone(),
            phase: self.phase,
            matched_count: self.results.iter().filter(|r| r.is_matched()).count(),
            matched,
            surplus: self
                .results
                .iter()
                .filter(|r| r.is_surplus())
                .cloned()
                .collect(),
            unrecognized: self
                .results
                .iter()
                .filter(|r| r.is_unrecognized())
                .cloned()
                .collect(),
        }
    }
}

/// What the presentation layer renders: the matched tab grouped by line item
/// with session counts, plus the surplus and unrecognized tabs.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionSnapshot {
    pub task_id: String,
    pub phase: SessionPhase,
    pub matched_count: usize,
    pub matched: Vec<MatchedLine>,
    pub surplus: Vec<ScanResult>,
    pub unrecognized: Vec<ScanResult>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchedLine {
    pub item: InventoryItem,
    /// Matched tags observed this session; may exceed `item.quantity_required`.
    pub scanned: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(asset_id: &str) -> AssetRecord {
        AssetRecord {
            asset_id: asset_id.to_string(),
            asset_type: String::new(),
            asset_name: String::new(),
        }
    }

    fn item(asset_id: &str, epcs: &[&str]) -> InventoryItem {
        InventoryItem {
            asset_id: asset_id.to_string(),
            asset_type: String::new(),
            asset_name: String::new(),
            quantity_required: epcs.len() as u32,
            quantity_scanned: 0,
            expected_epcs: epcs.iter().map(|e| e.to_string()).collect(),
        }
    }

    fn lookup() -> HashMap<String, AssetRecord> {
        HashMap::from([
            ("E1".to_string(), record("A")),
            ("E2".to_string(), record("A")),
            ("E3".to_string(), record("B")),
            ("E4".to_string(), record("C")),
        ])
    }

    fn opened() -> ScanSession {
        ScanSession::open(
            "T1".to_string(),
            vec![item("A", &["E1", "E2"]), item("B", &["E3"])],
        )
    }

    fn batch(ids: &[&str]) -> SessionEvent {
        SessionEvent::BatchCompleted {
            identifiers: ids.iter().map(|i| i.to_string()).collect(),
            lookup: lookup(),
        }
    }

    #[test]
    fn walks_idle_scanning_reviewing() {
        let session = opened();
        assert_eq!(session.phase(), SessionPhase::Idle);

        let session = session.apply(SessionEvent::ScanStarted);
        assert_eq!(session.phase(), SessionPhase::Scanning);

        let session = session.apply(batch(&["E1"]));
        assert_eq!(session.phase(), SessionPhase::Reviewing);
        assert_eq!(session.results().len(), 1);
    }

    #[test]
    fn reentering_scan_retains_accumulated_results() {
        let session = opened()
            .apply(SessionEvent::ScanStarted)
            .apply(batch(&["E1", "E4"]))
            .apply(SessionEvent::ScanStarted);

        assert_eq!(session.phase(), SessionPhase::Scanning);
        assert_eq!(session.results().len(), 2);

        // The repeated identifier contributes nothing on the second pass.
        let session = session.apply(batch(&["E1", "E2"]));
        assert_eq!(session.results().len(), 3);
    }

    #[test]
    fn spec_scenario_partitions_and_tallies() {
        let session = opened()
            .apply(SessionEvent::ScanStarted)
            .apply(batch(&["E1", "E2", "E4", "E4", "UNKNOWN"]));

        let snapshot = session.snapshot();
        assert_eq!(snapshot.matched_count, 2);
        assert_eq!(snapshot.surplus.len(), 1);
        assert_eq!(snapshot.unrecognized.len(), 1);

        let tallies = session.tallies();
        assert_eq!(tallies.get("A"), Some(&2));
        assert_eq!(tallies.get("B"), Some(&0));

        // Re-running with an already-seen identifier produces zero new results.
        let session = session.apply(batch(&["E1"]));
        assert_eq!(session.results().len(), 4);
    }

    #[test]
    fn removed_entry_can_be_observed_again() {
        let session = opened()
            .apply(SessionEvent::ScanStarted)
            .apply(batch(&["UNKNOWN"]))
            .apply(SessionEvent::ResultRemoved {
                epc: "UNKNOWN".to_string(),
            });
        assert!(session.results().is_empty());

        let session = session.apply(batch(&["UNKNOWN"]));
        assert_eq!(session.results().len(), 1);
    }

    #[test]
    fn matched_entries_are_not_removable() {
        let session = opened()
            .apply(SessionEvent::ScanStarted)
            .apply(batch(&["E1"]))
            .apply(SessionEvent::ResultRemoved {
                epc: "E1".to_string(),
            });

        assert_eq!(session.results().len(), 1);
    }

    #[test]
    fn restart_is_the_only_reset() {
        let session = opened()
            .apply(SessionEvent::ScanStarted)
            .apply(batch(&["E1", "E4"]))
            .apply(SessionEvent::Restarted);

        assert_eq!(session.phase(), SessionPhase::Idle);
        assert!(session.results().is_empty());

        // A fresh pass observes the same tags again.
        let session = session
            .apply(SessionEvent::ScanStarted)
            .apply(batch(&["E1", "E4"]));
        assert_eq!(session.results().len(), 2);
    }

    #[test]
    fn snapshot_lines_cover_every_item_with_zero_default() {
        let snapshot = opened().snapshot();
        assert_eq!(snapshot.matched.len(), 2);
        assert!(snapshot.matched.iter().all(|line| line.scanned == 0));
    }
}
