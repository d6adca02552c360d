use serde::Serialize;
use tokio::sync::broadcast;

use crate::reconcile::SessionPhase;

const CHANNEL_CAPACITY: usize = 64;

/// Events published for the presentation layer. Delivery is lossy for slow
/// subscribers (lagged receivers skip ahead) and a publish with no subscriber
/// is dropped silently.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum AppEvent {
    #[serde(rename_all = "camelCase")]
    ScanStateChanged {
        task_id: String,
        phase: SessionPhase,
        matched: usize,
        surplus: usize,
        unrecognized: usize,
    },
    #[serde(rename_all = "camelCase")]
    DiscoveryProgress { found: usize },
    #[serde(rename_all = "camelCase")]
    DiscoveryCompleted { found: usize },
    #[serde(rename_all = "camelCase")]
    ScanSessionCommitted { task_id: String },
    #[serde(rename_all = "camelCase")]
    RegistrationCreated { registration_id: String },
    #[serde(rename_all = "camelCase")]
    AssetMappingUpdated { epc: String },
}

#[derive(Clone)]
pub struct EventBus {
    tx: broadcast::Sender<AppEvent>,
}

impl EventBus {
    pub fn new() -> Self {
        let (tx, _) = broadcast::channel(CHANNEL_CAPACITY);
        Self { tx }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<AppEvent> {
        self.tx.subscribe()
    }

    pub fn publish(&self, event: AppEvent) {
        let _ = self.tx.send(event);
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}
