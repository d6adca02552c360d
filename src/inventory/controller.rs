use std::sync::Arc;

use anyhow::{anyhow, bail, Context, Result};
use log::error;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;

use crate::config::DiscoveryConfig;
use crate::discovery::DiscoveryController;
use crate::events::{AppEvent, EventBus};
use crate::reconcile::{ScanSession, SessionEvent, SessionPhase, SessionSnapshot};

use super::repository::InventoryRepository;

/// Drives one inventory task's scan session: opens the task, runs discovery
/// passes, folds delivered batches through the session reducer and commits
/// the final tally back through the repository.
#[derive(Clone)]
pub struct InventoryScanController {
    repo: Arc<dyn InventoryRepository>,
    events: EventBus,
    config: DiscoveryConfig,
    session: Arc<Mutex<Option<ScanSession>>>,
    discovery: Arc<Mutex<DiscoveryController>>,
    waiter: Arc<Mutex<Option<JoinHandle<()>>>>,
}

impl InventoryScanController {
    pub fn new(
        repo: Arc<dyn InventoryRepository>,
        events: EventBus,
        config: DiscoveryConfig,
    ) -> Self {
        let discovery = DiscoveryController::new(events.clone());
        Self {
            repo,
            events,
            config,
            session: Arc::new(Mutex::new(None)),
            discovery: Arc::new(Mutex::new(discovery)),
            waiter: Arc::new(Mutex::new(None)),
        }
    }

    /// Load the task and open a fresh `Idle` session for it. The expected
    /// set is derived here, once.
    pub async fn open(&self, task_id: &str) -> Result<SessionSnapshot> {
        let detail = self
            .repo
            .task_detail(task_id)
            .await?
            .ok_or_else(|| anyhow!("unknown inventory task '{task_id}'"))?;

        let session = ScanSession::open(detail.id, detail.items);
        let snapshot = session.snapshot();
        *self.session.lock().await = Some(session);

        self.publish_state(&snapshot);
        Ok(snapshot)
    }

    /// Begin a discovery pass. Permitted from `Idle` and `Reviewing`;
    /// accumulated results are retained on re-entry.
    pub async fn start_scan(&self) -> Result<()> {
        let task_id = {
            let guard = self.session.lock().await;
            let session = guard.as_ref().ok_or_else(|| anyhow!("no open scan session"))?;
            if session.phase() == SessionPhase::Scanning {
                bail!("scan already running");
            }
            session.task_id().to_string()
        };

        let plan = self.repo.discoverable_tags(&task_id).await?;
        let done_rx = self
            .discovery
            .lock()
            .await
            .start(plan, self.config.clone())?;

        let snapshot = self.fold(SessionEvent::ScanStarted).await?;
        self.publish_state(&snapshot);

        let this = self.clone();
        let handle = tokio::spawn(async move {
            match done_rx.await {
                Ok(batch) => {
                    if let Err(err) = this.ingest_batch(batch).await {
                        error!("failed to reconcile discovery batch: {err:?}");
                    }
                }
                Err(_) => error!("discovery ended without delivering a batch"),
            }
        });
        *self.waiter.lock().await = Some(handle);

        Ok(())
    }

    /// End the running pass early. Reconciliation still runs over whatever
    /// was found; returns once the session has settled in `Reviewing`.
    pub async fn stop_scan(&self) -> Result<SessionSnapshot> {
        self.discovery.lock().await.stop().await?;

        if let Some(handle) = self.waiter.lock().await.take() {
            handle.await.context("scan waiter task failed to join")?;
        }

        self.snapshot().await
    }

    pub async fn snapshot(&self) -> Result<SessionSnapshot> {
        let guard = self.session.lock().await;
        let session = guard.as_ref().ok_or_else(|| anyhow!("no open scan session"))?;
        Ok(session.snapshot())
    }

    /// Drop one surplus or unrecognized entry; matched entries stay.
    pub async fn remove_result(&self, epc: &str) -> Result<SessionSnapshot> {
        let snapshot = self
            .fold(SessionEvent::ResultRemoved { epc: epc.to_string() })
            .await?;
        self.publish_state(&snapshot);
        Ok(snapshot)
    }

    /// Write the matched tally back onto the task, replacing its per-item
    /// counts, then reset to a fresh session for the same task.
    pub async fn commit(&self) -> Result<()> {
        let (task_id, counts) = {
            let guard = self.session.lock().await;
            let session = guard.as_ref().ok_or_else(|| anyhow!("no open scan session"))?;
            if session.phase() != SessionPhase::Reviewing {
                bail!("no reviewed scan session to commit");
            }
            (session.task_id().to_string(), session.tallies())
        };

        self.repo.commit_counts(&task_id, &counts).await?;
        self.events.publish(AppEvent::ScanSessionCommitted {
            task_id: task_id.clone(),
        });

        // Reload the task so the fresh session reflects the counts just
        // written back.
        self.open(&task_id).await?;
        Ok(())
    }

    /// Keep the task open but throw away everything observed so far.
    pub async fn restart(&self) -> Result<SessionSnapshot> {
        self.discovery.lock().await.stop().await?;
        if let Some(handle) = self.waiter.lock().await.take() {
            handle.await.context("scan waiter task failed to join")?;
        }

        let snapshot = self.fold(SessionEvent::Restarted).await?;
        self.publish_state(&snapshot);
        Ok(snapshot)
    }

    /// Abandon the session entirely without writing anything back.
    pub async fn discard(&self) -> Result<()> {
        self.discovery.lock().await.stop().await?;
        if let Some(handle) = self.waiter.lock().await.take() {
            handle.await.context("scan waiter task failed to join")?;
        }

        *self.session.lock().await = None;
        Ok(())
    }

    async fn ingest_batch(&self, batch: Vec<String>) -> Result<()> {
        let lookup = self.repo.resolve_many(&batch).await?;
        let snapshot = self
            .fold(SessionEvent::BatchCompleted {
                identifiers: batch,
                lookup,
            })
            .await?;
        self.publish_state(&snapshot);
        Ok(())
    }

    async fn fold(&self, event: SessionEvent) -> Result<SessionSnapshot> {
        let mut guard = self.session.lock().await;
        let session = guard
            .take()
            .ok_or_else(|| anyhow!("scan session closed"))?;
        let session = session.apply(event);
        let snapshot = session.snapshot();
        *guard = Some(session);
        Ok(snapshot)
    }

    fn publish_state(&self, snapshot: &SessionSnapshot) {
        self.events.publish(AppEvent::ScanStateChanged {
            task_id: snapshot.task_id.clone(),
            phase: snapshot.phase,
            matched: snapshot.matched_count,
            surplus: snapshot.surplus.len(),
            unrecognized: snapshot.unrecognized.len(),
        });
    }
}
