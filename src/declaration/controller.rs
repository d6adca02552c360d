use std::sync::Arc;

use anyhow::{anyhow, bail, Result};
use log::info;
use tokio::sync::Mutex;

use crate::auth::AuthService;
use crate::config::DiscoveryConfig;
use crate::discovery::DiscoveryController;
use crate::events::{AppEvent, EventBus};
use crate::store::models::{DeclarationDraft, Registration, RegistrationDetail};
use crate::store::Store;

use super::session::{CaptureSession, CaptureSnapshot, ConfirmOutcome};

struct ActiveCapture {
    registration_id: String,
    item_id: String,
    session: CaptureSession,
}

/// Declaration flows: browse and create registrations, and capture tags for
/// one line item at a time.
#[derive(Clone)]
pub struct DeclarationController {
    store: Store,
    auth: AuthService,
    events: EventBus,
    config: DiscoveryConfig,
    discovery: Arc<Mutex<DiscoveryController>>,
    active: Arc<Mutex<Option<ActiveCapture>>>,
}

impl DeclarationController {
    pub fn new(
        store: Store,
        auth: AuthService,
        events: EventBus,
        config: DiscoveryConfig,
    ) -> Self {
        let discovery = DiscoveryController::new(events.clone());
        Self {
            store,
            auth,
            events,
            config,
            discovery: Arc::new(Mutex::new(discovery)),
            active: Arc::new(Mutex::new(None)),
        }
    }

    pub async fn registrations(&self) -> Vec<Registration> {
        self.store.registrations().await
    }

    pub async fn registration_detail(&self, id: &str) -> Result<RegistrationDetail> {
        self.store
            .registration_detail(id)
            .await
            .ok_or_else(|| anyhow!("unknown registration '{id}'"))
    }

    pub async fn create(&self, draft: DeclarationDraft) -> Result<RegistrationDetail> {
        let created_by = self
            .auth
            .current_user()
            .unwrap_or_else(|| "unknown".to_string());
        let detail = self.store.create_registration(draft, &created_by).await?;

        self.events.publish(AppEvent::RegistrationCreated {
            registration_id: detail.id.clone(),
        });
        Ok(detail)
    }

    /// Open a capture session for one line item of a registration.
    pub async fn open_capture(&self, registration_id: &str, item_id: &str) -> Result<()> {
        let detail = self.registration_detail(registration_id).await?;
        if !detail.items.iter().any(|item| item.id == item_id) {
            bail!("unknown item '{item_id}' in registration '{registration_id}'");
        }

        *self.active.lock().await = Some(ActiveCapture {
            registration_id: registration_id.to_string(),
            item_id: item_id.to_string(),
            session: CaptureSession::new(),
        });
        Ok(())
    }

    /// Run one discovery pass and merge its batch into the capture session.
    /// Blocks until the pass completes; `stop_capture_pass` from another
    /// handle ends it early with whatever was found.
    pub async fn run_capture_pass(&self) -> Result<CaptureSnapshot> {
        {
            let guard = self.active.lock().await;
            if guard.is_none() {
                bail!("no open capture session");
            }
        }

        let plan = self.store.discoverable_declaration_tags().await;
        let done_rx = self
            .discovery
            .lock()
            .await
            .start(plan, self.config.clone())?;

        let batch = done_rx
            .await
            .map_err(|_| anyhow!("discovery ended without delivering a batch"))?;
        let registered = self.store.declared_epcs(&batch).await;

        let mut guard = self.active.lock().await;
        let capture = guard
            .as_mut()
            .ok_or_else(|| anyhow!("capture session closed during discovery"))?;
        let added = capture.session.ingest(&batch, &registered);
        info!(
            "capture pass for {}/{} merged {added} new tags",
            capture.registration_id, capture.item_id
        );
        Ok(capture.session.snapshot())
    }

    pub async fn stop_capture_pass(&self) -> Result<()> {
        self.discovery.lock().await.stop().await
    }

    pub async fn capture_snapshot(&self) -> Result<CaptureSnapshot> {
        let guard = self.active.lock().await;
        let capture = guard
            .as_ref()
            .ok_or_else(|| anyhow!("no open capture session"))?;
        Ok(capture.session.snapshot())
    }

    pub async fn remove_tag(&self, epc: &str) -> Result<CaptureSnapshot> {
        let mut guard = self.active.lock().await;
        let capture = guard
            .as_mut()
            .ok_or_else(|| anyhow!("no open capture session"))?;
        capture.session.remove(epc);
        Ok(capture.session.snapshot())
    }

    /// Compare the captured fresh tags against the line item's required
    /// quantity. Only an exact match writes the count back and closes the
    /// session; a mismatch is reported and the session is kept as-is so the
    /// operator can keep scanning or prune entries.
    pub async fn confirm(&self) -> Result<ConfirmOutcome> {
        let (registration_id, item_id, fresh) = {
            let guard = self.active.lock().await;
            let capture = guard
                .as_ref()
                .ok_or_else(|| anyhow!("no open capture session"))?;
            (
                capture.registration_id.clone(),
                capture.item_id.clone(),
                capture.session.fresh_count(),
            )
        };

        let detail = self.registration_detail(&registration_id).await?;
        let item = detail
            .items
            .iter()
            .find(|item| item.id == item_id)
            .ok_or_else(|| anyhow!("unknown item '{item_id}'"))?;

        if fresh < item.quantity_required {
            return Ok(ConfirmOutcome::Short {
                missing: item.quantity_required - fresh,
            });
        }
        if fresh > item.quantity_required {
            return Ok(ConfirmOutcome::Over {
                excess: fresh - item.quantity_required,
            });
        }

        self.store
            .update_item_scanned(&registration_id, &item_id, fresh)
            .await?;
        *self.active.lock().await = None;
        Ok(ConfirmOutcome::Exact)
    }

    /// Abandon the capture session without writing anything back.
    pub async fn discard_capture(&self) -> Result<()> {
        self.discovery.lock().await.stop().await?;
        *self.active.lock().await = None;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::LatencyConfig;

    fn controller_with_store() -> (DeclarationController, Store) {
        let store = Store::seeded(LatencyConfig::zero());
        let events = EventBus::new();
        let auth = AuthService::new(std::time::Duration::ZERO);
        let controller = DeclarationController::new(
            store.clone(),
            auth,
            events,
            DiscoveryConfig::immediate(),
        );
        (controller, store)
    }

    #[tokio::test]
    async fn capture_pass_splits_fresh_and_registered() {
        let (controller, _) = controller_with_store();
        controller.open_capture("R012345", "item-1").await.unwrap();

        let snapshot = controller.run_capture_pass().await.unwrap();
        // Declaration field: five declared tags plus four new ones.
        assert_eq!(snapshot.fresh.len(), 4);
        assert_eq!(snapshot.already_registered.len(), 5);
    }

    #[tokio::test]
    async fn confirm_reports_mismatches_without_wiping_the_session() {
        let (controller, _) = controller_with_store();
        // item-1 requires 10 but the field only yields 4 fresh tags.
        controller.open_capture("R012345", "item-1").await.unwrap();
        controller.run_capture_pass().await.unwrap();

        let outcome = controller.confirm().await.unwrap();
        assert_eq!(outcome, ConfirmOutcome::Short { missing: 6 });

        // The session survives the failed confirm.
        let snapshot = controller.capture_snapshot().await.unwrap();
        assert_eq!(snapshot.fresh.len(), 4);
    }

    #[tokio::test]
    async fn exact_confirm_writes_the_count_back() {
        let (controller, store) = controller_with_store();

        // Create a registration whose single item wants exactly the four
        // fresh tags the declaration field yields.
        let created = controller
            .create(DeclarationDraft {
                name: "Scanner batch".to_string(),
                warehouse_id: "WH01".to_string(),
                location_id: None,
                items: vec![crate::store::models::DraftItem {
                    asset_type_id: "AT04".to_string(),
                    asset_type_name: "ThinkPad Laptop".to_string(),
                    quantity: 4,
                }],
            })
            .await
            .unwrap();
        let item_id = created.items[0].id.clone();

        controller.open_capture(&created.id, &item_id).await.unwrap();
        controller.run_capture_pass().await.unwrap();

        let outcome = controller.confirm().await.unwrap();
        assert_eq!(outcome, ConfirmOutcome::Exact);

        let detail = store.registration_detail(&created.id).await.unwrap();
        assert_eq!(detail.items[0].quantity_scanned, 4);

        // Confirm closed the capture session.
        assert!(controller.capture_snapshot().await.is_err());
    }

    #[tokio::test]
    async fn create_stamps_the_signed_in_user() {
        let store = Store::seeded(LatencyConfig::zero());
        let auth = AuthService::new(std::time::Duration::ZERO);
        assert!(auth.login("admin", "password").await);

        let controller = DeclarationController::new(
            store,
            auth,
            EventBus::new(),
            DiscoveryConfig::immediate(),
        );
        let created = controller
            .create(DeclarationDraft {
                name: "Stamped".to_string(),
                warehouse_id: "WH01".to_string(),
                location_id: None,
                items: vec![crate::store::models::DraftItem {
                    asset_type_id: "AT01".to_string(),
                    asset_type_name: "Wooden Desk".to_string(),
                    quantity: 1,
                }],
            })
            .await
            .unwrap();

        assert_eq!(created.created_by, "admin");
    }
}
