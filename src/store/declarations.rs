//! Registration documents and the declared-EPC duplicate check.

use std::collections::HashSet;

use anyhow::{anyhow, bail, Result};
use chrono::Utc;
use log::info;
use uuid::Uuid;

use super::models::{
    DeclarationDraft, Registration, RegistrationDetail, RegistrationItem, RegistrationStatus,
};
use super::Store;

impl Store {
    pub async fn registrations(&self) -> Vec<Registration> {
        self.delay(self.latency().listing).await;
        let mut list: Vec<Registration> = self
            .read()
            .await
            .registrations
            .values()
            .map(RegistrationDetail::summary)
            .collect();
        list.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        list
    }

    pub async fn registration_detail(&self, id: &str) -> Option<RegistrationDetail> {
        self.delay(self.latency().detail).await;
        self.read().await.registrations.get(id).cloned()
    }

    pub async fn create_registration(
        &self,
        draft: DeclarationDraft,
        created_by: &str,
    ) -> Result<RegistrationDetail> {
        self.delay(self.latency().submit).await;

        if draft.name.trim().is_empty() {
            bail!("registration name is required");
        }
        if draft.items.is_empty() {
            bail!("a registration needs at least one line item");
        }

        let mut tables = self.write().await;
        if !tables.warehouses.iter().any(|w| w.id == draft.warehouse_id) {
            bail!("unknown warehouse '{}'", draft.warehouse_id);
        }

        let id = format!("R{}", &Uuid::new_v4().simple().to_string()[..6].to_uppercase());
        let now = Utc::now();
        let detail = RegistrationDetail {
            id: id.clone(),
            name: draft.name,
            created_at: now,
            status: RegistrationStatus::Pending,
            created_by: created_by.to_string(),
            updated_at: now,
            notes: "Created from the mobile app".to_string(),
            warehouse_id: Some(draft.warehouse_id),
            location_id: draft.location_id,
            items: draft
                .items
                .into_iter()
                .enumerate()
                .map(|(index, item)| RegistrationItem {
                    id: format!("item-{id}-{index}"),
                    name: item.asset_type_name,
                    quantity_required: item.quantity,
                    quantity_scanned: 0,
                })
                .collect(),
        };

        info!("created registration {id}");
        tables.registrations.insert(id, detail.clone());
        Ok(detail)
    }

    /// Overwrite the captured count for one registration line item.
    pub async fn update_item_scanned(
        &self,
        registration_id: &str,
        item_id: &str,
        scanned: u32,
    ) -> Result<()> {
        self.delay(self.latency().submit).await;

        let mut tables = self.write().await;
        let detail = tables
            .registrations
            .get_mut(registration_id)
            .ok_or_else(|| anyhow!("unknown registration '{registration_id}'"))?;
        let item = detail
            .items
            .iter_mut()
            .find(|item| item.id == item_id)
            .ok_or_else(|| anyhow!("unknown item '{item_id}' in registration '{registration_id}'"))?;

        item.quantity_scanned = scanned;
        detail.updated_at = Utc::now();
        Ok(())
    }

    /// Which of the given identifiers are already declared in the system.
    pub async fn declared_epcs(&self, epcs: &[String]) -> HashSet<String> {
        self.delay(self.latency().resolve).await;
        let tables = self.read().await;
        epcs.iter()
            .filter(|epc| tables.declared_epcs.contains(*epc))
            .cloned()
            .collect()
    }

    pub async fn discoverable_declaration_tags(&self) -> Vec<String> {
        self.read().await.declaration_field.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::LatencyConfig;
    use crate::store::models::DraftItem;

    fn draft() -> DeclarationDraft {
        DeclarationDraft {
            name: "New office batch".to_string(),
            warehouse_id: "WH01".to_string(),
            location_id: Some("LOC01-B".to_string()),
            items: vec![DraftItem {
                asset_type_id: "AT01".to_string(),
                asset_type_name: "Wooden Desk".to_string(),
                quantity: 4,
            }],
        }
    }

    #[tokio::test]
    async fn create_registers_a_pending_document() {
        let store = Store::seeded(LatencyConfig::zero());

        let created = store.create_registration(draft(), "tester").await.unwrap();
        assert_eq!(created.status, RegistrationStatus::Pending);
        assert_eq!(created.created_by, "tester");
        assert_eq!(created.items.len(), 1);
        assert_eq!(created.items[0].quantity_scanned, 0);

        let fetched = store.registration_detail(&created.id).await.unwrap();
        assert_eq!(fetched.name, "New office batch");
    }

    #[tokio::test]
    async fn create_rejects_empty_drafts() {
        let store = Store::seeded(LatencyConfig::zero());

        let mut no_name = draft();
        no_name.name = "  ".to_string();
        assert!(store.create_registration(no_name, "tester").await.is_err());

        let mut no_items = draft();
        no_items.items.clear();
        assert!(store.create_registration(no_items, "tester").await.is_err());

        let mut bad_warehouse = draft();
        bad_warehouse.warehouse_id = "WH99".to_string();
        assert!(store
            .create_registration(bad_warehouse, "tester")
            .await
            .is_err());
    }

    #[tokio::test]
    async fn update_item_scanned_overwrites_count() {
        let store = Store::seeded(LatencyConfig::zero());

        store
            .update_item_scanned("R012345", "item-1", 10)
            .await
            .unwrap();
        let detail = store.registration_detail("R012345").await.unwrap();
        assert_eq!(detail.items[0].quantity_scanned, 10);

        assert!(store
            .update_item_scanned("R012345", "item-9", 1)
            .await
            .is_err());
    }

    #[tokio::test]
    async fn declared_epcs_splits_known_from_new() {
        let store = Store::seeded(LatencyConfig::zero());

        let batch = vec!["3620100".to_string(), "3008-NEW-0".to_string()];
        let declared = store.declared_epcs(&batch).await;
        assert!(declared.contains("3620100"));
        assert!(!declared.contains("3008-NEW-0"));
    }
}
