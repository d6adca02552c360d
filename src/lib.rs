pub mod auth;
pub mod config;
pub mod declaration;
pub mod discovery;
pub mod events;
pub mod inventory;
pub mod lookup;
pub mod reconcile;
pub mod store;

use std::sync::Arc;

use log::info;

pub use auth::AuthService;
pub use config::{AppConfig, DiscoveryConfig, LatencyConfig};
pub use declaration::DeclarationController;
pub use events::{AppEvent, EventBus};
pub use inventory::{InventoryRepository, InventoryScanController};
pub use lookup::LookupService;
pub use reconcile::{Classification, ScanResult, SessionPhase, SessionSnapshot};
pub use store::Store;

/// Shared state for one running app instance: the seeded mock store, the
/// event bus the presentation layer subscribes to, and a controller per
/// feature area.
pub struct App {
    pub store: Store,
    pub events: EventBus,
    pub auth: AuthService,
    pub inventory: InventoryScanController,
    pub declarations: DeclarationController,
    pub lookup: LookupService,
}

impl App {
    pub fn new(config: AppConfig) -> Self {
        let events = EventBus::new();
        let store = Store::seeded(config.latency.clone());
        let auth = AuthService::new(config.latency.login);

        let inventory = InventoryScanController::new(
            Arc::new(store.clone()),
            events.clone(),
            config.discovery.clone(),
        );
        let declarations = DeclarationController::new(
            store.clone(),
            auth.clone(),
            events.clone(),
            config.discovery.clone(),
        );
        let lookup = LookupService::new(store.clone(), events.clone());

        info!("warehouse operations core ready");

        Self {
            store,
            events,
            auth,
            inventory,
            declarations,
            lookup,
        }
    }
}

impl Default for App {
    fn default() -> Self {
        Self::new(AppConfig::default())
    }
}

/// Initialize logging for embedders (reads `RUST_LOG`). Call once at startup.
pub fn init_logging() {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();
}
