pub mod controller;
pub mod repository;

pub use controller::InventoryScanController;
pub use repository::InventoryRepository;
