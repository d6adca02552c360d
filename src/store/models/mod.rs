pub mod asset;
pub mod catalog;
pub mod declaration;
pub mod inventory;

pub use asset::{AssetDetails, AssetRecord};
pub use catalog::{AssetType, Location, Warehouse};
pub use declaration::{
    DeclarationDraft, DraftItem, Registration, RegistrationDetail, RegistrationItem,
    RegistrationStatus,
};
pub use inventory::{InventoryItem, InventoryTask, InventoryTaskDetail, TaskStatus};
