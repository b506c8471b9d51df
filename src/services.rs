pub mod filter;
pub mod inventory_service;
pub use inventory_service::InventoryService;
pub mod upload_service;
pub use upload_service::UploadService;
pub mod family_service;
pub use family_service::FamilyService;
