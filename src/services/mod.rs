//! Business logic services for the Unvent inventory service

pub mod analytics;
pub mod inventory;
pub mod product;
pub mod warehouse;

pub use analytics::AnalyticsService;
pub use inventory::InventoryService;
pub use product::ProductService;
pub use warehouse::WarehouseService;
