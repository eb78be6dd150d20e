//! Domain models for the Unvent inventory service

mod analytics;
mod inventory;
mod product;
mod warehouse;

pub use analytics::*;
pub use inventory::*;
pub use product::*;
pub use warehouse::*;
