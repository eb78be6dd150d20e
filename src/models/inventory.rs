//! Inventory stock models

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A (product, warehouse) stock line
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct InventoryRecord {
    pub id: i64,
    pub product_id: i64,
    pub warehouse_id: i64,
    /// Units on hand; never negative
    pub quantity: i64,
    pub price: Decimal,
    /// Fractional price reduction in [0, 1], not a percent
    pub discount: Decimal,
    pub created_at: DateTime<Utc>,
}

/// Stock line as listed per warehouse
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct WarehouseStock {
    pub id: i64,
    pub product_id: i64,
    pub price: Decimal,
    pub discount: Decimal,
}
