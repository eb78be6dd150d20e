//! Sales analytics models

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// One recorded sale/movement event, append-only
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SaleFact {
    pub warehouse_id: i64,
    pub product_id: i64,
    pub quantity: i64,
    pub total_amount: Decimal,
}

/// Per-product sales totals for one warehouse
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ProductSales {
    pub product_name: String,
    pub total_sold: i64,
    pub total_revenue: Decimal,
}

/// Revenue ranking entry, computed on demand and never stored
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct WarehouseRevenue {
    pub warehouse_id: i64,
    pub address: String,
    pub total_revenue: Decimal,
}
