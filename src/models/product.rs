//! Product catalog models

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A catalog product
///
/// `attributes` is a free-form characteristics mapping (key → value, e.g.
/// `{"color": "red"}`) persisted as an opaque JSONB blob.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Product {
    pub id: i64,
    pub name: String,
    pub description: String,
    pub attributes: serde_json::Map<String, serde_json::Value>,
    /// Weight of one unit in kg
    pub weight: Decimal,
    pub barcode: String,
    pub created_at: DateTime<Utc>,
}
