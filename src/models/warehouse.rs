//! Warehouse models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A storage location that holds inventory records
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Warehouse {
    pub id: i64,
    pub address: String,
    pub created_at: DateTime<Utc>,
}
