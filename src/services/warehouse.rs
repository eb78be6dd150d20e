//! Warehouse management service

use serde::Deserialize;
use sqlx::PgPool;

use crate::error::{AppError, AppResult};
use crate::models::Warehouse;
use crate::validation;

/// Warehouse service for managing storage locations
#[derive(Clone)]
pub struct WarehouseService {
    db: PgPool,
}

/// Input for creating a warehouse
#[derive(Debug, Deserialize)]
pub struct CreateWarehouseInput {
    pub address: String,
}

impl WarehouseService {
    /// Create a new WarehouseService instance
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// Create a warehouse
    pub async fn create_warehouse(&self, input: CreateWarehouseInput) -> AppResult<Warehouse> {
        validation::validate_address(&input.address).map_err(|message| AppError::Validation {
            field: "address".to_string(),
            message: message.to_string(),
        })?;

        let warehouse = sqlx::query_as::<_, Warehouse>(
            "INSERT INTO warehouses (address) VALUES ($1) RETURNING id, address, created_at",
        )
        .bind(input.address.trim())
        .fetch_one(&self.db)
        .await?;

        Ok(warehouse)
    }

    /// List all warehouses in insertion order
    pub async fn list_warehouses(&self) -> AppResult<Vec<Warehouse>> {
        let warehouses = sqlx::query_as::<_, Warehouse>(
            "SELECT id, address, created_at FROM warehouses ORDER BY id",
        )
        .fetch_all(&self.db)
        .await?;

        Ok(warehouses)
    }
}
