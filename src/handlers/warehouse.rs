//! HTTP handlers for warehouse endpoints

use axum::{extract::State, http::StatusCode, Json};

use crate::error::AppResult;
use crate::models::Warehouse;
use crate::services::warehouse::{CreateWarehouseInput, WarehouseService};
use crate::AppState;

/// Register a new warehouse
pub async fn create_warehouse(
    State(state): State<AppState>,
    Json(input): Json<CreateWarehouseInput>,
) -> AppResult<(StatusCode, Json<Warehouse>)> {
    let service = WarehouseService::new(state.db);
    let warehouse = service.create_warehouse(input).await?;
    Ok((StatusCode::CREATED, Json(warehouse)))
}

/// List all warehouses
pub async fn list_warehouses(State(state): State<AppState>) -> AppResult<Json<Vec<Warehouse>>> {
    let service = WarehouseService::new(state.db);
    let warehouses = service.list_warehouses().await?;
    Ok(Json(warehouses))
}
