//! HTTP handlers for inventory endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::Serialize;

use crate::error::AppResult;
use crate::models::{InventoryRecord, WarehouseStock};
use crate::services::inventory::{
    AdjustQuantityInput, ApplyDiscountInput, CreateInventoryInput, InventoryService, OrderRequest,
    OrderSummary, PurchaseReceipt,
};
use crate::AppState;

#[derive(Serialize)]
pub struct DiscountResponse {
    pub updated: u64,
}

/// Create an inventory record
pub async fn create_inventory(
    State(state): State<AppState>,
    Json(input): Json<CreateInventoryInput>,
) -> AppResult<(StatusCode, Json<InventoryRecord>)> {
    let service = InventoryService::new(state.db);
    let record = service.create_record(input).await?;
    Ok((StatusCode::CREATED, Json(record)))
}

/// Get a single inventory record
pub async fn get_inventory_record(
    State(state): State<AppState>,
    Path(record_id): Path<i64>,
) -> AppResult<Json<InventoryRecord>> {
    let service = InventoryService::new(state.db);
    let record = service.get_record(record_id).await?;
    Ok(Json(record))
}

/// Adjust a record's quantity by a signed delta
pub async fn adjust_inventory(
    State(state): State<AppState>,
    Path(record_id): Path<i64>,
    Json(input): Json<AdjustQuantityInput>,
) -> AppResult<Json<InventoryRecord>> {
    let service = InventoryService::new(state.db);
    let record = service.adjust_quantity(record_id, input.delta).await?;
    Ok(Json(record))
}

/// Apply one discount fraction across a set of products
pub async fn apply_discount(
    State(state): State<AppState>,
    Json(input): Json<ApplyDiscountInput>,
) -> AppResult<Json<DiscountResponse>> {
    let service = InventoryService::new(state.db);
    let updated = service.apply_discount(input).await?;
    Ok(Json(DiscountResponse { updated }))
}

/// List the stock a warehouse carries
pub async fn get_warehouse_stock(
    State(state): State<AppState>,
    Path(warehouse_id): Path<i64>,
) -> AppResult<Json<Vec<WarehouseStock>>> {
    let service = InventoryService::new(state.db);
    let stock = service.get_by_warehouse(warehouse_id).await?;
    Ok(Json(stock))
}

/// Price an order without committing it
pub async fn summarize_order(
    State(state): State<AppState>,
    Json(request): Json<OrderRequest>,
) -> AppResult<Json<OrderSummary>> {
    let service = InventoryService::new(state.db);
    let summary = service.compute_summary(request).await?;
    Ok(Json(summary))
}

/// Commit a purchase, decrementing stock atomically
pub async fn purchase(
    State(state): State<AppState>,
    Json(request): Json<OrderRequest>,
) -> AppResult<Json<PurchaseReceipt>> {
    let service = InventoryService::new(state.db);
    let receipt = service.purchase(request).await?;
    Ok(Json(receipt))
}
