//! Route definitions for the warehouse inventory service

use axum::{
    routing::{get, post, put},
    Router,
};

use crate::{handlers, AppState};

/// Create API routes
pub fn api_routes() -> Router<AppState> {
    Router::new()
        // Health check
        .route("/health", get(handlers::health_check))
        // Warehouse management
        .nest("/warehouses", warehouse_routes())
        // Product catalog
        .nest("/products", product_routes())
        // Stock and purchasing
        .nest("/inventory", inventory_routes())
        // Sales ledger and reports
        .nest("/analytics", analytics_routes())
        // Revenue ranking
        .route("/top-warehouses", get(handlers::get_top_warehouses))
}

/// Warehouse management routes
fn warehouse_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::list_warehouses))
        .route("/create", post(handlers::create_warehouse))
}

/// Product catalog routes
fn product_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::list_products))
        .route("/create", post(handlers::create_product))
        .route("/update/:product_id", put(handlers::update_product))
}

/// Stock and purchasing routes
fn inventory_routes() -> Router<AppState> {
    Router::new()
        .route("/create", post(handlers::create_inventory))
        .route("/discount", post(handlers::apply_discount))
        .route("/summary", post(handlers::summarize_order))
        .route("/purchase", post(handlers::purchase))
        .route(
            "/warehouse/:warehouse_id",
            get(handlers::get_warehouse_stock),
        )
        .route(
            "/:record_id",
            get(handlers::get_inventory_record).put(handlers::adjust_inventory),
        )
}

/// Sales ledger routes
fn analytics_routes() -> Router<AppState> {
    Router::new()
        .route("/", put(handlers::record_sale))
        .route(
            "/warehouse/:warehouse_id",
            get(handlers::get_warehouse_sales),
        )
}
