//! HTTP handlers for analytics and reporting endpoints

use axum::{
    extract::{Path, Query, State},
    http::{header, StatusCode},
    response::IntoResponse,
    Json,
};
use serde::Deserialize;

use crate::error::AppResult;
use crate::models::SaleFact;
use crate::services::analytics::AnalyticsService;
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct ReportQuery {
    pub format: Option<String>, // "json" or "csv"
}

#[derive(Debug, Deserialize)]
pub struct RankingQuery {
    pub limit: Option<i64>,
    pub format: Option<String>,
}

/// Record one sale fact in the analytics ledger
pub async fn record_sale(
    State(state): State<AppState>,
    Json(fact): Json<SaleFact>,
) -> AppResult<StatusCode> {
    let service = AnalyticsService::new(state.db);
    service.record_sale(fact).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Per-product sales report for a warehouse
pub async fn get_warehouse_sales(
    State(state): State<AppState>,
    Path(warehouse_id): Path<i64>,
    Query(query): Query<ReportQuery>,
) -> AppResult<impl IntoResponse> {
    let service = AnalyticsService::new(state.db.clone());
    let data = service.sales_by_warehouse(warehouse_id).await?;

    if query.format.as_deref() == Some("csv") {
        let csv = AnalyticsService::export_to_csv(&data)?;
        Ok((
            [
                (header::CONTENT_TYPE, "text/csv"),
                (
                    header::CONTENT_DISPOSITION,
                    "attachment; filename=\"warehouse_sales.csv\"",
                ),
            ],
            csv,
        )
            .into_response())
    } else {
        Ok(Json(data).into_response())
    }
}

/// Revenue ranking across warehouses
pub async fn get_top_warehouses(
    State(state): State<AppState>,
    Query(query): Query<RankingQuery>,
) -> AppResult<impl IntoResponse> {
    let service = AnalyticsService::new(state.db.clone());
    let data = service.top_warehouses(query.limit).await?;

    if query.format.as_deref() == Some("csv") {
        let csv = AnalyticsService::export_to_csv(&data)?;
        Ok((
            [
                (header::CONTENT_TYPE, "text/csv"),
                (
                    header::CONTENT_DISPOSITION,
                    "attachment; filename=\"top_warehouses.csv\"",
                ),
            ],
            csv,
        )
            .into_response())
    } else {
        Ok(Json(data).into_response())
    }
}
