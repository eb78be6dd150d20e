//! Error handling for the Unvent inventory service
//!
//! Every failure path funnels into [`AppError`]; the `IntoResponse` impl is
//! the single place where errors become HTTP responses and get logged.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

/// Application error types
#[derive(Error, Debug)]
pub enum AppError {
    // Input errors
    #[error("validation error on {field}: {message}")]
    Validation { field: String, message: String },

    #[error("{0} not found")]
    NotFound(String),

    #[error("duplicate entry: {0}")]
    DuplicateEntry(String),

    // Business logic errors
    #[error("insufficient stock for product {product_id} in warehouse {warehouse_id}: requested {requested}, available {available}")]
    InsufficientStock {
        product_id: i64,
        warehouse_id: i64,
        requested: i64,
        available: i64,
    },

    // Database errors
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    // Internal errors
    #[error("internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

/// Error response structure
#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: ErrorDetail,
}

#[derive(Serialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_detail) = match &self {
            AppError::Validation { field, message } => (
                StatusCode::BAD_REQUEST,
                ErrorDetail {
                    code: "VALIDATION_ERROR".to_string(),
                    message: message.clone(),
                    field: Some(field.clone()),
                },
            ),
            AppError::NotFound(resource) => (
                StatusCode::NOT_FOUND,
                ErrorDetail {
                    code: "NOT_FOUND".to_string(),
                    message: format!("{} not found", resource),
                    field: None,
                },
            ),
            AppError::DuplicateEntry(entry) => (
                StatusCode::CONFLICT,
                ErrorDetail {
                    code: "DUPLICATE_ENTRY".to_string(),
                    message: format!("a record for this {} already exists", entry),
                    field: None,
                },
            ),
            AppError::InsufficientStock { .. } => (
                StatusCode::BAD_REQUEST,
                ErrorDetail {
                    code: "INSUFFICIENT_STOCK".to_string(),
                    message: self.to_string(),
                    field: None,
                },
            ),
            // Store errors stay opaque to callers
            AppError::Database(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorDetail {
                    code: "DATABASE_ERROR".to_string(),
                    message: "a database error occurred".to_string(),
                    field: None,
                },
            ),
            AppError::Internal(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorDetail {
                    code: "INTERNAL_ERROR".to_string(),
                    message: "an internal server error occurred".to_string(),
                    field: None,
                },
            ),
        };

        tracing::error!("Error: {:?}", self);

        (status, Json(ErrorResponse { error: error_detail })).into_response()
    }
}

/// Result type alias for handlers and services
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    fn status_of(err: AppError) -> StatusCode {
        err.into_response().status()
    }

    #[test]
    fn validation_maps_to_400() {
        let err = AppError::Validation {
            field: "discount".to_string(),
            message: "discount must be a fraction between 0 and 1".to_string(),
        };
        assert_eq!(status_of(err), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn not_found_maps_to_404() {
        assert_eq!(
            status_of(AppError::NotFound("inventory record".to_string())),
            StatusCode::NOT_FOUND
        );
    }

    #[test]
    fn duplicate_entry_maps_to_409() {
        assert_eq!(
            status_of(AppError::DuplicateEntry(
                "(product, warehouse) pair".to_string()
            )),
            StatusCode::CONFLICT
        );
    }

    #[test]
    fn insufficient_stock_maps_to_400_and_names_the_item() {
        let err = AppError::InsufficientStock {
            product_id: 5,
            warehouse_id: 1,
            requested: 10,
            available: 3,
        };
        let message = err.to_string();
        assert!(message.contains("product 5"));
        assert!(message.contains("warehouse 1"));
        assert!(message.contains("requested 10"));
        assert!(message.contains("available 3"));
        assert_eq!(status_of(err), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn store_errors_map_to_opaque_500() {
        assert_eq!(
            status_of(AppError::Database(sqlx::Error::PoolTimedOut)),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
