//! Analytics service; append-only sales facts and derived reports

use serde::Serialize;
use sqlx::PgPool;

use crate::error::{AppError, AppResult};
use crate::models::{ProductSales, SaleFact, WarehouseRevenue};
use crate::validation;

const DEFAULT_RANKING_LIMIT: i64 = 10;

/// Analytics service for recording sales and building reports
#[derive(Clone)]
pub struct AnalyticsService {
    db: PgPool,
}

impl AnalyticsService {
    /// Create a new AnalyticsService instance
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// Append one sale fact to the ledger.
    ///
    /// Facts are never validated against the inventory tables; the ledger
    /// accepts ids that no longer (or never did) resolve.
    pub async fn record_sale(&self, fact: SaleFact) -> AppResult<()> {
        validation::validate_sale_quantity(fact.quantity).map_err(|message| {
            AppError::Validation {
                field: "quantity".to_string(),
                message: message.to_string(),
            }
        })?;
        validation::validate_sale_amount(fact.total_amount).map_err(|message| {
            AppError::Validation {
                field: "total_amount".to_string(),
                message: message.to_string(),
            }
        })?;

        sqlx::query(
            r#"
            INSERT INTO analytics (warehouse_id, product_id, quantity, total_amount)
            VALUES ($1, $2, $3, $4)
            "#,
        )
        .bind(fact.warehouse_id)
        .bind(fact.product_id)
        .bind(fact.quantity)
        .bind(fact.total_amount)
        .execute(&self.db)
        .await?;

        Ok(())
    }

    /// Per-product sales totals for one warehouse, ordered by product name.
    ///
    /// Facts whose product id no longer resolves are dropped by the join.
    pub async fn sales_by_warehouse(&self, warehouse_id: i64) -> AppResult<Vec<ProductSales>> {
        let rows = sqlx::query_as::<_, ProductSales>(
            r#"
            SELECT p.name AS product_name,
                   COALESCE(SUM(a.quantity), 0)::BIGINT AS total_sold,
                   COALESCE(SUM(a.total_amount), 0) AS total_revenue
            FROM analytics a
            JOIN products p ON p.id = a.product_id
            WHERE a.warehouse_id = $1
            GROUP BY p.id, p.name
            ORDER BY p.name ASC, p.id ASC
            "#,
        )
        .bind(warehouse_id)
        .fetch_all(&self.db)
        .await?;

        Ok(rows)
    }

    /// Rank warehouses by recorded revenue, highest first.
    ///
    /// Warehouses with no facts appear with zero revenue; ties break on
    /// warehouse id ascending.
    pub async fn top_warehouses(&self, limit: Option<i64>) -> AppResult<Vec<WarehouseRevenue>> {
        let limit = match limit {
            Some(n) if n >= 1 => n,
            Some(_) => {
                return Err(AppError::Validation {
                    field: "limit".to_string(),
                    message: "limit must be at least 1".to_string(),
                })
            }
            None => DEFAULT_RANKING_LIMIT,
        };

        let rows = sqlx::query_as::<_, WarehouseRevenue>(
            r#"
            SELECT w.id AS warehouse_id,
                   w.address,
                   COALESCE(SUM(a.total_amount), 0) AS total_revenue
            FROM warehouses w
            LEFT JOIN analytics a ON a.warehouse_id = w.id
            GROUP BY w.id, w.address
            ORDER BY total_revenue DESC, w.id ASC
            LIMIT $1
            "#,
        )
        .bind(limit)
        .fetch_all(&self.db)
        .await?;

        Ok(rows)
    }

    /// Render a report as CSV with a header row
    pub fn export_to_csv<T: Serialize>(data: &[T]) -> AppResult<String> {
        let mut writer = csv::Writer::from_writer(vec![]);

        for record in data {
            writer.serialize(record).map_err(|e| {
                AppError::Internal(anyhow::anyhow!("CSV serialization error: {}", e))
            })?;
        }

        let bytes = writer
            .into_inner()
            .map_err(|e| AppError::Internal(anyhow::anyhow!("CSV writer error: {}", e)))?;

        String::from_utf8(bytes)
            .map_err(|e| AppError::Internal(anyhow::anyhow!("CSV encoding error: {}", e)))
    }
}
