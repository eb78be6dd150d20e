//! Inventory service; stock levels, pricing, and the purchase pipeline

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};

use crate::error::{AppError, AppResult};
use crate::models::{InventoryRecord, WarehouseStock};
use crate::validation;

/// Inventory service for stock management and purchasing
#[derive(Clone)]
pub struct InventoryService {
    db: PgPool,
}

/// Input for creating an inventory record
#[derive(Debug, Deserialize)]
pub struct CreateInventoryInput {
    pub product_id: i64,
    pub warehouse_id: i64,
    pub quantity: i64,
    pub price: Decimal,
    #[serde(default)]
    pub discount: Decimal,
}

/// Input for adjusting the stock level of a single record
#[derive(Debug, Deserialize)]
pub struct AdjustQuantityInput {
    pub delta: i64,
}

/// Input for applying one discount fraction across products
#[derive(Debug, Deserialize)]
pub struct ApplyDiscountInput {
    pub discount: Decimal,
    pub product_ids: Vec<i64>,
}

/// One requested line of an order, for both summaries and purchases
#[derive(Debug, Deserialize)]
pub struct OrderItem {
    pub product_id: i64,
    pub quantity: i64,
}

/// An order against a single warehouse
#[derive(Debug, Deserialize)]
pub struct OrderRequest {
    pub warehouse_id: i64,
    pub items: Vec<OrderItem>,
}

/// Price quote for a hypothetical order; discounts are not applied
#[derive(Debug, Serialize)]
pub struct OrderSummary {
    pub warehouse_id: i64,
    pub total: Decimal,
}

/// One fulfilled line of a committed purchase
#[derive(Debug, Serialize)]
pub struct PurchaseLine {
    pub product_id: i64,
    pub quantity: i64,
    pub remaining: i64,
    pub line_total: Decimal,
}

/// Receipt for a committed purchase
#[derive(Debug, Serialize)]
pub struct PurchaseReceipt {
    pub warehouse_id: i64,
    pub lines: Vec<PurchaseLine>,
    pub total: Decimal,
}

/// Row returned by the conditional decrement inside a purchase
#[derive(Debug, FromRow)]
struct DecrementRow {
    quantity: i64,
    price: Decimal,
}

impl InventoryService {
    /// Create a new InventoryService instance
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// Create an inventory record linking a product to a warehouse
    pub async fn create_record(&self, input: CreateInventoryInput) -> AppResult<InventoryRecord> {
        validation::validate_initial_quantity(input.quantity).map_err(|message| {
            AppError::Validation {
                field: "quantity".to_string(),
                message: message.to_string(),
            }
        })?;
        validation::validate_price(input.price).map_err(|message| AppError::Validation {
            field: "price".to_string(),
            message: message.to_string(),
        })?;
        validation::validate_discount_fraction(input.discount).map_err(|message| {
            AppError::Validation {
                field: "discount".to_string(),
                message: message.to_string(),
            }
        })?;

        let product_exists: bool =
            sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM products WHERE id = $1)")
                .bind(input.product_id)
                .fetch_one(&self.db)
                .await?;
        if !product_exists {
            return Err(AppError::NotFound("product".to_string()));
        }

        let warehouse_exists: bool =
            sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM warehouses WHERE id = $1)")
                .bind(input.warehouse_id)
                .fetch_one(&self.db)
                .await?;
        if !warehouse_exists {
            return Err(AppError::NotFound("warehouse".to_string()));
        }

        let record = sqlx::query_as::<_, InventoryRecord>(
            r#"
            INSERT INTO inventory (product_id, warehouse_id, quantity, price, discount)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, product_id, warehouse_id, quantity, price, discount, created_at
            "#,
        )
        .bind(input.product_id)
        .bind(input.warehouse_id)
        .bind(input.quantity)
        .bind(input.price)
        .bind(input.discount)
        .fetch_one(&self.db)
        .await
        .map_err(|err| match &err {
            sqlx::Error::Database(db_err)
                if db_err.constraint() == Some("inventory_product_warehouse_key") =>
            {
                AppError::DuplicateEntry(
                    "inventory record already exists for this product and warehouse".to_string(),
                )
            }
            _ => AppError::from(err),
        })?;

        Ok(record)
    }

    /// Fetch a single inventory record by id
    pub async fn get_record(&self, record_id: i64) -> AppResult<InventoryRecord> {
        sqlx::query_as::<_, InventoryRecord>(
            r#"
            SELECT id, product_id, warehouse_id, quantity, price, discount, created_at
            FROM inventory
            WHERE id = $1
            "#,
        )
        .bind(record_id)
        .fetch_optional(&self.db)
        .await?
        .ok_or_else(|| AppError::NotFound("inventory record".to_string()))
    }

    /// Adjust the quantity of a record by a signed delta.
    ///
    /// The guard in the WHERE clause keeps the stored quantity from going
    /// negative even when adjustments race.
    pub async fn adjust_quantity(&self, record_id: i64, delta: i64) -> AppResult<InventoryRecord> {
        let updated = sqlx::query_as::<_, InventoryRecord>(
            r#"
            UPDATE inventory
            SET quantity = quantity + $1
            WHERE id = $2 AND quantity + $1 >= 0
            RETURNING id, product_id, warehouse_id, quantity, price, discount, created_at
            "#,
        )
        .bind(delta)
        .bind(record_id)
        .fetch_optional(&self.db)
        .await?;

        match updated {
            Some(record) => Ok(record),
            None => {
                let exists: bool =
                    sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM inventory WHERE id = $1)")
                        .bind(record_id)
                        .fetch_one(&self.db)
                        .await?;
                if exists {
                    Err(AppError::Validation {
                        field: "delta".to_string(),
                        message: "adjustment would make quantity negative".to_string(),
                    })
                } else {
                    Err(AppError::NotFound("inventory record".to_string()))
                }
            }
        }
    }

    /// Set the discount fraction on every record for the given products.
    ///
    /// Returns the number of records updated. Unknown product ids simply
    /// match nothing.
    pub async fn apply_discount(&self, input: ApplyDiscountInput) -> AppResult<u64> {
        validation::validate_discount_fraction(input.discount).map_err(|message| {
            AppError::Validation {
                field: "discount".to_string(),
                message: message.to_string(),
            }
        })?;

        if input.product_ids.is_empty() {
            return Ok(0);
        }

        let result = sqlx::query("UPDATE inventory SET discount = $1 WHERE product_id = ANY($2)")
            .bind(input.discount)
            .bind(&input.product_ids)
            .execute(&self.db)
            .await?;

        Ok(result.rows_affected())
    }

    /// List the stock a warehouse carries, ordered by product id
    pub async fn get_by_warehouse(&self, warehouse_id: i64) -> AppResult<Vec<WarehouseStock>> {
        let rows = sqlx::query_as::<_, WarehouseStock>(
            r#"
            SELECT id, product_id, price, discount
            FROM inventory
            WHERE warehouse_id = $1
            ORDER BY product_id
            "#,
        )
        .bind(warehouse_id)
        .fetch_all(&self.db)
        .await?;

        Ok(rows)
    }

    /// Price a hypothetical order without touching stock.
    ///
    /// The total is the undiscounted sum of price times quantity for each
    /// line. An empty order totals zero.
    pub async fn compute_summary(&self, request: OrderRequest) -> AppResult<OrderSummary> {
        let mut total = Decimal::ZERO;

        for item in &request.items {
            validation::validate_order_quantity(item.quantity).map_err(|message| {
                AppError::Validation {
                    field: "quantity".to_string(),
                    message: message.to_string(),
                }
            })?;

            let price: Decimal = sqlx::query_scalar(
                "SELECT price FROM inventory WHERE warehouse_id = $1 AND product_id = $2",
            )
            .bind(request.warehouse_id)
            .bind(item.product_id)
            .fetch_optional(&self.db)
            .await?
            .ok_or_else(|| {
                AppError::NotFound(format!(
                    "inventory record for product {} in warehouse {}",
                    item.product_id, request.warehouse_id
                ))
            })?;

            let line_total = Self::line_total(price, item.quantity)?;
            total = total.checked_add(line_total).ok_or_else(order_too_large)?;
        }

        Ok(OrderSummary {
            warehouse_id: request.warehouse_id,
            total,
        })
    }

    /// Price one order line; totals past the range of the money type are
    /// rejected rather than computed wrong
    pub fn line_total(price: Decimal, quantity: i64) -> AppResult<Decimal> {
        price
            .checked_mul(Decimal::from(quantity))
            .ok_or_else(order_too_large)
    }

    /// Item positions in row-lock order.
    ///
    /// Purchases decrement in ascending product id, so two orders naming
    /// overlapping products always take their row locks in the same
    /// sequence and cannot deadlock each other.
    pub fn decrement_order(items: &[OrderItem]) -> Vec<usize> {
        let mut order: Vec<usize> = (0..items.len()).collect();
        order.sort_by_key(|&position| items[position].product_id);
        order
    }

    /// Commit a purchase atomically.
    ///
    /// All decrements run inside one transaction, in product id order so
    /// concurrent purchases over the same rows queue on the locks instead
    /// of deadlocking. Each line uses a conditional update that only fires
    /// when enough stock remains, so concurrent purchases can never drive
    /// a quantity negative. If any line cannot be satisfied the whole
    /// transaction rolls back and the caller learns what was available.
    /// Receipt lines come back in the order they were requested.
    pub async fn purchase(&self, request: OrderRequest) -> AppResult<PurchaseReceipt> {
        if request.items.is_empty() {
            return Err(AppError::Validation {
                field: "items".to_string(),
                message: "at least one item is required".to_string(),
            });
        }
        for item in &request.items {
            validation::validate_order_quantity(item.quantity).map_err(|message| {
                AppError::Validation {
                    field: "quantity".to_string(),
                    message: message.to_string(),
                }
            })?;
        }

        let mut tx = self.db.begin().await?;

        let mut lines: Vec<(usize, PurchaseLine)> = Vec::with_capacity(request.items.len());
        let mut total = Decimal::ZERO;

        for position in Self::decrement_order(&request.items) {
            let item = &request.items[position];
            let decremented = sqlx::query_as::<_, DecrementRow>(
                r#"
                UPDATE inventory
                SET quantity = quantity - $1
                WHERE warehouse_id = $2 AND product_id = $3 AND quantity >= $1
                RETURNING quantity, price
                "#,
            )
            .bind(item.quantity)
            .bind(request.warehouse_id)
            .bind(item.product_id)
            .fetch_optional(&mut *tx)
            .await?;

            let row = match decremented {
                Some(row) => row,
                None => {
                    // Missing record and short stock both land here; report
                    // whatever quantity the warehouse actually has.
                    let available: Option<i64> = sqlx::query_scalar(
                        "SELECT quantity FROM inventory WHERE warehouse_id = $1 AND product_id = $2",
                    )
                    .bind(request.warehouse_id)
                    .bind(item.product_id)
                    .fetch_optional(&mut *tx)
                    .await?;

                    return Err(AppError::InsufficientStock {
                        product_id: item.product_id,
                        warehouse_id: request.warehouse_id,
                        requested: item.quantity,
                        available: available.unwrap_or(0),
                    });
                }
            };

            let line_total = Self::line_total(row.price, item.quantity)?;
            total = total.checked_add(line_total).ok_or_else(order_too_large)?;
            lines.push((
                position,
                PurchaseLine {
                    product_id: item.product_id,
                    quantity: item.quantity,
                    remaining: row.quantity,
                    line_total,
                },
            ));
        }

        tx.commit().await?;

        lines.sort_by_key(|&(position, _)| position);

        Ok(PurchaseReceipt {
            warehouse_id: request.warehouse_id,
            lines: lines.into_iter().map(|(_, line)| line).collect(),
            total,
        })
    }
}

fn order_too_large() -> AppError {
    AppError::Validation {
        field: "items".to_string(),
        message: "order total is too large".to_string(),
    }
}
