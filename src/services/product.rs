//! Product catalog service

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Deserialize;
use sqlx::{FromRow, PgPool};

use crate::error::{AppError, AppResult};
use crate::models::Product;
use crate::validation;

/// Product service for catalog management
#[derive(Clone)]
pub struct ProductService {
    db: PgPool,
}

/// Input for creating a product
#[derive(Debug, Deserialize)]
pub struct CreateProductInput {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub attributes: serde_json::Map<String, serde_json::Value>,
    pub weight: Decimal,
    #[serde(default)]
    pub barcode: String,
}

/// Input for updating a product; only description and attributes are mutable
#[derive(Debug, Deserialize)]
pub struct UpdateProductInput {
    pub description: Option<String>,
    pub attributes: Option<serde_json::Map<String, serde_json::Value>>,
}

/// Row shape for the products table; attributes stay raw JSONB here
#[derive(Debug, FromRow)]
struct ProductRow {
    id: i64,
    name: String,
    description: String,
    attributes: serde_json::Value,
    weight: Decimal,
    barcode: String,
    created_at: DateTime<Utc>,
}

impl From<ProductRow> for Product {
    fn from(row: ProductRow) -> Self {
        let attributes = match row.attributes {
            serde_json::Value::Object(map) => map,
            _ => serde_json::Map::new(),
        };
        Product {
            id: row.id,
            name: row.name,
            description: row.description,
            attributes,
            weight: row.weight,
            barcode: row.barcode,
            created_at: row.created_at,
        }
    }
}

impl ProductService {
    /// Create a new ProductService instance
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// Create a product; attributes are persisted as an opaque JSONB blob
    pub async fn create_product(&self, input: CreateProductInput) -> AppResult<Product> {
        validation::validate_product_name(&input.name).map_err(|message| AppError::Validation {
            field: "name".to_string(),
            message: message.to_string(),
        })?;
        validation::validate_weight(input.weight).map_err(|message| AppError::Validation {
            field: "weight".to_string(),
            message: message.to_string(),
        })?;

        let row = sqlx::query_as::<_, ProductRow>(
            r#"
            INSERT INTO products (name, description, attributes, weight, barcode)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, name, description, attributes, weight, barcode, created_at
            "#,
        )
        .bind(input.name.trim())
        .bind(&input.description)
        .bind(serde_json::Value::Object(input.attributes.clone()))
        .bind(input.weight)
        .bind(&input.barcode)
        .fetch_one(&self.db)
        .await?;

        Ok(row.into())
    }

    /// List all products with attributes deserialized back to a mapping
    pub async fn list_products(&self) -> AppResult<Vec<Product>> {
        let rows = sqlx::query_as::<_, ProductRow>(
            r#"
            SELECT id, name, description, attributes, weight, barcode, created_at
            FROM products
            ORDER BY id
            "#,
        )
        .fetch_all(&self.db)
        .await?;

        Ok(rows.into_iter().map(Product::from).collect())
    }

    /// Update a product's description and/or attributes
    pub async fn update_product(
        &self,
        product_id: i64,
        input: UpdateProductInput,
    ) -> AppResult<Product> {
        let attributes = input.attributes.map(serde_json::Value::Object);

        let row = sqlx::query_as::<_, ProductRow>(
            r#"
            UPDATE products
            SET description = COALESCE($1, description),
                attributes = COALESCE($2, attributes)
            WHERE id = $3
            RETURNING id, name, description, attributes, weight, barcode, created_at
            "#,
        )
        .bind(&input.description)
        .bind(attributes)
        .bind(product_id)
        .fetch_optional(&self.db)
        .await?
        .ok_or_else(|| AppError::NotFound("product".to_string()))?;

        Ok(row.into())
    }
}
