//! Product service: creation and balance lookups

use chrono::{DateTime, Utc};
use shared::{validate_product_name, CreateProductInput, Product};
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use crate::error::{AppError, AppResult};

/// Product service for managing the product catalogue
#[derive(Clone)]
pub struct ProductService {
    db: PgPool,
}

/// Row for product queries
#[derive(Debug, FromRow)]
struct ProductRow {
    id: Uuid,
    name: String,
    count: i32,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<ProductRow> for Product {
    fn from(row: ProductRow) -> Self {
        Product {
            id: row.id,
            name: row.name,
            count: row.count,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

impl ProductService {
    /// Create a new ProductService instance
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// Create a product with a zero balance.
    ///
    /// An existing product with the same name is left untouched and the call
    /// fails with `DuplicateEntry`.
    pub async fn create_product(&self, input: CreateProductInput) -> AppResult<Product> {
        validate_product_name(&input.name).map_err(|msg| AppError::Validation {
            field: "name".to_string(),
            message: msg.to_string(),
        })?;

        let row = sqlx::query_as::<_, ProductRow>(
            r#"
            INSERT INTO products (name)
            VALUES ($1)
            ON CONFLICT (name) DO NOTHING
            RETURNING id, name, count, created_at, updated_at
            "#,
        )
        .bind(&input.name)
        .fetch_optional(&self.db)
        .await?;

        match row {
            Some(row) => {
                tracing::info!(product = %row.name, "Product created");
                Ok(row.into())
            }
            None => Err(AppError::DuplicateEntry(format!("Product [{}]", input.name))),
        }
    }

    /// List every product ordered by name
    pub async fn list_products(&self) -> AppResult<Vec<Product>> {
        let rows = sqlx::query_as::<_, ProductRow>(
            r#"
            SELECT id, name, count, created_at, updated_at
            FROM products
            ORDER BY name
            "#,
        )
        .fetch_all(&self.db)
        .await?;

        Ok(rows.into_iter().map(Product::from).collect())
    }

    /// Get a product by name
    pub async fn get_product(&self, name: &str) -> AppResult<Product> {
        let row = sqlx::query_as::<_, ProductRow>(
            r#"
            SELECT id, name, count, created_at, updated_at
            FROM products
            WHERE name = $1
            "#,
        )
        .bind(name)
        .fetch_optional(&self.db)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Product [{}]", name)))?;

        Ok(row.into())
    }
}
