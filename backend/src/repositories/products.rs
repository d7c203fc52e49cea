//! Catalog repository.

use async_trait::async_trait;
use chrono::Utc;
use sqlx::PgPool;
use uuid::Uuid;

use crate::error::AppError;
use crate::models::product::{Product, ProductUpdate};

const SELECT_COLUMNS: &str = "id, name, description, price_cents, image, created_at, updated_at";

#[async_trait]
pub trait ProductRepositoryTrait: Send + Sync {
    /// Catalog listing, newest first.
    async fn find_all(&self, db: &PgPool) -> Result<Vec<Product>, AppError>;
    async fn find_by_id(&self, db: &PgPool, id: Uuid) -> Result<Option<Product>, AppError>;
    async fn insert(&self, db: &PgPool, product: &Product) -> Result<Product, AppError>;
    /// Applies the non-`None` fields of `update`; untouched columns keep
    /// their values.
    async fn update(
        &self,
        db: &PgPool,
        id: Uuid,
        update: &ProductUpdate,
    ) -> Result<Option<Product>, AppError>;
    /// Returns `true` when a row was actually deleted.
    async fn delete(&self, db: &PgPool, id: Uuid) -> Result<bool, AppError>;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct ProductRepository;

impl ProductRepository {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl ProductRepositoryTrait for ProductRepository {
    async fn find_all(&self, db: &PgPool) -> Result<Vec<Product>, AppError> {
        let query = format!(
            "SELECT {} FROM products ORDER BY created_at DESC",
            SELECT_COLUMNS
        );
        let rows = sqlx::query_as::<_, Product>(&query).fetch_all(db).await?;
        Ok(rows)
    }

    async fn find_by_id(&self, db: &PgPool, id: Uuid) -> Result<Option<Product>, AppError> {
        let query = format!("SELECT {} FROM products WHERE id = $1", SELECT_COLUMNS);
        let row = sqlx::query_as::<_, Product>(&query)
            .bind(id)
            .fetch_optional(db)
            .await?;
        Ok(row)
    }

    async fn insert(&self, db: &PgPool, product: &Product) -> Result<Product, AppError> {
        let query = format!(
            "INSERT INTO products (id, name, description, price_cents, image, created_at, updated_at) \
             VALUES ($1, $2, $3, $4, $5, $6, $7) RETURNING {}",
            SELECT_COLUMNS
        );
        let row = sqlx::query_as::<_, Product>(&query)
            .bind(product.id)
            .bind(&product.name)
            .bind(&product.description)
            .bind(product.price_cents)
            .bind(&product.image)
            .bind(product.created_at)
            .bind(product.updated_at)
            .fetch_one(db)
            .await?;
        Ok(row)
    }

    async fn update(
        &self,
        db: &PgPool,
        id: Uuid,
        update: &ProductUpdate,
    ) -> Result<Option<Product>, AppError> {
        let query = format!(
            "UPDATE products SET \
                name = COALESCE($2, name), \
                description = COALESCE($3, description), \
                price_cents = COALESCE($4, price_cents), \
                image = COALESCE($5, image), \
                updated_at = $6 \
             WHERE id = $1 RETURNING {}",
            SELECT_COLUMNS
        );
        let row = sqlx::query_as::<_, Product>(&query)
            .bind(id)
            .bind(update.name.as_deref())
            .bind(update.description.as_deref())
            .bind(update.price_cents)
            .bind(update.image.as_deref())
            .bind(Utc::now())
            .fetch_optional(db)
            .await?;
        Ok(row)
    }

    async fn delete(&self, db: &PgPool, id: Uuid) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM products WHERE id = $1")
            .bind(id)
            .execute(db)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
