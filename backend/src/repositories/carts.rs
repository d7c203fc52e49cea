//! Cart repository. The unique (cart_id, product_id) pair backs the merge
//! semantics: repeated adds collapse into a single quantity-accumulating
//! upsert instead of a read-modify-write.

use async_trait::async_trait;
use chrono::Utc;
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use crate::error::AppError;
use crate::models::cart::{Cart, CartItemProduct, CartItemView};

/// Flat row shape for the cart items + products join.
#[derive(Debug, FromRow)]
struct CartItemJoinRow {
    id: Uuid,
    quantity: i32,
    product_id: Uuid,
    product_name: String,
    product_description: String,
    product_price_cents: i64,
    product_image: String,
}

impl From<CartItemJoinRow> for CartItemView {
    fn from(row: CartItemJoinRow) -> Self {
        CartItemView {
            id: row.id,
            product_id: row.product_id,
            quantity: row.quantity,
            product: CartItemProduct {
                id: row.product_id,
                name: row.product_name,
                description: row.product_description,
                price_cents: row.product_price_cents,
                image: row.product_image,
            },
        }
    }
}

#[async_trait]
pub trait CartRepositoryTrait: Send + Sync {
    async fn find_by_user(&self, db: &PgPool, user_id: Uuid) -> Result<Option<Cart>, AppError>;
    /// Lazily creates the user's cart on first access. Idempotent.
    async fn get_or_create(&self, db: &PgPool, user_id: Uuid) -> Result<Cart, AppError>;
    async fn items_with_products(
        &self,
        db: &PgPool,
        cart_id: Uuid,
    ) -> Result<Vec<CartItemView>, AppError>;
    /// Inserts the line item or accumulates quantity onto the existing one,
    /// in a single atomic statement.
    async fn upsert_item(
        &self,
        db: &PgPool,
        cart_id: Uuid,
        product_id: Uuid,
        quantity: i32,
    ) -> Result<(), AppError>;
    /// Deletes one line item scoped to the cart; returns rows affected so
    /// the caller can distinguish "not yours" from "gone".
    async fn delete_item(&self, db: &PgPool, cart_id: Uuid, item_id: Uuid)
        -> Result<u64, AppError>;
    async fn clear_items(&self, db: &PgPool, cart_id: Uuid) -> Result<(), AppError>;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct CartRepository;

impl CartRepository {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl CartRepositoryTrait for CartRepository {
    async fn find_by_user(&self, db: &PgPool, user_id: Uuid) -> Result<Option<Cart>, AppError> {
        let cart = sqlx::query_as::<_, Cart>(
            "SELECT id, user_id, created_at FROM carts WHERE user_id = $1",
        )
        .bind(user_id)
        .fetch_optional(db)
        .await?;
        Ok(cart)
    }

    async fn get_or_create(&self, db: &PgPool, user_id: Uuid) -> Result<Cart, AppError> {
        // Concurrent first reads race on the insert; ON CONFLICT DO NOTHING
        // lets the loser fall through to the select.
        sqlx::query("INSERT INTO carts (id, user_id, created_at) VALUES ($1, $2, $3) ON CONFLICT (user_id) DO NOTHING")
            .bind(Uuid::new_v4())
            .bind(user_id)
            .bind(Utc::now())
            .execute(db)
            .await?;

        let cart = self
            .find_by_user(db, user_id)
            .await?
            .ok_or_else(|| AppError::InternalServerError(anyhow::anyhow!("cart vanished after upsert")))?;
        Ok(cart)
    }

    async fn items_with_products(
        &self,
        db: &PgPool,
        cart_id: Uuid,
    ) -> Result<Vec<CartItemView>, AppError> {
        let rows = sqlx::query_as::<_, CartItemJoinRow>(
            "SELECT ci.id, ci.quantity, p.id AS product_id, p.name AS product_name, \
                    p.description AS product_description, p.price_cents AS product_price_cents, \
                    p.image AS product_image \
             FROM cart_items ci \
             JOIN products p ON p.id = ci.product_id \
             WHERE ci.cart_id = $1 \
             ORDER BY ci.created_at",
        )
        .bind(cart_id)
        .fetch_all(db)
        .await?;
        Ok(rows.into_iter().map(CartItemView::from).collect())
    }

    async fn upsert_item(
        &self,
        db: &PgPool,
        cart_id: Uuid,
        product_id: Uuid,
        quantity: i32,
    ) -> Result<(), AppError> {
        sqlx::query(
            "INSERT INTO cart_items (id, cart_id, product_id, quantity, created_at) \
             VALUES ($1, $2, $3, $4, $5) \
             ON CONFLICT (cart_id, product_id) \
             DO UPDATE SET quantity = cart_items.quantity + EXCLUDED.quantity",
        )
        .bind(Uuid::new_v4())
        .bind(cart_id)
        .bind(product_id)
        .bind(quantity)
        .bind(Utc::now())
        .execute(db)
        .await?;
        Ok(())
    }

    async fn delete_item(
        &self,
        db: &PgPool,
        cart_id: Uuid,
        item_id: Uuid,
    ) -> Result<u64, AppError> {
        let result = sqlx::query("DELETE FROM cart_items WHERE id = $1 AND cart_id = $2")
            .bind(item_id)
            .bind(cart_id)
            .execute(db)
            .await?;
        Ok(result.rows_affected())
    }

    async fn clear_items(&self, db: &PgPool, cart_id: Uuid) -> Result<(), AppError> {
        sqlx::query("DELETE FROM cart_items WHERE cart_id = $1")
            .bind(cart_id)
            .execute(db)
            .await?;
        Ok(())
    }
}
