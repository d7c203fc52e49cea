//! Order repository. Finalization runs in one transaction so a crash can
//! never leave an order without its items or a half-cleared cart.

use async_trait::async_trait;
use chrono::Utc;
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use crate::error::AppError;
use crate::models::order::{Order, OrderItemProduct, OrderItemView, OrderView};

/// A cart line with the live product price, as read at finalization time.
#[derive(Debug, FromRow)]
struct CartLine {
    id: Uuid,
    product_id: Uuid,
    quantity: i32,
    price_cents: i64,
}

/// Flat row shape for the order items + products display join.
#[derive(Debug, FromRow)]
struct OrderItemJoinRow {
    id: Uuid,
    order_id: Uuid,
    product_id: Option<Uuid>,
    quantity: i32,
    price_cents: i64,
    product_name: Option<String>,
    product_price_cents: Option<i64>,
    product_image: Option<String>,
}

impl From<OrderItemJoinRow> for OrderItemView {
    fn from(row: OrderItemJoinRow) -> Self {
        let product = match (row.product_name, row.product_price_cents, row.product_image) {
            (Some(name), Some(price_cents), Some(image)) => Some(OrderItemProduct {
                name,
                price_cents,
                image,
            }),
            _ => None,
        };
        OrderItemView {
            id: row.id,
            product_id: row.product_id,
            quantity: row.quantity,
            price_cents: row.price_cents,
            product,
        }
    }
}

#[async_trait]
pub trait OrderRepositoryTrait: Send + Sync {
    /// Converts the cart's current contents into an order with price
    /// snapshots and clears those line items, all in one transaction.
    /// An empty cart still yields a zero-total order.
    async fn finalize_cart(
        &self,
        db: &PgPool,
        user_id: Uuid,
        cart_id: Uuid,
    ) -> Result<Order, AppError>;

    /// All orders owned by the user, newest first, with line items and the
    /// referenced product's current display fields.
    async fn list_for_user(&self, db: &PgPool, user_id: Uuid) -> Result<Vec<OrderView>, AppError>;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct OrderRepository;

impl OrderRepository {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl OrderRepositoryTrait for OrderRepository {
    async fn finalize_cart(
        &self,
        db: &PgPool,
        user_id: Uuid,
        cart_id: Uuid,
    ) -> Result<Order, AppError> {
        let mut tx = db.begin().await?;

        let lines = sqlx::query_as::<_, CartLine>(
            "SELECT ci.id, ci.product_id, ci.quantity, p.price_cents \
             FROM cart_items ci \
             JOIN products p ON p.id = ci.product_id \
             WHERE ci.cart_id = $1 \
             ORDER BY ci.created_at",
        )
        .bind(cart_id)
        .fetch_all(&mut *tx)
        .await?;

        let total_cents: i64 = lines
            .iter()
            .map(|line| line.price_cents * i64::from(line.quantity))
            .sum();

        let now = Utc::now();
        let order = sqlx::query_as::<_, Order>(
            "INSERT INTO orders (id, user_id, total_cents, created_at) \
             VALUES ($1, $2, $3, $4) RETURNING id, user_id, total_cents, created_at",
        )
        .bind(Uuid::new_v4())
        .bind(user_id)
        .bind(total_cents)
        .bind(now)
        .fetch_one(&mut *tx)
        .await?;

        for line in &lines {
            sqlx::query(
                "INSERT INTO order_items (id, order_id, product_id, quantity, price_cents, created_at) \
                 VALUES ($1, $2, $3, $4, $5, $6)",
            )
            .bind(Uuid::new_v4())
            .bind(order.id)
            .bind(line.product_id)
            .bind(line.quantity)
            .bind(line.price_cents)
            .bind(now)
            .execute(&mut *tx)
            .await?;
        }

        // Delete exactly the lines that went into the order; an item added
        // concurrently after the read above survives for the next checkout.
        let line_ids: Vec<Uuid> = lines.iter().map(|line| line.id).collect();
        sqlx::query("DELETE FROM cart_items WHERE cart_id = $1 AND id = ANY($2)")
            .bind(cart_id)
            .bind(&line_ids)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(order)
    }

    async fn list_for_user(&self, db: &PgPool, user_id: Uuid) -> Result<Vec<OrderView>, AppError> {
        let orders = sqlx::query_as::<_, Order>(
            "SELECT id, user_id, total_cents, created_at FROM orders \
             WHERE user_id = $1 ORDER BY created_at DESC",
        )
        .bind(user_id)
        .fetch_all(db)
        .await?;

        if orders.is_empty() {
            return Ok(Vec::new());
        }

        let order_ids: Vec<Uuid> = orders.iter().map(|order| order.id).collect();
        let item_rows = sqlx::query_as::<_, OrderItemJoinRow>(
            "SELECT oi.id, oi.order_id, oi.product_id, oi.quantity, oi.price_cents, \
                    p.name AS product_name, p.price_cents AS product_price_cents, \
                    p.image AS product_image \
             FROM order_items oi \
             LEFT JOIN products p ON p.id = oi.product_id \
             WHERE oi.order_id = ANY($1) \
             ORDER BY oi.created_at",
        )
        .bind(&order_ids)
        .fetch_all(db)
        .await?;

        let mut views: Vec<OrderView> = orders
            .into_iter()
            .map(|order| OrderView {
                id: order.id,
                user_id: order.user_id,
                total_cents: order.total_cents,
                created_at: order.created_at,
                items: Vec::new(),
            })
            .collect();

        for row in item_rows {
            let order_id = row.order_id;
            if let Some(view) = views.iter_mut().find(|view| view.id == order_id) {
                view.items.push(OrderItemView::from(row));
            }
        }

        Ok(views)
    }
}
