//! Order models. Orders are immutable once created; item prices are
//! snapshots taken at finalization time, decoupled from the live catalog.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Order {
    pub id: Uuid,
    pub user_id: Uuid,
    pub total_cents: i64,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct OrderItem {
    pub id: Uuid,
    pub order_id: Uuid,
    /// Null when the product has since been removed from the catalog.
    pub product_id: Option<Uuid>,
    pub quantity: i32,
    /// Snapshot price; authoritative for the order total.
    pub price_cents: i64,
    pub created_at: DateTime<Utc>,
}

/// Current catalog fields joined in for display only.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct OrderItemProduct {
    pub name: String,
    pub price_cents: i64,
    pub image: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct OrderItemView {
    pub id: Uuid,
    pub product_id: Option<Uuid>,
    pub quantity: i32,
    pub price_cents: i64,
    pub product: Option<OrderItemProduct>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct OrderView {
    pub id: Uuid,
    pub user_id: Uuid,
    pub total_cents: i64,
    pub created_at: DateTime<Utc>,
    pub items: Vec<OrderItemView>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CreateOrderResponse {
    pub success: bool,
    pub order_id: Uuid,
}
