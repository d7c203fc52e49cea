//! Order finalizer: freezes the cart's current contents into an immutable,
//! price-snapshotted order.

use axum::{
    extract::{Extension, State},
    http::StatusCode,
    Json,
};

use crate::{
    error::AppError,
    models::{
        order::{CreateOrderResponse, OrderView},
        user::User,
    },
    repositories::{CartRepository, CartRepositoryTrait, OrderRepository, OrderRepositoryTrait},
    state::AppState,
};

pub async fn create_order(
    State(state): State<AppState>,
    Extension(user): Extension<User>,
) -> Result<(StatusCode, Json<CreateOrderResponse>), AppError> {
    let cart = CartRepository::new()
        .find_by_user(&state.pool, user.id)
        .await?
        .ok_or_else(|| AppError::NotFound("Cart not found".into()))?;

    // An empty cart produces a zero-total order with no items; finalization
    // does not reject it.
    let order = OrderRepository::new()
        .finalize_cart(&state.pool, user.id, cart.id)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(CreateOrderResponse {
            success: true,
            order_id: order.id,
        }),
    ))
}

pub async fn get_orders(
    State(state): State<AppState>,
    Extension(user): Extension<User>,
) -> Result<Json<Vec<OrderView>>, AppError> {
    let orders = OrderRepository::new()
        .list_for_user(&state.pool, user.id)
        .await?;
    Ok(Json(orders))
}
