//! Cart aggregator: one cart per user, quantities consolidated per product.

use axum::{
    extract::{Extension, Path, State},
    Json,
};
use uuid::Uuid;
use validator::Validate;

use crate::{
    error::AppError,
    models::{
        cart::{AddToCartPayload, Cart, CartView},
        user::User,
    },
    repositories::{
        CartRepository, CartRepositoryTrait, ProductRepository, ProductRepositoryTrait,
    },
    state::AppState,
};

pub async fn get_cart(
    State(state): State<AppState>,
    Extension(user): Extension<User>,
) -> Result<Json<CartView>, AppError> {
    let repo = CartRepository::new();
    let cart = repo.get_or_create(&state.pool, user.id).await?;
    cart_view(&state, &cart).await.map(Json)
}

pub async fn add_to_cart(
    State(state): State<AppState>,
    Extension(user): Extension<User>,
    Json(payload): Json<AddToCartPayload>,
) -> Result<Json<CartView>, AppError> {
    payload.validate()?;

    ProductRepository::new()
        .find_by_id(&state.pool, payload.product_id)
        .await?
        .ok_or_else(|| {
            AppError::NotFound(format!("Product {} not found", payload.product_id))
        })?;

    let repo = CartRepository::new();
    let cart = repo.get_or_create(&state.pool, user.id).await?;
    repo.upsert_item(&state.pool, cart.id, payload.product_id, payload.quantity)
        .await?;

    cart_view(&state, &cart).await.map(Json)
}

pub async fn remove_item(
    State(state): State<AppState>,
    Extension(user): Extension<User>,
    Path(item_id): Path<Uuid>,
) -> Result<Json<CartView>, AppError> {
    let repo = CartRepository::new();
    let cart = repo
        .find_by_user(&state.pool, user.id)
        .await?
        .ok_or_else(|| AppError::NotFound("Cart not found".into()))?;

    // Scoped to the caller's cart: guessing another user's item id lands
    // here with zero rows affected.
    let deleted = repo.delete_item(&state.pool, cart.id, item_id).await?;
    if deleted == 0 {
        return Err(AppError::NotFound("Cart item not found".into()));
    }

    cart_view(&state, &cart).await.map(Json)
}

pub async fn clear_cart(
    State(state): State<AppState>,
    Extension(user): Extension<User>,
) -> Result<Json<CartView>, AppError> {
    let repo = CartRepository::new();
    let cart = repo
        .find_by_user(&state.pool, user.id)
        .await?
        .ok_or_else(|| AppError::NotFound("Cart not found".into()))?;

    repo.clear_items(&state.pool, cart.id).await?;

    cart_view(&state, &cart).await.map(Json)
}

async fn cart_view(state: &AppState, cart: &Cart) -> Result<CartView, AppError> {
    let items = CartRepository::new()
        .items_with_products(&state.pool, cart.id)
        .await?;
    Ok(CartView {
        id: cart.id,
        user_id: cart.user_id,
        items,
    })
}
