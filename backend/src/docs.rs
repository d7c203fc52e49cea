#![allow(dead_code)] // OpenAPI doc stubs are only referenced by utoipa macros.

use crate::models::{
    cart::{AddToCartPayload, CartItemProduct, CartItemView, CartView},
    order::{CreateOrderResponse, OrderItemProduct, OrderItemView, OrderView},
    product::Product,
    user::{AuthResponse, Identity, LoginPayload, RegisterPayload, UserRole},
};
use utoipa::{
    openapi::security::{Http, HttpAuthScheme, SecurityScheme},
    Modify, OpenApi,
};

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_token",
                SecurityScheme::Http(Http::new(HttpAuthScheme::Bearer)),
            );
        }
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        register_doc,
        login_doc,
        refresh_doc,
        logout_doc,
        me_doc,
        get_cart_doc,
        add_to_cart_doc,
        remove_cart_item_doc,
        clear_cart_doc,
        list_orders_doc,
        create_order_doc,
        list_products_doc,
        get_product_doc,
        create_product_doc,
        update_product_doc,
        delete_product_doc,
    ),
    components(schemas(
        RegisterPayload,
        LoginPayload,
        AuthResponse,
        Identity,
        UserRole,
        AddToCartPayload,
        CartView,
        CartItemView,
        CartItemProduct,
        OrderView,
        OrderItemView,
        OrderItemProduct,
        CreateOrderResponse,
        Product,
    )),
    modifiers(&SecurityAddon),
    tags(
        (name = "auth", description = "Registration, login and token lifecycle"),
        (name = "cart", description = "Per-user shopping cart"),
        (name = "order", description = "Order finalization and history"),
        (name = "products", description = "Catalog")
    )
)]
pub struct ApiDoc;

#[utoipa::path(post, path = "/auth/register", tag = "auth",
    request_body = RegisterPayload,
    responses(
        (status = 201, description = "Account created, token pair issued", body = AuthResponse),
        (status = 409, description = "Email already registered"),
        (status = 400, description = "Validation failed")
    ))]
fn register_doc() {}

#[utoipa::path(post, path = "/auth/login", tag = "auth",
    request_body = LoginPayload,
    responses(
        (status = 200, description = "Token pair issued", body = AuthResponse),
        (status = 404, description = "Unknown email or wrong password")
    ))]
fn login_doc() {}

#[utoipa::path(post, path = "/auth/refresh", tag = "auth",
    responses(
        (status = 200, description = "Token pair rotated", body = AuthResponse),
        (status = 401, description = "Missing or invalid refresh cookie"),
        (status = 404, description = "Encoded user no longer exists")
    ))]
fn refresh_doc() {}

#[utoipa::path(post, path = "/auth/logout", tag = "auth",
    responses((status = 200, description = "Refresh cookie cleared")))]
fn logout_doc() {}

#[utoipa::path(get, path = "/auth/@me", tag = "auth",
    security(("bearer_token" = [])),
    responses(
        (status = 200, description = "Caller identity", body = Identity),
        (status = 401, description = "Missing or invalid access token")
    ))]
fn me_doc() {}

#[utoipa::path(get, path = "/cart", tag = "cart",
    security(("bearer_token" = [])),
    responses((status = 200, description = "The caller's cart, created lazily", body = CartView)))]
fn get_cart_doc() {}

#[utoipa::path(post, path = "/cart/add", tag = "cart",
    security(("bearer_token" = [])),
    request_body = AddToCartPayload,
    responses(
        (status = 200, description = "Refreshed cart view", body = CartView),
        (status = 404, description = "Product not found")
    ))]
fn add_to_cart_doc() {}

#[utoipa::path(delete, path = "/cart/item/{id}", tag = "cart",
    security(("bearer_token" = [])),
    params(("id" = uuid::Uuid, Path, description = "Cart item id")),
    responses(
        (status = 200, description = "Refreshed cart view", body = CartView),
        (status = 404, description = "No cart, or the item belongs to another cart")
    ))]
fn remove_cart_item_doc() {}

#[utoipa::path(delete, path = "/cart/clear", tag = "cart",
    security(("bearer_token" = [])),
    responses(
        (status = 200, description = "Emptied cart", body = CartView),
        (status = 404, description = "Cart not found")
    ))]
fn clear_cart_doc() {}

#[utoipa::path(get, path = "/order", tag = "order",
    security(("bearer_token" = [])),
    responses((status = 200, description = "The caller's orders, newest first", body = [OrderView])))]
fn list_orders_doc() {}

#[utoipa::path(post, path = "/order/create", tag = "order",
    security(("bearer_token" = [])),
    responses(
        (status = 201, description = "Cart finalized into an order", body = CreateOrderResponse),
        (status = 404, description = "Cart not found")
    ))]
fn create_order_doc() {}

#[utoipa::path(get, path = "/products", tag = "products",
    responses((status = 200, description = "Catalog, newest first", body = [Product])))]
fn list_products_doc() {}

#[utoipa::path(get, path = "/products/{id}", tag = "products",
    params(("id" = uuid::Uuid, Path, description = "Product id")),
    responses(
        (status = 200, body = Product),
        (status = 404, description = "Product not found")
    ))]
fn get_product_doc() {}

#[utoipa::path(post, path = "/products", tag = "products",
    security(("bearer_token" = [])),
    responses(
        (status = 201, description = "Product created from a multipart form", body = Product),
        (status = 403, description = "Admin role required")
    ))]
fn create_product_doc() {}

#[utoipa::path(patch, path = "/products/{id}", tag = "products",
    security(("bearer_token" = [])),
    params(("id" = uuid::Uuid, Path, description = "Product id")),
    responses(
        (status = 200, description = "Updated product; a replaced image deletes the old asset", body = Product),
        (status = 403, description = "Admin role required"),
        (status = 404, description = "Product not found")
    ))]
fn update_product_doc() {}

#[utoipa::path(delete, path = "/products/{id}", tag = "products",
    security(("bearer_token" = [])),
    params(("id" = uuid::Uuid, Path, description = "Product id")),
    responses(
        (status = 200, description = "Product deleted"),
        (status = 403, description = "Admin role required"),
        (status = 404, description = "Product not found")
    ))]
fn delete_product_doc() {}
