//! Route table and middleware chain. Three tiers, merged into one app:
//! public routes, user routes behind `middleware::auth`, and admin routes
//! behind `middleware::auth_admin`.

use axum::{
    http::{header, HeaderValue, Method},
    middleware as axum_middleware,
    routing::{delete, get, patch, post},
    Router,
};
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, services::ServeDir, trace::TraceLayer};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::{docs, handlers, middleware, state::AppState};

pub fn build_router(state: AppState) -> anyhow::Result<Router> {
    let public_routes = Router::new()
        .route("/auth/register", post(handlers::auth::register))
        .route("/auth/login", post(handlers::auth::login))
        .route("/auth/refresh", post(handlers::auth::refresh))
        .route("/auth/logout", post(handlers::auth::logout))
        .route("/products", get(handlers::products::list_products))
        .route("/products/{id}", get(handlers::products::get_product));

    let user_routes = Router::new()
        .route("/auth/@me", get(handlers::auth::me))
        .route("/cart", get(handlers::cart::get_cart))
        .route("/cart/add", post(handlers::cart::add_to_cart))
        .route("/cart/item/{id}", delete(handlers::cart::remove_item))
        .route("/cart/clear", delete(handlers::cart::clear_cart))
        .route("/order", get(handlers::orders::get_orders))
        .route("/order/create", post(handlers::orders::create_order))
        .route_layer(axum_middleware::from_fn_with_state(
            state.clone(),
            middleware::auth,
        ));

    let admin_routes = Router::new()
        .route("/products", post(handlers::products::create_product))
        .route(
            "/products/{id}",
            patch(handlers::products::update_product)
                .delete(handlers::products::delete_product),
        )
        .route_layer(axum_middleware::from_fn_with_state(
            state.clone(),
            middleware::auth_admin,
        ));

    let cors_origin: HeaderValue = state.config.cors_allow_origin.parse()?;
    let cors = CorsLayer::new()
        .allow_origin(cors_origin)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PATCH,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE])
        .allow_credentials(true);

    let app = Router::new()
        .merge(public_routes)
        .merge(user_routes)
        .merge(admin_routes)
        .nest_service("/uploads", ServeDir::new(&state.config.upload_dir))
        .merge(SwaggerUi::new("/docs").url("/api-docs/openapi.json", docs::ApiDoc::openapi()))
        .layer(
            ServiceBuilder::new()
                .layer(axum_middleware::from_fn(middleware::request_id))
                .layer(TraceLayer::new_for_http())
                .layer(axum_middleware::from_fn(middleware::log_error_responses))
                .layer(cors),
        )
        .with_state(state);

    Ok(app)
}
