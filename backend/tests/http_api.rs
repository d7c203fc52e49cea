//! End-to-end tests driving the composed router, covering what the
//! handler-level tests cannot: the middleware chain and role enforcement.

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
};
use sqlx::PgPool;
use tower::ServiceExt;

use shopfront_backend::{models::user::UserRole, router::build_router};

mod support;
use support::{access_token_for, seed_product, seed_user, test_config, test_state};

const BOUNDARY: &str = "shopfront-router-boundary";

fn product_form_body() -> Vec<u8> {
    let mut body = Vec::new();
    for (name, value) in [("name", "Kettle"), ("price_cents", "5900")] {
        body.extend_from_slice(
            format!(
                "--{}\r\nContent-Disposition: form-data; name=\"{}\"\r\n\r\n{}\r\n",
                BOUNDARY, name, value
            )
            .as_bytes(),
        );
    }
    body.extend_from_slice(
        format!(
            "--{}\r\nContent-Disposition: form-data; name=\"image\"; filename=\"kettle.png\"\r\n\
             Content-Type: image/png\r\n\r\npng-bytes\r\n--{}--\r\n",
            BOUNDARY, BOUNDARY
        )
        .as_bytes(),
    );
    body
}

async fn body_json(response: axum::response::Response) -> serde_json::Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("read body");
    serde_json::from_slice(&bytes).expect("json body")
}

#[sqlx::test(migrations = "./migrations")]
async fn protected_routes_reject_missing_and_garbage_tokens(pool: PgPool) {
    let router = build_router(test_state(pool)).expect("router");

    let response = router
        .clone()
        .oneshot(
            Request::builder()
                .uri("/cart")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .expect("send request");
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let response = router
        .oneshot(
            Request::builder()
                .uri("/cart")
                .header(header::AUTHORIZATION, "Bearer not-a-token")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .expect("send request");
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[sqlx::test(migrations = "./migrations")]
async fn catalog_reads_are_public(pool: PgPool) {
    seed_product(&pool, "Mug", 1200).await;
    let router = build_router(test_state(pool)).expect("router");

    let response = router
        .oneshot(
            Request::builder()
                .uri("/products")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .expect("send request");

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json.as_array().expect("array").len(), 1);
}

#[sqlx::test(migrations = "./migrations")]
async fn catalog_mutation_requires_the_admin_role(pool: PgPool) {
    let config = test_config();
    let shopper = seed_user(&pool, UserRole::User).await;
    let product = seed_product(&pool, "Mug", 1200).await;
    let token = access_token_for(&config, &shopper);
    let router = build_router(test_state(pool)).expect("router");

    let create = Request::builder()
        .method("POST")
        .uri("/products")
        .header(header::AUTHORIZATION, format!("Bearer {}", token))
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={}", BOUNDARY),
        )
        .body(Body::from(product_form_body()))
        .unwrap();
    let response = router.clone().oneshot(create).await.expect("send request");
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let delete = Request::builder()
        .method("DELETE")
        .uri(format!("/products/{}", product.id))
        .header(header::AUTHORIZATION, format!("Bearer {}", token))
        .body(Body::empty())
        .unwrap();
    let response = router.oneshot(delete).await.expect("send request");
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[sqlx::test(migrations = "./migrations")]
async fn admin_creates_a_product_through_the_router(pool: PgPool) {
    let config = test_config();
    let admin = seed_user(&pool, UserRole::Admin).await;
    let token = access_token_for(&config, &admin);
    let router = build_router(test_state(pool)).expect("router");

    let request = Request::builder()
        .method("POST")
        .uri("/products")
        .header(header::AUTHORIZATION, format!("Bearer {}", token))
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={}", BOUNDARY),
        )
        .body(Body::from(product_form_body()))
        .unwrap();

    let response = router.oneshot(request).await.expect("send request");
    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    assert_eq!(json["name"], "Kettle");
    assert_eq!(json["price_cents"], 5900);
}

#[sqlx::test(migrations = "./migrations")]
async fn register_then_me_roundtrip(pool: PgPool) {
    let router = build_router(test_state(pool)).expect("router");

    let register = Request::builder()
        .method("POST")
        .uri("/auth/register")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(
            serde_json::json!({
                "name": "Alice",
                "email": "alice@example.com",
                "password": "sup3r-secret"
            })
            .to_string(),
        ))
        .unwrap();
    let response = router.clone().oneshot(register).await.expect("register");
    assert_eq!(response.status(), StatusCode::CREATED);
    let body = body_json(response).await;
    let token = body["token"].as_str().expect("access token").to_string();
    let user_id = body["user"]["id"].as_str().expect("user id").to_string();

    let me = Request::builder()
        .uri("/auth/@me")
        .header(header::AUTHORIZATION, format!("Bearer {}", token))
        .body(Body::empty())
        .unwrap();
    let response = router.oneshot(me).await.expect("me");
    assert_eq!(response.status(), StatusCode::OK);
    let identity = body_json(response).await;
    assert_eq!(identity["id"], user_id);
    assert_eq!(identity["role"], "user");
}

#[sqlx::test(migrations = "./migrations")]
async fn token_for_a_vanished_user_is_rejected(pool: PgPool) {
    let config = test_config();
    let user = seed_user(&pool, UserRole::User).await;
    let token = access_token_for(&config, &user);

    sqlx::query("DELETE FROM users WHERE id = $1")
        .bind(user.id)
        .execute(&pool)
        .await
        .expect("delete user");

    let router = build_router(test_state(pool)).expect("router");
    let request = Request::builder()
        .uri("/auth/@me")
        .header(header::AUTHORIZATION, format!("Bearer {}", token))
        .body(Body::empty())
        .unwrap();

    let response = router.oneshot(request).await.expect("send request");
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
