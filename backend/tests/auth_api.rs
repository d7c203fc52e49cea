use axum::{
    extract::{Extension, State},
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use sqlx::PgPool;
use uuid::Uuid;

use shopfront_backend::{
    handlers::auth,
    models::user::{LoginPayload, RegisterPayload, UserRole},
    utils::{
        cookies::{extract_cookie_value, REFRESH_COOKIE_NAME},
        jwt::{create_refresh_token, verify_token},
    },
};

mod support;
use support::{seed_user, seed_user_with_password, test_state};

async fn response_json(response: Response) -> (StatusCode, serde_json::Value) {
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("read body");
    let json = serde_json::from_slice(&bytes).expect("json body");
    (status, json)
}

fn set_cookie_header(response: &Response) -> String {
    response
        .headers()
        .get(header::SET_COOKIE)
        .expect("set-cookie header")
        .to_str()
        .expect("set-cookie as str")
        .to_string()
}

fn cookie_headers(refresh_token: &str) -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(
        header::COOKIE,
        format!("{}={}", REFRESH_COOKIE_NAME, refresh_token)
            .parse()
            .expect("cookie header"),
    );
    headers
}

#[sqlx::test(migrations = "./migrations")]
async fn register_creates_user_and_returns_valid_token_pair(pool: PgPool) {
    let state = test_state(pool.clone());

    let response = auth::register(
        State(state.clone()),
        Json(RegisterPayload {
            name: "Alice".into(),
            email: "alice@example.com".into(),
            password: "sup3r-secret".into(),
        }),
    )
    .await
    .expect("register should succeed");

    let cookie = set_cookie_header(&response);
    assert!(cookie.starts_with("refresh_token="));
    assert!(cookie.contains("HttpOnly"));
    assert!(cookie.contains("SameSite=Lax"));

    let (status, body) = response_json(response).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["user"]["role"], "user");

    let claims = verify_token(body["token"].as_str().unwrap(), &state.config.jwt_secret)
        .expect("access token should verify");
    assert_eq!(claims.sub.to_string(), body["user"]["id"].as_str().unwrap());

    let (email,): (String,) = sqlx::query_as("SELECT email FROM users WHERE id = $1")
        .bind(claims.sub)
        .fetch_one(&pool)
        .await
        .expect("user row");
    assert_eq!(email, "alice@example.com");
}

#[sqlx::test(migrations = "./migrations")]
async fn register_rejects_duplicate_email(pool: PgPool) {
    let state = test_state(pool.clone());
    let existing = seed_user(&pool, UserRole::User).await;

    let err = auth::register(
        State(state),
        Json(RegisterPayload {
            name: "Impostor".into(),
            email: existing.email.clone(),
            password: "sup3r-secret".into(),
        }),
    )
    .await
    .expect_err("duplicate email should conflict");

    let (status, body) = response_json(err.into_response()).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["code"], "CONFLICT");
}

#[sqlx::test(migrations = "./migrations")]
async fn login_token_encodes_stored_identity(pool: PgPool) {
    let state = test_state(pool.clone());
    let user = seed_user_with_password(&pool, UserRole::Admin, "hunter2-hunter2").await;

    let response = auth::login(
        State(state.clone()),
        Json(LoginPayload {
            email: user.email.clone(),
            password: "hunter2-hunter2".into(),
        }),
    )
    .await
    .expect("login should succeed");

    let (status, body) = response_json(response).await;
    assert_eq!(status, StatusCode::OK);

    let claims = verify_token(body["token"].as_str().unwrap(), &state.config.jwt_secret)
        .expect("access token should verify");
    assert_eq!(claims.sub, user.id);
    assert_eq!(claims.role, UserRole::Admin);
    assert_eq!(body["user"]["id"], user.id.to_string());
    assert_eq!(body["user"]["role"], "admin");
}

#[sqlx::test(migrations = "./migrations")]
async fn login_failure_does_not_reveal_which_credential_was_wrong(pool: PgPool) {
    let state = test_state(pool.clone());
    let user = seed_user_with_password(&pool, UserRole::User, "right-password").await;

    let wrong_password = auth::login(
        State(state.clone()),
        Json(LoginPayload {
            email: user.email.clone(),
            password: "wrong-password".into(),
        }),
    )
    .await
    .expect_err("wrong password should fail");

    let unknown_email = auth::login(
        State(state),
        Json(LoginPayload {
            email: "nobody@example.com".into(),
            password: "whatever-password".into(),
        }),
    )
    .await
    .expect_err("unknown email should fail");

    let (status_a, body_a) = response_json(wrong_password.into_response()).await;
    let (status_b, body_b) = response_json(unknown_email.into_response()).await;
    assert_eq!(status_a, StatusCode::NOT_FOUND);
    assert_eq!(status_a, status_b);
    assert_eq!(body_a, body_b);
}

#[sqlx::test(migrations = "./migrations")]
async fn refresh_rotates_token_pair_for_valid_cookie(pool: PgPool) {
    let state = test_state(pool.clone());
    let user = seed_user(&pool, UserRole::User).await;
    let refresh_token = create_refresh_token(user.id, user.role, &state.config.jwt_secret, 7)
        .expect("refresh token");

    let response = auth::refresh(State(state.clone()), cookie_headers(&refresh_token))
        .await
        .expect("refresh should succeed");

    let cookie = set_cookie_header(&response);
    let rotated =
        extract_cookie_value(&cookie, REFRESH_COOKIE_NAME).expect("rotated refresh token");
    assert!(!rotated.is_empty());

    let (status, body) = response_json(response).await;
    assert_eq!(status, StatusCode::OK);
    let claims = verify_token(body["token"].as_str().unwrap(), &state.config.jwt_secret)
        .expect("new access token should verify");
    assert_eq!(claims.sub, user.id);
}

#[sqlx::test(migrations = "./migrations")]
async fn refresh_without_cookie_is_unauthorized(pool: PgPool) {
    let state = test_state(pool);

    let err = auth::refresh(State(state), HeaderMap::new())
        .await
        .expect_err("missing cookie should fail");

    let (status, body) = response_json(err.into_response()).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["code"], "UNAUTHORIZED");
}

#[sqlx::test(migrations = "./migrations")]
async fn refresh_with_tampered_cookie_is_unauthorized(pool: PgPool) {
    let state = test_state(pool.clone());
    let user = seed_user(&pool, UserRole::User).await;
    let foreign_token = create_refresh_token(user.id, user.role, "some-other-secret", 7)
        .expect("token under a different key");

    let err = auth::refresh(State(state), cookie_headers(&foreign_token))
        .await
        .expect_err("foreign signature should fail");

    let (status, _body) = response_json(err.into_response()).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[sqlx::test(migrations = "./migrations")]
async fn refresh_for_vanished_user_is_not_found(pool: PgPool) {
    let state = test_state(pool);
    let refresh_token = create_refresh_token(
        Uuid::new_v4(),
        UserRole::User,
        &state.config.jwt_secret,
        7,
    )
    .expect("refresh token");

    let err = auth::refresh(State(state), cookie_headers(&refresh_token))
        .await
        .expect_err("unknown user should fail");

    let (status, _body) = response_json(err.into_response()).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "./migrations")]
async fn logout_overwrites_refresh_cookie(pool: PgPool) {
    let state = test_state(pool);

    let response = auth::logout(State(state)).await.expect("logout");

    let cookie = set_cookie_header(&response);
    assert!(cookie.starts_with("refresh_token=;"));
    assert!(cookie.contains("Max-Age=0"));
}

#[sqlx::test(migrations = "./migrations")]
async fn me_returns_the_callers_identity(pool: PgPool) {
    let user = seed_user(&pool, UserRole::Admin).await;

    let response = auth::me(Extension(user.clone())).await;

    assert_eq!(response.0.id, user.id);
    assert_eq!(response.0.role, UserRole::Admin);
}
