//! Session issuer: registration, login, token refresh, logout, identity.
//!
//! Proof of identity is a pair of signed tokens. The short-lived access
//! token travels in the response body and comes back as a bearer header;
//! the long-lived refresh token only ever lives in an HTTP-only cookie, so
//! client script can never read it. Nothing is stored server-side.

use axum::{
    extract::{Extension, State},
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use std::time::Duration;
use validator::Validate;

use crate::{
    config::Config,
    error::AppError,
    models::user::{AuthResponse, Identity, LoginPayload, RegisterPayload, User, UserRole},
    repositories::{UserRepository, UserRepositoryTrait},
    state::AppState,
    utils::{
        cookies::{
            build_clear_refresh_cookie, build_refresh_cookie, extract_cookie_value, CookieOptions,
            REFRESH_COOKIE_NAME,
        },
        jwt::{create_access_token, create_refresh_token, verify_token},
        password::{hash_password, verify_password},
    },
};

/// One message for both unknown-email and wrong-password, so the response
/// does not leak which of the two happened.
const INVALID_CREDENTIALS: &str = "Invalid email or password";

pub async fn register(
    State(state): State<AppState>,
    Json(payload): Json<RegisterPayload>,
) -> Result<Response, AppError> {
    payload.validate()?;

    let repo = UserRepository::new();
    if repo
        .find_by_email(&state.pool, &payload.email)
        .await?
        .is_some()
    {
        return Err(AppError::Conflict(
            "A user with this email already exists".into(),
        ));
    }

    let password_hash = hash_password(&payload.password)?;
    let user = User::new(payload.name, payload.email, password_hash, UserRole::User);
    let user = repo.insert(&state.pool, &user).await?;

    token_pair_response(&state.config, &user, StatusCode::CREATED)
}

pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginPayload>,
) -> Result<Response, AppError> {
    let user = UserRepository::new()
        .find_by_email(&state.pool, &payload.email)
        .await?
        .ok_or_else(|| AppError::NotFound(INVALID_CREDENTIALS.into()))?;

    if !verify_password(&payload.password, &user.password_hash)? {
        return Err(AppError::NotFound(INVALID_CREDENTIALS.into()));
    }

    token_pair_response(&state.config, &user, StatusCode::OK)
}

pub async fn refresh(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Response, AppError> {
    let refresh_token = headers
        .get(header::COOKIE)
        .and_then(|value| value.to_str().ok())
        .and_then(|raw| extract_cookie_value(raw, REFRESH_COOKIE_NAME))
        .ok_or_else(|| AppError::Unauthorized("Missing refresh token".into()))?;

    let claims = verify_token(&refresh_token, &state.config.jwt_secret)
        .map_err(|_| AppError::Unauthorized("Invalid or expired refresh token".into()))?;

    let user = UserRepository::new()
        .find_by_id(&state.pool, claims.sub)
        .await?
        .ok_or_else(|| AppError::NotFound("User not found".into()))?;

    // Rotation: the Set-Cookie below supersedes the presented token.
    token_pair_response(&state.config, &user, StatusCode::OK)
}

pub async fn logout(State(state): State<AppState>) -> Result<Response, AppError> {
    // Cookie clearing only; outstanding access tokens expire on their own.
    let cookie = build_clear_refresh_cookie(cookie_options(&state.config));
    Ok((
        StatusCode::OK,
        [(header::SET_COOKIE, cookie)],
        Json(json!({ "message": "Logged out" })),
    )
        .into_response())
}

pub async fn me(Extension(user): Extension<User>) -> Json<Identity> {
    Json(user.identity())
}

fn cookie_options(config: &Config) -> CookieOptions {
    CookieOptions {
        secure: config.cookie_secure,
        same_site: config.cookie_same_site,
    }
}

/// Mints an access/refresh pair for the user: refresh token as an HTTP-only
/// cookie with a lifetime matching its expiry, access token in the body.
fn token_pair_response(
    config: &Config,
    user: &User,
    status: StatusCode,
) -> Result<Response, AppError> {
    let access_token = create_access_token(
        user.id,
        user.role,
        &config.jwt_secret,
        config.access_token_expiration_minutes,
    )?;
    let refresh_token = create_refresh_token(
        user.id,
        user.role,
        &config.jwt_secret,
        config.refresh_token_expiration_days,
    )?;

    let max_age = Duration::from_secs(config.refresh_token_expiration_days * 24 * 60 * 60);
    let cookie = build_refresh_cookie(&refresh_token, max_age, cookie_options(config));

    let body = AuthResponse {
        token: access_token,
        user: user.identity(),
    };

    Ok((status, [(header::SET_COOKIE, cookie)], Json(body)).into_response())
}
