use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::user::UserRole;

/// Signed payload shared by access and refresh tokens: the identity plus the
/// validity window. Access and refresh tokens differ only in lifetime.
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: Uuid,
    pub role: UserRole,
    pub exp: i64,
    pub iat: i64,
}

impl Claims {
    pub fn new(user_id: Uuid, role: UserRole, ttl: Duration) -> Self {
        let now = Utc::now();
        Self {
            sub: user_id,
            role,
            exp: (now + ttl).timestamp(),
            iat: now.timestamp(),
        }
    }
}

pub fn create_access_token(
    user_id: Uuid,
    role: UserRole,
    secret: &str,
    expiration_minutes: u64,
) -> anyhow::Result<String> {
    let claims = Claims::new(user_id, role, Duration::minutes(expiration_minutes as i64));
    sign(&claims, secret)
}

pub fn create_refresh_token(
    user_id: Uuid,
    role: UserRole,
    secret: &str,
    expiration_days: u64,
) -> anyhow::Result<String> {
    let claims = Claims::new(user_id, role, Duration::days(expiration_days as i64));
    sign(&claims, secret)
}

fn sign(claims: &Claims, secret: &str) -> anyhow::Result<String> {
    let token = encode(
        &Header::default(),
        claims,
        &EncodingKey::from_secret(secret.as_ref()),
    )?;
    Ok(token)
}

pub fn verify_token(token: &str, secret: &str) -> anyhow::Result<Claims> {
    let validation = Validation::default();
    let token_data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_ref()),
        &validation,
    )?;
    Ok(token_data.claims)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_and_verify_roundtrip() {
        let user_id = Uuid::new_v4();
        let token =
            create_access_token(user_id, UserRole::Admin, "secret", 60).expect("create token");
        let claims = verify_token(&token, "secret").expect("verify token");
        assert_eq!(claims.sub, user_id);
        assert_eq!(claims.role, UserRole::Admin);
        assert!(claims.exp > claims.iat);
    }

    #[test]
    fn verify_rejects_wrong_secret() {
        let token = create_access_token(Uuid::new_v4(), UserRole::User, "secret", 60)
            .expect("create token");
        assert!(verify_token(&token, "other-secret").is_err());
    }

    #[test]
    fn verify_rejects_expired_token() {
        // Issued well past the default 60s leeway.
        let claims = Claims::new(Uuid::new_v4(), UserRole::User, Duration::minutes(-5));
        let token = sign(&claims, "secret").expect("sign");
        assert!(verify_token(&token, "secret").is_err());
    }

    #[test]
    fn refresh_token_outlives_access_token() {
        let user_id = Uuid::new_v4();
        let access =
            create_access_token(user_id, UserRole::User, "secret", 60).expect("access token");
        let refresh =
            create_refresh_token(user_id, UserRole::User, "secret", 7).expect("refresh token");
        let access_claims = verify_token(&access, "secret").expect("verify access");
        let refresh_claims = verify_token(&refresh, "secret").expect("verify refresh");
        assert!(refresh_claims.exp > access_claims.exp);
    }
}
