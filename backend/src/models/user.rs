//! Models that represent user accounts and authentication payloads.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
/// Database representation of a registered account.
pub struct User {
    /// Unique identifier for the user.
    pub id: Uuid,
    /// Display name chosen at registration.
    pub name: String,
    /// Login email, unique across the store.
    pub email: String,
    /// Argon2 hash of the user's password. Never serialized to clients.
    #[serde(skip_serializing)]
    pub password_hash: String,
    /// Role describing the user's privileges.
    pub role: UserRole,
    /// Creation timestamp for auditing.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp for auditing.
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, sqlx::Type, ToSchema, Default)]
#[sqlx(type_name = "TEXT", rename_all = "lowercase")]
/// Supported user roles stored in the database.
pub enum UserRole {
    /// Standard shopper with cart and order access.
    #[default]
    User,
    /// Administrator allowed to mutate the catalog.
    Admin,
}

impl UserRole {
    /// Returns the canonical lowercase representation of the role.
    pub fn as_str(&self) -> &'static str {
        match self {
            UserRole::User => "user",
            UserRole::Admin => "admin",
        }
    }
}

impl Serialize for UserRole {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for UserRole {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        match s.as_str() {
            "user" => Ok(UserRole::User),
            "admin" => Ok(UserRole::Admin),
            // tolerate uppercase values from older clients
            "User" | "USER" => Ok(UserRole::User),
            "Admin" | "ADMIN" => Ok(UserRole::Admin),
            other => Err(serde::de::Error::unknown_variant(other, &["user", "admin"])),
        }
    }
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
/// Payload for creating a new account.
pub struct RegisterPayload {
    #[validate(length(min = 2, max = 32))]
    pub name: String,
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 6, max = 72))]
    pub password: String,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
/// Credentials submitted by a user attempting to authenticate.
pub struct LoginPayload {
    #[validate(email)]
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
/// The identity encoded in a token pair: what `/auth/@me` returns.
pub struct Identity {
    pub id: Uuid,
    pub role: UserRole,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
/// Access token plus identity returned after register/login/refresh. The
/// refresh token travels separately in an HTTP-only cookie.
pub struct AuthResponse {
    pub token: String,
    pub user: Identity,
}

impl User {
    /// Constructs a new user with a freshly generated identifier.
    pub fn new(name: String, email: String, password_hash: String, role: UserRole) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            name,
            email,
            password_hash,
            role,
            created_at: now,
            updated_at: now,
        }
    }

    /// Returns `true` when the user holds the `Admin` role.
    pub fn is_admin(&self) -> bool {
        matches!(self.role, UserRole::Admin)
    }

    /// The `{id, role}` pair downstream authorization works with.
    pub fn identity(&self) -> Identity {
        Identity {
            id: self.id,
            role: self.role,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;

    #[test]
    fn user_role_serde_accepts_and_emits_lowercase() {
        let u: UserRole = serde_json::from_str("\"user\"").unwrap();
        let a: UserRole = serde_json::from_str("\"admin\"").unwrap();
        assert!(matches!(u, UserRole::User));
        assert!(matches!(a, UserRole::Admin));

        // Tolerate uppercase
        let u2: UserRole = serde_json::from_str("\"USER\"").unwrap();
        let a2: UserRole = serde_json::from_str("\"ADMIN\"").unwrap();
        assert!(matches!(u2, UserRole::User));
        assert!(matches!(a2, UserRole::Admin));

        assert_eq!(
            serde_json::to_value(UserRole::User).unwrap(),
            Value::String("user".into())
        );
        assert_eq!(
            serde_json::to_value(UserRole::Admin).unwrap(),
            Value::String("admin".into())
        );
    }

    #[test]
    fn user_serialization_never_exposes_password_hash() {
        let user = User::new(
            "Alice".into(),
            "alice@example.com".into(),
            "hash".into(),
            UserRole::Admin,
        );
        let json = serde_json::to_value(&user).unwrap();
        assert!(json.get("password_hash").is_none());
        assert_eq!(json["email"], "alice@example.com");
    }

    #[test]
    fn register_payload_rejects_short_password() {
        let payload = RegisterPayload {
            name: "Alice".into(),
            email: "alice@example.com".into(),
            password: "short".into(),
        };
        assert!(payload.validate().is_err());
    }
}
