//! Catalog models and the payloads admins use to manage them.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
/// A catalog entry. `image` is a `/uploads/...` path served statically.
pub struct Product {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    /// Price in minor units so totals stay exact.
    pub price_cents: i64,
    pub image: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Product {
    pub fn new(name: String, description: String, price_cents: i64, image: String) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            name,
            description,
            price_cents,
            image,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Text fields of a multipart product create, validated before the image is
/// persisted.
#[derive(Debug, Default, Validate, ToSchema)]
pub struct ProductDraft {
    #[validate(length(min = 2, max = 32))]
    pub name: String,
    pub description: String,
    #[validate(range(min = 1))]
    pub price_cents: i64,
}

/// Partial update collected from a PATCH multipart form. `image` is filled in
/// by the handler once the replacement asset is stored.
#[derive(Debug, Default, ToSchema)]
pub struct ProductUpdate {
    pub name: Option<String>,
    pub description: Option<String>,
    pub price_cents: Option<i64>,
    pub image: Option<String>,
}

impl ProductUpdate {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.description.is_none()
            && self.price_cents.is_none()
            && self.image.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn product_draft_rejects_non_positive_price() {
        let draft = ProductDraft {
            name: "Mug".into(),
            description: String::new(),
            price_cents: 0,
        };
        assert!(draft.validate().is_err());
    }

    #[test]
    fn product_update_reports_empty() {
        assert!(ProductUpdate::default().is_empty());
        let update = ProductUpdate {
            price_cents: Some(1500),
            ..Default::default()
        };
        assert!(!update.is_empty());
    }
}
