//! Catalog handlers. Reads are public; mutations sit behind the admin
//! middleware and arrive as multipart forms carrying an optional image.

use axum::{
    extract::{Multipart, Path, State},
    http::StatusCode,
    Json,
};
use serde_json::{json, Value};
use uuid::Uuid;
use validator::Validate;

use crate::{
    error::AppError,
    models::product::{Product, ProductDraft, ProductUpdate},
    repositories::{ProductRepository, ProductRepositoryTrait},
    state::AppState,
    utils::uploads,
};

/// Text fields plus the raw image part collected from a multipart form.
#[derive(Debug, Default)]
struct ProductForm {
    name: Option<String>,
    description: Option<String>,
    price_cents: Option<i64>,
    image: Option<(String, Vec<u8>)>,
}

pub async fn list_products(State(state): State<AppState>) -> Result<Json<Vec<Product>>, AppError> {
    let products = ProductRepository::new().find_all(&state.pool).await?;
    Ok(Json(products))
}

pub async fn get_product(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Product>, AppError> {
    let product = ProductRepository::new()
        .find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::NotFound("Product not found".into()))?;
    Ok(Json(product))
}

pub async fn create_product(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<(StatusCode, Json<Product>), AppError> {
    let form = read_product_form(multipart).await?;

    let draft = ProductDraft {
        name: form
            .name
            .ok_or_else(|| AppError::BadRequest("Product name is required".into()))?,
        description: form.description.unwrap_or_default(),
        price_cents: form
            .price_cents
            .ok_or_else(|| AppError::BadRequest("Product price is required".into()))?,
    };
    draft.validate()?;

    let (filename, bytes) = form
        .image
        .ok_or_else(|| AppError::BadRequest("Image file is required".into()))?;
    let image_path = uploads::store_image(&state.config.upload_dir, &filename, &bytes).await?;

    let product = Product::new(draft.name, draft.description, draft.price_cents, image_path);
    let product = ProductRepository::new()
        .insert(&state.pool, &product)
        .await?;

    Ok((StatusCode::CREATED, Json(product)))
}

pub async fn update_product(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    multipart: Multipart,
) -> Result<Json<Product>, AppError> {
    let repo = ProductRepository::new();
    let existing = repo
        .find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::NotFound("Product not found".into()))?;

    let form = read_product_form(multipart).await?;

    if let Some(price_cents) = form.price_cents {
        if price_cents < 1 {
            return Err(AppError::BadRequest("Price must be positive".into()));
        }
    }

    // Store the replacement asset before touching the row; the old file is
    // only removed once the row no longer references it.
    let new_image = match &form.image {
        Some((filename, bytes)) => {
            Some(uploads::store_image(&state.config.upload_dir, filename, bytes).await?)
        }
        None => None,
    };

    let update = ProductUpdate {
        name: form.name,
        description: form.description,
        price_cents: form.price_cents,
        image: new_image.clone(),
    };

    if update.is_empty() {
        return Ok(Json(existing));
    }

    let updated = repo
        .update(&state.pool, id, &update)
        .await?
        .ok_or_else(|| AppError::NotFound("Product not found".into()))?;

    if new_image.is_some() {
        uploads::delete_image(&state.config.upload_dir, &existing.image).await;
    }

    Ok(Json(updated))
}

pub async fn delete_product(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Value>, AppError> {
    let deleted = ProductRepository::new().delete(&state.pool, id).await?;
    if !deleted {
        return Err(AppError::NotFound("Product not found".into()));
    }
    Ok(Json(json!({ "success": true })))
}

async fn read_product_form(mut multipart: Multipart) -> Result<ProductForm, AppError> {
    let mut form = ProductForm::default();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(format!("Malformed multipart body: {}", e)))?
    {
        let Some(name) = field.name().map(str::to_string) else {
            continue;
        };
        match name.as_str() {
            "name" => form.name = Some(read_text(field).await?),
            "description" => form.description = Some(read_text(field).await?),
            "price_cents" => {
                let raw = read_text(field).await?;
                let parsed = raw
                    .trim()
                    .parse::<i64>()
                    .map_err(|_| AppError::BadRequest("Price must be an integer".into()))?;
                form.price_cents = Some(parsed);
            }
            "image" => {
                let filename = field.file_name().unwrap_or("upload").to_string();
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::BadRequest(format!("Malformed image part: {}", e)))?;
                form.image = Some((filename, bytes.to_vec()));
            }
            _ => {}
        }
    }

    Ok(form)
}

async fn read_text(field: axum::extract::multipart::Field<'_>) -> Result<String, AppError> {
    field
        .text()
        .await
        .map_err(|e| AppError::BadRequest(format!("Malformed form field: {}", e)))
}
