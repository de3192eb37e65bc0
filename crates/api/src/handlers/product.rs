//! Handlers for the `/products` resource.

use axum::extract::{Multipart, Path, State};
use axum::Json;
use digilink_core::error::CoreError;
use digilink_core::gtin::validate_gtin;
use digilink_core::link::canonical_link;
use digilink_core::symbol::{encode_linear, encode_matrix};
use digilink_db::models::product::Product;
use digilink_db::repositories::ProductRepo;
use serde::Serialize;

use crate::error::{AppError, AppResult};
use crate::state::AppState;
use crate::upsert::{self, UploadedImage};

/// Accepted image content types, with the file extension each maps to.
const ALLOWED_IMAGE_TYPES: &[(&str, &str)] = &[
    ("image/png", "png"),
    ("image/jpeg", "jpg"),
    ("image/jpg", "jpg"),
    ("image/gif", "gif"),
    ("image/webp", "webp"),
];

/// Existence check result. `exists: false` is a negative answer,
/// never a 404.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckResponse {
    pub exists: bool,
    pub product: Option<Product>,
}

/// Scannable symbol payloads for one product.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SymbolsResponse {
    pub canonical_link: String,
    pub linear: LinearSymbolPayload,
    pub matrix: MatrixSymbolPayload,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LinearSymbolPayload {
    pub symbology: &'static str,
    pub svg: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MatrixSymbolPayload {
    pub svg: String,
}

/// GET /api/v1/products/check/{gtin}
///
/// Advisory existence check backing the create/update branch choice.
/// Idempotent pure read; the authoritative check happens again at
/// write time.
pub async fn check(
    State(state): State<AppState>,
    Path(gtin): Path<String>,
) -> AppResult<Json<CheckResponse>> {
    validate_gtin(&gtin)?;
    let product = ProductRepo::find_by_gtin(&state.pool, &gtin).await?;
    Ok(Json(CheckResponse {
        exists: product.is_some(),
        product,
    }))
}

/// GET /api/v1/products/gtin/{gtin}
pub async fn get_by_gtin(
    State(state): State<AppState>,
    Path(gtin): Path<String>,
) -> AppResult<Json<Product>> {
    validate_gtin(&gtin)?;
    let product = ProductRepo::find_by_gtin(&state.pool, &gtin)
        .await?
        .ok_or(CoreError::NotFound {
            entity: "Product",
            id: gtin,
        })?;
    Ok(Json(product))
}

/// GET /api/v1/products
///
/// All records, newest first.
pub async fn list(State(state): State<AppState>) -> AppResult<Json<Vec<Product>>> {
    let products = ProductRepo::list_all(&state.pool).await?;
    Ok(Json(products))
}

/// GET /api/v1/products/gtin/{gtin}/symbols
///
/// Canonical link plus both scannable encodings for a registered
/// product. 404 when the GTIN resolves to no record.
pub async fn symbols(
    State(state): State<AppState>,
    Path(gtin): Path<String>,
) -> AppResult<Json<SymbolsResponse>> {
    validate_gtin(&gtin)?;
    let product = ProductRepo::find_by_gtin(&state.pool, &gtin)
        .await?
        .ok_or(CoreError::NotFound {
            entity: "Product",
            id: gtin,
        })?;

    let link = canonical_link(&state.config.public_origin, &product.gtin);
    let linear = encode_linear(&product.gtin).map_err(CoreError::from)?;
    let matrix = encode_matrix(&link).map_err(CoreError::from)?;

    Ok(Json(SymbolsResponse {
        canonical_link: link,
        linear: LinearSymbolPayload {
            symbology: linear.symbology.label(),
            svg: linear.svg,
        },
        matrix: MatrixSymbolPayload { svg: matrix.svg },
    }))
}

/// POST /api/v1/products
///
/// Create-or-update by GTIN. Accepts a multipart form with a required
/// `data` field (JSON product fields) and an optional `image` field.
/// The body limit layer has already rejected anything over 16 MiB.
pub async fn upsert(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> AppResult<Json<Product>> {
    let mut input: Option<digilink_core::product::ProductInput> = None;
    let mut image: Option<UploadedImage> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(e.to_string()))?
    {
        let name = field.name().unwrap_or("").to_string();
        match name.as_str() {
            "data" => {
                let text = field
                    .text()
                    .await
                    .map_err(|e| AppError::BadRequest(e.to_string()))?;
                let parsed = serde_json::from_str(&text)
                    .map_err(|e| AppError::BadRequest(format!("Invalid product data: {e}")))?;
                input = Some(parsed);
            }
            "image" => {
                let content_type = field.content_type().unwrap_or("").to_string();
                let extension = image_extension(&content_type).ok_or_else(|| {
                    AppError::BadRequest(
                        "Invalid file type. Only PNG, JPG, JPEG, GIF, and WEBP are allowed."
                            .to_string(),
                    )
                })?;
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::BadRequest(e.to_string()))?;
                image = Some(UploadedImage {
                    bytes: bytes.to_vec(),
                    content_type,
                    extension,
                });
            }
            _ => {}
        }
    }

    let input = input.ok_or_else(|| AppError::BadRequest("Missing data field".to_string()))?;

    let product = upsert::upsert_product(&state.pool, state.assets.as_ref(), input, image).await?;
    Ok(Json(product))
}

/// DELETE /api/v1/products/{id}
///
/// Deletes the record and issues advisory cleanup for its image.
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<serde_json::Value>> {
    let product = ProductRepo::find_by_id(&state.pool, &id)
        .await?
        .ok_or(CoreError::NotFound {
            entity: "Product",
            id,
        })?;

    ProductRepo::delete(&state.pool, &product.id).await?;

    // Asset cleanup is advisory: the record is already gone, a stale
    // object in the store is acceptable.
    if let Some(image_url) = &product.image_url {
        if let Err(err) = state.assets.remove(image_url).await {
            tracing::warn!(%err, image_url, "failed to remove image of deleted product");
        }
    }

    Ok(Json(
        serde_json::json!({ "message": "Product deleted successfully" }),
    ))
}

fn image_extension(content_type: &str) -> Option<&'static str> {
    ALLOWED_IMAGE_TYPES
        .iter()
        .find(|(ct, _)| *ct == content_type)
        .map(|(_, ext)| *ext)
}
