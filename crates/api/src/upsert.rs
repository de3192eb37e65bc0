//! Record upsert coordinator.
//!
//! Decides insert vs. replace for a validated product submission and
//! reconciles the image asset lifecycle. The existence check performed
//! by the UI earlier is advisory only; this module re-resolves at
//! write time and lets the unique index arbitrate races.

use digilink_cloud::AssetStore;
use digilink_core::product::{self, ProductInput};
use digilink_db::models::product::{Product, ProductFields};
use digilink_db::repositories::ProductRepo;
use digilink_db::DbPool;
use uuid::Uuid;

use crate::error::{AppError, AppResult};

/// A decoded image part from the multipart request.
#[derive(Debug, Clone)]
pub struct UploadedImage {
    pub bytes: Vec<u8>,
    pub content_type: String,
    /// File extension derived from the content type.
    pub extension: &'static str,
}

/// Create or fully replace the product identified by `input.gtin`.
///
/// Steps, in order:
/// 1. Field validation -- rejects before any side effect.
/// 2. Authoritative re-resolution of the GTIN.
/// 3. Asset reconciliation: upload the new image (failure aborts the
///    whole write), advisory-delete the one it replaces, or preserve
///    the stored location when no new image arrives.
/// 4. Insert with a fresh opaque id, or replace every mutable field of
///    the existing record (`id`, `gtin`, `created_at` stay fixed).
///
/// A concurrent creation race is not serialized here: the losing insert
/// trips `uq_products_gtin` and surfaces as a 409.
pub async fn upsert_product(
    pool: &DbPool,
    assets: &dyn AssetStore,
    input: ProductInput,
    image: Option<UploadedImage>,
) -> AppResult<Product> {
    product::validate_input(&input)?;

    let existing = ProductRepo::find_by_gtin(pool, &input.gtin).await?;

    let image_url = match image {
        Some(upload) => {
            // Collision-resistant object name; the GTIN prefix keeps
            // the bucket browsable.
            let name = format!("{}-{}.{}", input.gtin, Uuid::new_v4(), upload.extension);
            let location = assets
                .put(upload.bytes, &name, &upload.content_type)
                .await?;

            if let Some(old) = existing.as_ref().and_then(|p| p.image_url.as_deref()) {
                if let Err(err) = assets.remove(old).await {
                    tracing::warn!(%err, old, "failed to remove replaced product image");
                }
            }
            Some(location)
        }
        // No new upload: keep whatever the record already references,
        // falling back to a caller-supplied pre-existing URL.
        None => existing
            .as_ref()
            .and_then(|p| p.image_url.clone())
            .or_else(|| input.image_url.clone()),
    };

    let fields = ProductFields::from_input(input, image_url);

    let product = match existing {
        Some(prior) => ProductRepo::replace(pool, &prior.id, &fields)
            .await?
            .ok_or_else(|| {
                AppError::Core(digilink_core::error::CoreError::Conflict(
                    "Product was removed while the update was in flight".to_string(),
                ))
            })?,
        None => ProductRepo::insert(pool, &fields).await?,
    };

    Ok(product)
}
