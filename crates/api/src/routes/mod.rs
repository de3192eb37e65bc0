pub mod health;
pub mod products;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// ```text
/// /products                      list, create-or-update (multipart)
/// /products/check/{gtin}         existence check
/// /products/gtin/{gtin}          fetch by GTIN
/// /products/gtin/{gtin}/symbols  canonical link + barcode + QR
/// /products/{id}                 delete
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new().nest("/products", products::router())
}
