//! Route definitions for the `/products` resource.

use axum::routing::{delete, get};
use axum::Router;

use crate::handlers::product;
use crate::state::AppState;

/// Routes mounted at `/products`.
///
/// ```text
/// GET    /                     -> list
/// POST   /                     -> upsert (multipart: data + optional image)
/// GET    /check/{gtin}         -> check
/// GET    /gtin/{gtin}          -> get_by_gtin
/// GET    /gtin/{gtin}/symbols  -> symbols
/// DELETE /{id}                 -> delete
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(product::list).post(product::upsert))
        .route("/check/{gtin}", get(product::check))
        .route("/gtin/{gtin}", get(product::get_by_gtin))
        .route("/gtin/{gtin}/symbols", get(product::symbols))
        .route("/{id}", delete(product::delete))
}
