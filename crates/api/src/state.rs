use std::sync::Arc;

use digilink_cloud::AssetStore;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: digilink_db::DbPool,
    /// Server configuration (canonical link origin, timeouts, CORS).
    pub config: Arc<ServerConfig>,
    /// Product image store, constructed once at startup.
    pub assets: Arc<dyn AssetStore>,
}
