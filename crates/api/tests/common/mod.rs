//! Shared harness for API integration tests.
//!
//! Builds the production router (same middleware stack as `main.rs`)
//! against an ephemeral `#[sqlx::test]` pool and a mock asset store,
//! so the whole wire surface is exercised without S3 or a listener.

#![allow(dead_code)]

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Method, Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use sqlx::PgPool;
use tower::ServiceExt;

use digilink_api::config::ServerConfig;
use digilink_api::router::build_app_router;
use digilink_api::state::AppState;
use digilink_cloud::{AssetStore, CloudError};

/// Boundary used by [`multipart_body`].
pub const BOUNDARY: &str = "digilink-test-boundary";

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        public_origin: "https://example.com".to_string(),
    }
}

/// One object recorded by the mock store.
#[derive(Debug, Clone)]
pub struct StoredObject {
    pub name: String,
    pub content_type: String,
    pub size: usize,
}

/// In-memory [`AssetStore`] with optional failure injection.
///
/// `remove` records the attempted location before failing, so tests
/// can assert that advisory cleanup was issued even when it fails.
#[derive(Default)]
pub struct MockAssetStore {
    pub stored: Mutex<Vec<StoredObject>>,
    pub removed: Mutex<Vec<String>>,
    pub fail_put: AtomicBool,
    pub fail_remove: AtomicBool,
}

impl MockAssetStore {
    pub fn location_of(name: &str) -> String {
        format!("https://cdn.test/product-images/{name}")
    }

    pub fn stored_count(&self) -> usize {
        self.stored.lock().unwrap().len()
    }

    pub fn removed_locations(&self) -> Vec<String> {
        self.removed.lock().unwrap().clone()
    }
}

#[async_trait]
impl AssetStore for MockAssetStore {
    async fn put(
        &self,
        bytes: Vec<u8>,
        name: &str,
        content_type: &str,
    ) -> Result<String, CloudError> {
        if self.fail_put.load(Ordering::SeqCst) {
            return Err(CloudError::Upload("injected upload failure".to_string()));
        }
        self.stored.lock().unwrap().push(StoredObject {
            name: name.to_string(),
            content_type: content_type.to_string(),
            size: bytes.len(),
        });
        Ok(Self::location_of(name))
    }

    async fn remove(&self, location: &str) -> Result<(), CloudError> {
        self.removed.lock().unwrap().push(location.to_string());
        if self.fail_remove.load(Ordering::SeqCst) {
            return Err(CloudError::Remove("injected removal failure".to_string()));
        }
        Ok(())
    }
}

/// Build the full application router plus a handle to the mock store.
pub fn build_test_app(pool: PgPool) -> (Router, Arc<MockAssetStore>) {
    let config = test_config();
    let assets = Arc::new(MockAssetStore::default());

    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
        assets: assets.clone(),
    };

    (build_app_router(state, &config), assets)
}

/// Send a GET request to the app.
pub async fn get(app: Router, uri: &str) -> Response<Body> {
    app.oneshot(
        Request::builder()
            .method(Method::GET)
            .uri(uri)
            .body(Body::empty())
            .unwrap(),
    )
    .await
    .unwrap()
}

/// Send a DELETE request to the app.
pub async fn delete(app: Router, uri: &str) -> Response<Body> {
    app.oneshot(
        Request::builder()
            .method(Method::DELETE)
            .uri(uri)
            .body(Body::empty())
            .unwrap(),
    )
    .await
    .unwrap()
}

/// Assemble a `multipart/form-data` body with a `data` JSON part and an
/// optional `image` part.
pub fn multipart_body(
    data: &serde_json::Value,
    image: Option<(&[u8], &str)>,
) -> Vec<u8> {
    let mut body = Vec::new();

    body.extend_from_slice(format!("--{BOUNDARY}\r\n").as_bytes());
    body.extend_from_slice(b"Content-Disposition: form-data; name=\"data\"\r\n\r\n");
    body.extend_from_slice(data.to_string().as_bytes());
    body.extend_from_slice(b"\r\n");

    if let Some((bytes, content_type)) = image {
        body.extend_from_slice(format!("--{BOUNDARY}\r\n").as_bytes());
        body.extend_from_slice(
            b"Content-Disposition: form-data; name=\"image\"; filename=\"image.bin\"\r\n",
        );
        body.extend_from_slice(format!("Content-Type: {content_type}\r\n\r\n").as_bytes());
        body.extend_from_slice(bytes);
        body.extend_from_slice(b"\r\n");
    }

    body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());
    body
}

/// POST a multipart product submission.
pub async fn post_product(
    app: Router,
    data: &serde_json::Value,
    image: Option<(&[u8], &str)>,
) -> Response<Body> {
    let body = multipart_body(data, image);
    app.oneshot(
        Request::builder()
            .method(Method::POST)
            .uri("/api/v1/products")
            .header(
                "content-type",
                format!("multipart/form-data; boundary={BOUNDARY}"),
            )
            .body(Body::from(body))
            .unwrap(),
    )
    .await
    .unwrap()
}

/// Collect a response body as JSON.
pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}
