//! Object storage for product images.
//!
//! [`AssetStore`] is the seam the upsert coordinator works against; the
//! production implementation targets any S3-compatible endpoint. The
//! store is constructed once at startup and shared via `Arc` -- no
//! other component builds its own client.

use async_trait::async_trait;
use aws_config::BehaviorVersion;
use aws_credential_types::Credentials;
use aws_sdk_s3::primitives::ByteStream;

#[derive(Debug, thiserror::Error)]
pub enum CloudError {
    #[error("object upload failed: {0}")]
    Upload(String),

    #[error("object removal failed: {0}")]
    Remove(String),

    #[error("location is not served by this store: {0}")]
    ForeignLocation(String),
}

/// Binary asset storage keyed by object name, addressed by public URL.
///
/// `remove` is best-effort from the caller's point of view: failures
/// are reported, but callers performing cleanup log and move on.
#[async_trait]
pub trait AssetStore: Send + Sync {
    /// Store an object and return its public location.
    async fn put(
        &self,
        bytes: Vec<u8>,
        name: &str,
        content_type: &str,
    ) -> Result<String, CloudError>;

    /// Remove an object by the public location `put` returned.
    async fn remove(&self, location: &str) -> Result<(), CloudError>;
}

/// S3-compatible asset store (AWS S3, MinIO, Supabase storage).
pub struct S3AssetStore {
    client: aws_sdk_s3::Client,
    bucket: String,
    /// Base under which stored objects are publicly reachable,
    /// without a trailing slash.
    public_base_url: String,
}

impl S3AssetStore {
    /// Build the store from environment configuration.
    ///
    /// | Env Var                | Meaning                                  |
    /// |------------------------|------------------------------------------|
    /// | `S3_BUCKET`            | target bucket (required)                 |
    /// | `S3_PUBLIC_URL`        | public base URL for objects (required)   |
    /// | `S3_ENDPOINT`          | endpoint override for non-AWS stores     |
    /// | `S3_ACCESS_KEY_ID`     | static credentials (optional pair)       |
    /// | `S3_SECRET_ACCESS_KEY` |                                          |
    pub async fn from_env() -> Self {
        let bucket = std::env::var("S3_BUCKET").expect("S3_BUCKET must be set");
        let public_base_url = std::env::var("S3_PUBLIC_URL")
            .expect("S3_PUBLIC_URL must be set")
            .trim_end_matches('/')
            .to_string();

        let base = aws_config::defaults(BehaviorVersion::latest()).load().await;
        let mut builder = aws_sdk_s3::config::Builder::from(&base);

        if let Ok(endpoint) = std::env::var("S3_ENDPOINT") {
            // Non-AWS stores generally only speak path-style addressing.
            builder = builder.endpoint_url(endpoint).force_path_style(true);
        }
        if let (Ok(key_id), Ok(secret)) = (
            std::env::var("S3_ACCESS_KEY_ID"),
            std::env::var("S3_SECRET_ACCESS_KEY"),
        ) {
            builder = builder.credentials_provider(Credentials::new(
                key_id, secret, None, None, "digilink-env",
            ));
        }

        Self {
            client: aws_sdk_s3::Client::from_conf(builder.build()),
            bucket,
            public_base_url,
        }
    }

    /// Recover the object key from a public location previously
    /// returned by [`AssetStore::put`].
    fn key_from_location<'a>(&self, location: &'a str) -> Result<&'a str, CloudError> {
        location
            .strip_prefix(&self.public_base_url)
            .and_then(|rest| rest.strip_prefix('/'))
            .filter(|key| !key.is_empty())
            .ok_or_else(|| CloudError::ForeignLocation(location.to_string()))
    }
}

#[async_trait]
impl AssetStore for S3AssetStore {
    async fn put(
        &self,
        bytes: Vec<u8>,
        name: &str,
        content_type: &str,
    ) -> Result<String, CloudError> {
        let size = bytes.len();
        self.client
            .put_object()
            .bucket(&self.bucket)
            .key(name)
            .content_type(content_type)
            .body(ByteStream::from(bytes))
            .send()
            .await
            .map_err(|e| CloudError::Upload(e.to_string()))?;

        tracing::debug!(name, size, "stored product image");
        Ok(format!("{}/{name}", self.public_base_url))
    }

    async fn remove(&self, location: &str) -> Result<(), CloudError> {
        let key = self.key_from_location(location)?;
        self.client
            .delete_object()
            .bucket(&self.bucket)
            .key(key)
            .send()
            .await
            .map_err(|e| CloudError::Remove(e.to_string()))?;

        tracing::debug!(key, "removed product image");
        Ok(())
    }
}
