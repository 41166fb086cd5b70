//! Durable object storage backend over HTTP.
//!
//! Buckets are addressed S3-style: objects are written with
//! `PUT {endpoint}/{bucket}/{key}` and served from
//! `{public_base}{bucket}/{key}`. The public base may differ from the
//! write endpoint when a CDN or reverse proxy fronts the store.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{header, Client};

use folio_core::{Error, ObjectStore, Result};

/// Request timeout for object writes (seconds).
const PUT_TIMEOUT_SECS: u64 = 30;

/// Configuration for the object store.
#[derive(Debug, Clone)]
pub struct StoreConfig {
    /// Write endpoint URL.
    pub endpoint: String,
    /// Bucket name.
    pub bucket: String,
    /// Base URL that stored objects are served from. Defaults to the
    /// write endpoint.
    pub public_base: String,
}

impl StoreConfig {
    /// Create config from environment variables.
    ///
    /// | Variable | Required | Description |
    /// |----------|----------|-------------|
    /// | `FOLIO_STORE_URL` | yes | Write endpoint URL |
    /// | `FOLIO_STORE_BUCKET` | yes | Bucket name |
    /// | `FOLIO_STORE_PUBLIC_URL` | no | Serving base (default: endpoint) |
    pub fn from_env() -> Result<Self> {
        let endpoint = std::env::var("FOLIO_STORE_URL")
            .map_err(|_| Error::Config("FOLIO_STORE_URL is not set".into()))?;
        let bucket = std::env::var("FOLIO_STORE_BUCKET")
            .map_err(|_| Error::Config("FOLIO_STORE_BUCKET is not set".into()))?;
        let public_base = std::env::var("FOLIO_STORE_PUBLIC_URL").unwrap_or_else(|_| endpoint.clone());

        Ok(Self {
            endpoint,
            bucket,
            public_base,
        })
    }
}

/// HTTP implementation of [`ObjectStore`].
pub struct HttpObjectStore {
    client: Client,
    endpoint: String,
    bucket: String,
    public_base: String,
}

impl HttpObjectStore {
    /// Create a new store from config; URL slashes are normalized once here.
    pub fn new(config: StoreConfig) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(PUT_TIMEOUT_SECS))
            .build()
            .expect("Failed to create HTTP client");

        let public_base = if config.public_base.ends_with('/') {
            config.public_base
        } else {
            format!("{}/", config.public_base)
        };

        Self {
            client,
            endpoint: config.endpoint.trim_end_matches('/').to_string(),
            bucket: config.bucket,
            public_base,
        }
    }

    fn object_url(&self, key: &str) -> String {
        format!("{}/{}/{}", self.endpoint, self.bucket, key)
    }
}

#[async_trait]
impl ObjectStore for HttpObjectStore {
    async fn put(&self, key: &str, bytes: &[u8], content_type: &str) -> Result<()> {
        let response = self
            .client
            .put(self.object_url(key))
            .header(header::CONTENT_TYPE, content_type)
            .body(bytes.to_vec())
            .send()
            .await
            .map_err(|e| Error::Storage(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::Storage(format!("HTTP {status} storing {key}")));
        }
        Ok(())
    }

    fn public_url(&self, key: &str) -> String {
        format!("{}{}/{}", self.public_base, self.bucket, key)
    }
}
