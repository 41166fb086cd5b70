//! Cover image download from the external host.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{header, Client, Url};

use folio_core::defaults::{BROWSER_USER_AGENT, DOWNLOAD_TIMEOUT_SECS};
use folio_core::{CoverFetcher, Error, FetchedImage, Result};

/// HTTP downloader for externally hosted covers.
///
/// Sends a browser `User-Agent` and a `Referer` matching the image origin;
/// the host serves plain-agent requests a 403. Timeouts are short and
/// per-call, with failures isolated to the record being migrated.
pub struct HttpCoverFetcher {
    client: Client,
}

impl HttpCoverFetcher {
    /// Create a fetcher with the default connect/read timeout.
    pub fn new() -> Self {
        Self::with_timeout(Duration::from_secs(DOWNLOAD_TIMEOUT_SECS))
    }

    /// Create a fetcher with a custom timeout.
    pub fn with_timeout(timeout: Duration) -> Self {
        let client = Client::builder()
            .connect_timeout(timeout)
            .timeout(timeout)
            .user_agent(BROWSER_USER_AGENT)
            .build()
            .expect("Failed to create HTTP client");

        Self { client }
    }

    /// Referer for a source URL: its own origin.
    fn referer_for(url: &str) -> Option<String> {
        let parsed = Url::parse(url).ok()?;
        let host = parsed.host_str()?;
        Some(format!("{}://{}/", parsed.scheme(), host))
    }
}

impl Default for HttpCoverFetcher {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CoverFetcher for HttpCoverFetcher {
    async fn fetch(&self, url: &str) -> Result<FetchedImage> {
        let mut request = self.client.get(url);
        if let Some(referer) = Self::referer_for(url) {
            request = request.header(header::REFERER, referer);
        }

        let response = request
            .send()
            .await
            .map_err(|e| Error::Download(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::Download(format!("HTTP {status} from {url}")));
        }

        let content_type = response
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(String::from);

        let bytes = response
            .bytes()
            .await
            .map_err(|e| Error::Download(e.to_string()))?;

        Ok(FetchedImage {
            bytes: bytes.to_vec(),
            content_type,
        })
    }
}
