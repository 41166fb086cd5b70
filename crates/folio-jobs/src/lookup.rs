//! Catalog lookup client for table-of-contents enrichment.
//!
//! The lookup service is queried once per ISBN. Its JSON response nests the
//! contents under `item[0].bookinfo.toc`; an empty `item` array, an empty
//! `toc`, or the single-dot sentinel all mean the service has confirmed
//! that no contents exist for the title.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::debug;

use folio_core::defaults::{
    LOOKUP_COVER_DETAIL, LOOKUP_ID_TYPE, LOOKUP_OUTPUT_FORMAT, LOOKUP_TIMEOUT_SECS,
    TOC_ABSENT_SENTINEL,
};
use folio_core::{Error, Result, TocSource};

/// Configuration for the catalog lookup service.
#[derive(Debug, Clone)]
pub struct LookupConfig {
    /// Lookup endpoint URL.
    pub endpoint: String,
    /// API key sent with every request.
    pub api_key: String,
    /// Request timeout in seconds.
    pub timeout_secs: u64,
}

impl LookupConfig {
    /// Create config from environment variables.
    ///
    /// | Variable | Required | Description |
    /// |----------|----------|-------------|
    /// | `FOLIO_LOOKUP_URL` | yes | Lookup endpoint URL |
    /// | `FOLIO_LOOKUP_API_KEY` | yes | API key |
    /// | `FOLIO_LOOKUP_TIMEOUT_SECS` | no | Request timeout (default 10) |
    pub fn from_env() -> Result<Self> {
        let endpoint = std::env::var("FOLIO_LOOKUP_URL")
            .map_err(|_| Error::Config("FOLIO_LOOKUP_URL is not set".into()))?;
        let api_key = std::env::var("FOLIO_LOOKUP_API_KEY")
            .map_err(|_| Error::Config("FOLIO_LOOKUP_API_KEY is not set".into()))?;
        let timeout_secs = std::env::var("FOLIO_LOOKUP_TIMEOUT_SECS")
            .ok()
            .and_then(|v| v.parse::<u64>().ok())
            .unwrap_or(LOOKUP_TIMEOUT_SECS);

        Ok(Self {
            endpoint,
            api_key,
            timeout_secs,
        })
    }
}

#[derive(Debug, Default, Deserialize)]
struct LookupResponse {
    #[serde(default)]
    item: Vec<LookupItem>,
}

#[derive(Debug, Default, Deserialize)]
struct LookupItem {
    #[serde(default)]
    bookinfo: LookupBookInfo,
}

#[derive(Debug, Default, Deserialize)]
struct LookupBookInfo {
    #[serde(default)]
    toc: String,
}

/// HTTP client for the catalog lookup service.
pub struct CatalogLookupClient {
    client: Client,
    endpoint: String,
    api_key: String,
}

impl CatalogLookupClient {
    /// Create a new lookup client.
    pub fn new(config: LookupConfig) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            client,
            endpoint: config.endpoint,
            api_key: config.api_key,
        }
    }
}

#[async_trait]
impl TocSource for CatalogLookupClient {
    /// Fetch the raw table-of-contents text for an ISBN.
    ///
    /// `Ok(None)` is a confirmed absence; transport failures and malformed
    /// responses are errors for the caller to isolate.
    async fn fetch_toc(&self, isbn: &str) -> Result<Option<String>> {
        let body = self
            .client
            .get(&self.endpoint)
            .query(&[
                ("apiKey", self.api_key.as_str()),
                ("itemId", isbn),
                ("idType", LOOKUP_ID_TYPE),
                ("outputFormat", LOOKUP_OUTPUT_FORMAT),
                ("coverDetail", LOOKUP_COVER_DETAIL),
            ])
            .send()
            .await?
            .error_for_status()?
            .text()
            .await?;

        let parsed: LookupResponse = serde_json::from_str(&body)?;

        let Some(first) = parsed.item.first() else {
            debug!(
                subsystem = "jobs",
                component = "lookup",
                op = "fetch_toc",
                isbn,
                "Lookup returned no items"
            );
            return Ok(None);
        };

        let toc = first.bookinfo.toc.trim();
        if toc.is_empty() || toc == TOC_ABSENT_SENTINEL {
            return Ok(None);
        }
        Ok(Some(toc.to_string()))
    }
}
