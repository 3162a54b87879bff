//! Site directory HTTP client.

use serde_json::Value;

use super::error::SiteError;

/// Public supercharger directory.
pub const DEFAULT_SOURCE_URL: &str = "https://supercharge.info/service/supercharge/allSites";

/// Default request timeout in seconds.
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Configuration for the site directory client.
#[derive(Debug, Clone)]
pub struct SiteClientConfig {
    /// URL returning the JSON array of sites
    pub source_url: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl SiteClientConfig {
    /// Create a new config fetching from the given URL.
    pub fn new(source_url: impl Into<String>) -> Self {
        Self {
            source_url: source_url.into(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }

    /// Set request timeout.
    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }
}

impl Default for SiteClientConfig {
    fn default() -> Self {
        Self::new(DEFAULT_SOURCE_URL)
    }
}

/// Client for the site directory.
///
/// Issues a single plain GET per fetch: no query parameters, no
/// pagination, no retries.
#[derive(Debug, Clone)]
pub struct SiteClient {
    http: reqwest::Client,
    source_url: String,
}

impl SiteClient {
    /// Create a new site directory client.
    pub fn new(config: SiteClientConfig) -> Result<Self, SiteError> {
        let http = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            source_url: config.source_url,
        })
    }

    /// The URL this client fetches from.
    pub fn source_url(&self) -> &str {
        &self.source_url
    }

    /// Fetch the raw directory payload.
    ///
    /// The body is returned as untyped JSON so the pipeline can decide how
    /// to treat an absent, empty or oddly shaped payload. An empty body is
    /// reported as `Value::Null`.
    pub async fn fetch_all(&self) -> Result<Value, SiteError> {
        let response = self.http.get(&self.source_url).send().await?;
        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(SiteError::Api {
                status: status.as_u16(),
                message: body.chars().take(500).collect(),
            });
        }

        let body = response.text().await?;
        if body.trim().is_empty() {
            return Ok(Value::Null);
        }

        serde_json::from_str(&body).map_err(|e| SiteError::Json {
            message: e.to_string(),
        })
    }
}
