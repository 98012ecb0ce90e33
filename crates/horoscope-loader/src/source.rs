use async_trait::async_trait;
use tracing::debug;

use crate::error::LoaderError;

/// Where the horoscope feed comes from. Mockable for testing.
#[async_trait]
pub trait FeedSource: Send + Sync {
    fn name(&self) -> &str;

    /// Fetch the raw response body. One call is one network request.
    async fn fetch(&self) -> Result<String, LoaderError>;
}

/// Fetches the feed with a single HTTP GET.
pub struct HttpFeedSource {
    client: reqwest::Client,
    url: String,
}

impl HttpFeedSource {
    pub fn new(url: impl Into<String>) -> Result<Self, LoaderError> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("horoscope/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| LoaderError::Network(format!("Failed to build HTTP client: {e}")))?;
        Ok(Self {
            client,
            url: url.into(),
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl FeedSource for HttpFeedSource {
    fn name(&self) -> &str {
        "http"
    }

    async fn fetch(&self) -> Result<String, LoaderError> {
        debug!(url = %self.url, "Requesting horoscope feed");

        let response = self
            .client
            .get(&self.url)
            .send()
            .await
            .map_err(|e| LoaderError::Network(e.to_string()))?
            .error_for_status()
            .map_err(|e| LoaderError::Network(e.to_string()))?;

        response
            .text()
            .await
            .map_err(|e| LoaderError::Network(format!("Failed to read body: {e}")))
    }
}
