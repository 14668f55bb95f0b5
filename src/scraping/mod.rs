mod extract;
mod metadata;

pub use extract::extract_document;

use std::sync::Arc;

use thiserror::Error;
use tracing::debug;
use url::Url;

use crate::core::types::ExtractedDocument;
use crate::core::AppState;

/// Why a single URL produced no markup. Callers log these and move on; a
/// fetch failure is "zero documents from this URL", never fatal.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("invalid URL: {0}")]
    InvalidUrl(String),
    #[error("unexpected HTTP status {0}")]
    Status(reqwest::StatusCode),
    #[error("request timed out")]
    Timeout,
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),
}

/// Fetches pages through the shared pooled client and turns their markup
/// into normalized documents.
pub struct PageScraper {
    client: reqwest::Client,
    outbound_limit: Arc<tokio::sync::Semaphore>,
}

impl PageScraper {
    pub fn new(state: &AppState) -> Self {
        Self {
            client: state.http_client.clone(),
            outbound_limit: Arc::clone(&state.outbound_limit),
        }
    }

    /// Fetch one URL and return its raw body.
    ///
    /// Holds an outbound-limit permit for the duration of the request so the
    /// process-wide in-flight connection cap is never exceeded.
    pub async fn fetch(&self, url: &str) -> Result<String, FetchError> {
        let parsed = Url::parse(url).map_err(|e| FetchError::InvalidUrl(format!("{url}: {e}")))?;
        if parsed.scheme() != "http" && parsed.scheme() != "https" {
            return Err(FetchError::InvalidUrl(format!(
                "{url}: URL must use HTTP or HTTPS"
            )));
        }

        let _permit = self
            .outbound_limit
            .acquire()
            .await
            .expect("semaphore closed");

        let response = self.client.get(url).send().await.map_err(|e| {
            if e.is_timeout() {
                FetchError::Timeout
            } else {
                FetchError::Network(e)
            }
        })?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status(status));
        }

        response.text().await.map_err(|e| {
            if e.is_timeout() {
                FetchError::Timeout
            } else {
                FetchError::Network(e)
            }
        })
    }

    /// Fetch one URL and extract its content.
    ///
    /// `Ok(None)` means the page yielded no usable content under either
    /// extraction path — a normal skip outcome, not an error.
    pub async fn fetch_and_extract(
        &self,
        url: &str,
    ) -> Result<Option<ExtractedDocument>, FetchError> {
        let html = self.fetch(url).await?;
        let document = extract_document(&html, url);
        if document.is_none() {
            debug!("No usable content extracted from {}", url);
        }
        Ok(document)
    }
}
