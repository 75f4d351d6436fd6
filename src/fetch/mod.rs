//! Document retrieval and cleaning.
//!
//! [`HttpFetcher`] downloads a page with a browser-like user agent, retries
//! transient failures with exponential backoff and returns cleaned plain text.

pub mod error;
pub mod extract;
#[cfg(any(test, feature = "mock"))]
mod mock;


pub use error::FetchError;
pub use extract::extract_main_text;
#[cfg(any(test, feature = "mock"))]
pub use mock::MockFetcher;

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use reqwest::{Client, Response};
use tracing::{debug, warn};
use url::Url;

use crate::constants::{FETCH_MAX_RETRIES, FETCH_RETRY_BACKOFF, MAX_BODY_BYTES};

/// Fetches a URL and returns its cleaned natural-language text.
#[async_trait]
pub trait DocumentFetcher: Send + Sync {
    async fn fetch(&self, url: &str) -> Result<String, FetchError>;
}

/// Builds the shared HTTP client used by fetchers and search providers.
pub fn build_http_client(user_agent: &str, timeout: Duration) -> Result<Client, FetchError> {
    Ok(Client::builder()
        .user_agent(user_agent)
        .timeout(timeout)
        .build()?)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ContentKind {
    Html,
    PlainText,
}

/// Classifies a `Content-Type` header; a missing header is treated as HTML.
fn content_kind(content_type: Option<&str>) -> Result<ContentKind, FetchError> {
    let Some(raw) = content_type else {
        return Ok(ContentKind::Html);
    };

    let mime = raw
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase();

    match mime.as_str() {
        "text/html" | "application/xhtml+xml" | "" => Ok(ContentKind::Html),
        "text/plain" => Ok(ContentKind::PlainText),
        _ => Err(FetchError::NonText {
            content_type: raw.to_string(),
        }),
    }
}

/// reqwest-backed [`DocumentFetcher`].
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
    max_retries: u32,
    backoff: Duration,
    max_body_bytes: usize,
}

impl HttpFetcher {
    pub fn new(client: Client) -> Self {
        Self {
            client,
            max_retries: FETCH_MAX_RETRIES,
            backoff: FETCH_RETRY_BACKOFF,
            max_body_bytes: MAX_BODY_BYTES,
        }
    }

    pub fn with_retries(mut self, max_retries: u32, backoff: Duration) -> Self {
        self.max_retries = max_retries;
        self.backoff = backoff;
        self
    }

    async fn get_with_retries(&self, url: &Url) -> Result<Response, FetchError> {
        let mut attempt = 0;
        loop {
            let result = match self.client.get(url.clone()).send().await {
                Ok(response) if response.status().is_success() => return Ok(response),
                Ok(response) => Err(FetchError::Status {
                    url: url.to_string(),
                    status: response.status().as_u16(),
                }),
                Err(e) => Err(FetchError::Http(e)),
            };

            match result {
                Err(e) if e.is_transient() && attempt < self.max_retries => {
                    let delay = self.backoff * 2u32.pow(attempt);
                    debug!(url = %url, attempt, error = %e, ?delay, "Retrying fetch");
                    tokio::time::sleep(delay).await;
                    attempt += 1;
                }
                other => return other,
            }
        }
    }

    /// Reads at most `max_body_bytes`, dropping the rest.
    async fn read_capped(&self, mut response: Response, url: &Url) -> Result<String, FetchError> {
        let mut body = Vec::new();
        while let Some(chunk) = response.chunk().await? {
            let room = self.max_body_bytes - body.len();
            if chunk.len() >= room {
                body.extend_from_slice(&chunk[..room]);
                warn!(url = %url, limit = self.max_body_bytes, "Response body truncated");
                break;
            }
            body.extend_from_slice(&chunk);
        }
        Ok(String::from_utf8_lossy(&body).into_owned())
    }
}

#[async_trait]
impl DocumentFetcher for HttpFetcher {
    async fn fetch(&self, url: &str) -> Result<String, FetchError> {
        let parsed = Url::parse(url).map_err(|_| FetchError::InvalidUrl {
            url: url.to_string(),
        })?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(FetchError::InvalidUrl {
                url: url.to_string(),
            });
        }

        let response = self.get_with_retries(&parsed).await?;
        let kind = content_kind(
            response
                .headers()
                .get(CONTENT_TYPE)
                .and_then(|v| v.to_str().ok()),
        )?;

        let body = self.read_capped(response, &parsed).await?;
        let text = match kind {
            ContentKind::Html => extract_main_text(&body),
            ContentKind::PlainText => body.trim().to_string(),
        };

        if text.is_empty() {
            return Err(FetchError::EmptyContent);
        }

        debug!(url = %parsed, chars = text.chars().count(), "Fetched document");
        Ok(text)
    }
}
