//! Web search behind a provider fallback chain.
//!
//! Each provider implements [`SearchProvider`]; [`FallbackSearchClient`] tries
//! them in a fixed priority order (Tavily, Brave, DuckDuckGo) and is itself a
//! provider, so callers never see the chain.

mod brave;
mod duckduckgo;
pub mod error;
mod fallback;
#[cfg(any(test, feature = "mock"))]
mod mock;
mod tavily;


pub use brave::BraveProvider;
pub use duckduckgo::DuckDuckGoProvider;
pub use error::SearchError;
pub use fallback::FallbackSearchClient;
#[cfg(any(test, feature = "mock"))]
pub use mock::{MockResponse, MockSearchProvider};
pub use tavily::TavilyProvider;

use async_trait::async_trait;
use reqwest::{Response, StatusCode};
use serde::{Deserialize, Serialize};
use url::Url;

/// One ranked search result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchHit {
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub snippet: Option<String>,
}

impl SearchHit {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            title: None,
            snippet: None,
        }
    }

    pub fn with_snippet(mut self, snippet: impl Into<String>) -> Self {
        self.snippet = Some(snippet.into());
        self
    }
}

#[async_trait]
pub trait SearchProvider: Send + Sync {
    /// Short provider name for logs and failure reports.
    fn name(&self) -> &str;

    /// Up to `max_results` hits for `query`, best first.
    async fn search(&self, query: &str, max_results: usize) -> Result<Vec<SearchHit>, SearchError>;
}

/// Keeps http(s) hits only, in order, capped at `max_results`.
pub fn retain_web_hits(hits: Vec<SearchHit>, max_results: usize) -> Vec<SearchHit> {
    hits.into_iter()
        .filter(|hit| {
            Url::parse(&hit.url)
                .map(|u| matches!(u.scheme(), "http" | "https") && u.host_str().is_some())
                .unwrap_or(false)
        })
        .take(max_results)
        .collect()
}

/// Maps 429 to [`SearchError::RateLimited`] and other failures to
/// [`SearchError::Status`].
pub(crate) fn check_status(provider: &str, response: Response) -> Result<Response, SearchError> {
    let status = response.status();
    if status == StatusCode::TOO_MANY_REQUESTS {
        return Err(SearchError::RateLimited {
            provider: provider.to_string(),
        });
    }
    if !status.is_success() {
        return Err(SearchError::Status {
            provider: provider.to_string(),
            status: status.as_u16(),
        });
    }
    Ok(response)
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.map(|v| v.trim().to_string()).filter(|v| !v.is_empty())
}
