use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use parking_lot::RwLock;

use super::{SearchError, SearchHit, SearchProvider};

/// Canned outcome for one query.
#[derive(Debug, Clone)]
pub enum MockResponse {
    Hits(Vec<SearchHit>),
    RateLimited,
    Fail,
}

/// In-memory search provider keyed by exact query string.
pub struct MockSearchProvider {
    name: String,
    responses: RwLock<HashMap<String, MockResponse>>,
    fallback: MockResponse,
    delay: Option<Duration>,
    calls: AtomicUsize,
}

impl MockSearchProvider {
    /// Unknown queries get no hits.
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            responses: RwLock::new(HashMap::new()),
            fallback: MockResponse::Hits(Vec::new()),
            delay: None,
            calls: AtomicUsize::new(0),
        }
    }

    /// Same outcome for every query.
    pub fn always(name: &str, response: MockResponse) -> Self {
        Self {
            fallback: response,
            ..Self::new(name)
        }
    }

    pub fn with_urls(self, query: &str, urls: &[&str]) -> Self {
        let hits = urls.iter().map(|u| SearchHit::new(*u)).collect();
        self.with_response(query, MockResponse::Hits(hits))
    }

    pub fn with_response(self, query: &str, response: MockResponse) -> Self {
        self.responses.write().insert(query.to_string(), response);
        self
    }

    /// Sleeps before answering (for timeout tests).
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl SearchProvider for MockSearchProvider {
    fn name(&self) -> &str {
        &self.name
    }

    async fn search(&self, query: &str, max_results: usize) -> Result<Vec<SearchHit>, SearchError> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }

        let response = self
            .responses
            .read()
            .get(query)
            .cloned()
            .unwrap_or_else(|| self.fallback.clone());

        match response {
            MockResponse::Hits(hits) => Ok(hits.into_iter().take(max_results).collect()),
            MockResponse::RateLimited => Err(SearchError::RateLimited {
                provider: self.name.clone(),
            }),
            MockResponse::Fail => Err(SearchError::Status {
                provider: self.name.clone(),
                status: 503,
            }),
        }
    }
}
