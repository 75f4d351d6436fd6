use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use parking_lot::{Mutex, RwLock};

use super::{DocumentFetcher, FetchError};

#[derive(Debug, Clone)]
enum MockPage {
    Text(String),
    Delayed(Duration, String),
    Fail(u16),
}

/// In-memory fetcher; unknown URLs answer 404.
#[derive(Default)]
pub struct MockFetcher {
    pages: RwLock<HashMap<String, MockPage>>,
    fetched: Mutex<Vec<String>>,
}

impl MockFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_page(self, url: &str, text: &str) -> Self {
        self.insert(url, MockPage::Text(text.to_string()))
    }

    /// Answers after `delay` (for per-fetch and overall deadline tests).
    pub fn with_delayed_page(self, url: &str, delay: Duration, text: &str) -> Self {
        self.insert(url, MockPage::Delayed(delay, text.to_string()))
    }

    pub fn with_failure(self, url: &str, status: u16) -> Self {
        self.insert(url, MockPage::Fail(status))
    }

    /// URLs requested so far, in call order.
    pub fn fetched_urls(&self) -> Vec<String> {
        self.fetched.lock().clone()
    }

    fn insert(self, url: &str, page: MockPage) -> Self {
        self.pages.write().insert(url.to_string(), page);
        self
    }
}

#[async_trait]
impl DocumentFetcher for MockFetcher {
    async fn fetch(&self, url: &str) -> Result<String, FetchError> {
        self.fetched.lock().push(url.to_string());

        let page = self.pages.read().get(url).cloned();
        let text = match page {
            Some(MockPage::Text(text)) => text,
            Some(MockPage::Delayed(delay, text)) => {
                tokio::time::sleep(delay).await;
                text
            }
            Some(MockPage::Fail(status)) => {
                return Err(FetchError::Status {
                    url: url.to_string(),
                    status,
                });
            }
            None => {
                return Err(FetchError::Status {
                    url: url.to_string(),
                    status: 404,
                });
            }
        };

        if text.trim().is_empty() {
            return Err(FetchError::EmptyContent);
        }
        Ok(text)
    }
}
