//! Shared fixtures for integration tests.

#![allow(dead_code)]

use std::sync::Arc;
use std::time::Duration;

use verifact::{
    Config, CredibilityTable, EngineHandles, FactChecker, MockFetcher, NliClassifier,
    SearchProvider, SentenceEmbedder, StanceClassifier,
};

pub const CLAIM: &str = "The Eiffel Tower was completed in 1889";

pub const SUPPORT_PAGE: &str = "The Eiffel Tower was completed in 1889 in Paris. \
    Millions of visitors climb its stairs every year.";

pub const REFUTE_PAGE: &str = "Historians note the Eiffel Tower was not completed in 1889. \
    The viral post mixed up several different dates.";

pub const UNRELATED_PAGE: &str = "Tomatoes grow best in warm summer soil with plenty of water. \
    Gardeners often stake the plants to keep fruit off the ground.";

/// Builds a checker over the given search and fetcher, with stub models.
pub struct CheckerBuilder {
    search: Arc<dyn SearchProvider>,
    fetcher: MockFetcher,
    classifier: Option<Arc<dyn StanceClassifier>>,
    config: Config,
}

impl CheckerBuilder {
    pub fn new(search: Arc<dyn SearchProvider>) -> Self {
        Self {
            search,
            fetcher: MockFetcher::new(),
            classifier: None,
            config: Config {
                overall_timeout: Duration::from_secs(10),
                ..Default::default()
            },
        }
    }

    pub fn page(mut self, url: &str, text: &str) -> Self {
        self.fetcher = self.fetcher.with_page(url, text);
        self
    }

    pub fn slow_page(mut self, url: &str, delay: Duration, text: &str) -> Self {
        self.fetcher = self.fetcher.with_delayed_page(url, delay, text);
        self
    }

    pub fn classifier(mut self, classifier: Arc<dyn StanceClassifier>) -> Self {
        self.classifier = Some(classifier);
        self
    }

    pub fn overall_timeout(mut self, timeout: Duration) -> Self {
        self.config.overall_timeout = timeout;
        self
    }

    pub fn build(self) -> FactChecker {
        let classifier = self.classifier.unwrap_or_else(|| {
            Arc::new(NliClassifier::stub().expect("stub stance classifier"))
        });
        let handles = EngineHandles {
            search: self.search,
            fetcher: Arc::new(self.fetcher),
            embedder: Arc::new(SentenceEmbedder::stub().expect("stub embedder")),
            classifier,
            credibility: Arc::new(CredibilityTable::builtin()),
        };
        FactChecker::new(handles, self.config)
    }
}

pub fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}
