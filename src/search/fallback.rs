use std::sync::Arc;

use async_trait::async_trait;
use reqwest::Client;
use tracing::{debug, info, warn};

use super::{
    BraveProvider, DuckDuckGoProvider, SearchError, SearchHit, SearchProvider, TavilyProvider,
    retain_web_hits,
};
use crate::config::Config;

/// Ordered provider chain; the first non-error, non-empty answer wins.
///
/// If every provider answered but none had hits the result is an empty list.
/// [`SearchError::AllProvidersFailed`] is returned only when every provider
/// errored (including rate limits).
pub struct FallbackSearchClient {
    providers: Vec<Arc<dyn SearchProvider>>,
}

impl std::fmt::Debug for FallbackSearchClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FallbackSearchClient")
            .field("providers", &self.provider_names())
            .finish()
    }
}

impl FallbackSearchClient {
    pub fn new(providers: Vec<Arc<dyn SearchProvider>>) -> Result<Self, SearchError> {
        if providers.is_empty() {
            return Err(SearchError::NoProviders);
        }
        Ok(Self { providers })
    }

    /// Tavily, then Brave, then DuckDuckGo, each only when configured.
    pub fn from_config(config: &Config, client: Client) -> Result<Self, SearchError> {
        let mut providers: Vec<Arc<dyn SearchProvider>> = Vec::new();

        if let Some(ref key) = config.tavily_api_key {
            providers.push(Arc::new(TavilyProvider::new(client.clone(), key)));
        }
        if let Some(ref key) = config.brave_api_key {
            providers.push(Arc::new(BraveProvider::new(client.clone(), key)));
        }
        if config.duckduckgo_enabled {
            providers.push(Arc::new(DuckDuckGoProvider::new(client)));
        }

        let chain = Self::new(providers)?;
        info!(providers = ?chain.provider_names(), "Search chain configured");
        Ok(chain)
    }

    pub fn provider_names(&self) -> Vec<&str> {
        self.providers.iter().map(|p| p.name()).collect()
    }
}

#[async_trait]
impl SearchProvider for FallbackSearchClient {
    fn name(&self) -> &str {
        "fallback"
    }

    async fn search(&self, query: &str, max_results: usize) -> Result<Vec<SearchHit>, SearchError> {
        let mut failures = Vec::new();

        for provider in &self.providers {
            match provider.search(query, max_results).await {
                Ok(hits) => {
                    let hits = retain_web_hits(hits, max_results);
                    if !hits.is_empty() {
                        debug!(
                            provider = provider.name(),
                            hits = hits.len(),
                            "Search provider answered"
                        );
                        return Ok(hits);
                    }
                    debug!(provider = provider.name(), "Search provider returned no hits");
                }
                Err(e) => {
                    warn!(
                        provider = provider.name(),
                        rate_limited = e.is_rate_limited(),
                        error = %e,
                        "Search provider failed, trying next"
                    );
                    failures.push((provider.name().to_string(), e.to_string()));
                }
            }
        }

        if failures.len() == self.providers.len() {
            return Err(SearchError::AllProvidersFailed { failures });
        }

        Ok(Vec::new())
    }
}
