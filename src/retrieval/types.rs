use std::sync::Arc;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::config::Config;
use crate::credibility::CredibilityTable;
use crate::embedding::TextEmbedder;
use crate::fetch::DocumentFetcher;
use crate::search::SearchProvider;
use crate::stance::StanceClassifier;
use crate::verdict::Evidence;

/// Process-wide collaborator handles, acquired once and shared by every
/// retrieval unit.
#[derive(Clone)]
pub struct EngineHandles {
    pub search: Arc<dyn SearchProvider>,
    pub fetcher: Arc<dyn DocumentFetcher>,
    pub embedder: Arc<dyn TextEmbedder>,
    pub classifier: Arc<dyn StanceClassifier>,
    pub credibility: Arc<CredibilityTable>,
}

/// Coordinator limits (taken from [`Config`]).
#[derive(Debug, Clone, PartialEq)]
pub struct RetrievalSettings {
    pub max_documents: usize,
    pub worker_pool_size: usize,
    pub inference_concurrency: usize,
    pub per_fetch_timeout: Duration,
    pub overall_timeout: Duration,
    pub min_similarity: Option<f64>,
}

impl From<&Config> for RetrievalSettings {
    fn from(config: &Config) -> Self {
        Self {
            max_documents: config.max_documents,
            worker_pool_size: config.worker_pool_size,
            inference_concurrency: config.inference_concurrency,
            per_fetch_timeout: config.per_fetch_timeout,
            overall_timeout: config.overall_timeout,
            min_similarity: config.min_similarity,
        }
    }
}

impl Default for RetrievalSettings {
    fn default() -> Self {
        Self::from(&Config::default())
    }
}

/// Counters for one retrieval run. Used for logs and explanation text only.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RetrievalStats {
    pub queries_issued: usize,
    /// Queries whose whole provider chain failed, or that were still
    /// searching at the deadline.
    pub queries_failed: usize,
    pub search_hits: usize,
    pub unique_urls: usize,
    /// Unique URLs skipped because `max_documents` was reached.
    pub urls_over_limit: usize,
    pub units_succeeded: usize,
    pub units_failed: usize,
    pub units_cancelled: usize,
    pub deadline_exceeded: bool,
}

#[derive(Debug, Clone, Default)]
pub struct RetrievalOutcome {
    /// Completion order; aggregation does not depend on it.
    pub evidence: Vec<Evidence>,
    pub stats: RetrievalStats,
}
