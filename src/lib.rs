//! VeriFact evidence engine (used by the CLI and integration tests).
//!
//! Verifies a natural-language claim against web evidence: queries fan out
//! through a search fallback chain, unique URLs are fetched and cleaned,
//! each document contributes its single most claim-like sentence, an NLI
//! model labels that sentence's stance, and the credibility-weighted signals
//! are fused into a verdict with an audit trail.
//!
//! # Public API Surface
//!
//! ## Entry Point
//! - [`FactChecker`], [`CheckError`], [`ClaimReport`] - Claim checks
//! - [`Config`], [`ConfigError`] - Environment configuration
//!
//! ## Engine
//! - [`RetrievalCoordinator`], [`RetrievalStats`] - Concurrent retrieval
//! - [`aggregate`], [`Verdict`], [`Evidence`] - Deterministic fusion
//! - [`CredibilityTable`] - Source weights
//!
//! ## Collaborators
//! - [`TextEmbedder`], [`SentenceEmbedder`] - Sentence embeddings
//! - [`StanceClassifier`], [`NliClassifier`] - Stance detection
//! - [`SearchProvider`], [`FallbackSearchClient`] - Web search
//! - [`DocumentFetcher`], [`HttpFetcher`] - Document retrieval
//!
//! ## Test/Mock Support
//! Mock implementations are available behind `#[cfg(any(test, feature = "mock"))]`.

pub mod config;
pub mod constants;
pub mod credibility;
pub mod embedding;
pub mod fetch;
pub mod hashing;
pub mod pipeline;
pub mod queries;
pub mod relevance;
pub mod retrieval;
pub mod search;
pub mod stance;
pub mod text;
pub mod verdict;

pub use config::{Config, ConfigError};
pub use credibility::{CredibilityError, CredibilityTable, SourceTier, extract_domain};
#[cfg(any(test, feature = "mock"))]
pub use embedding::MockEmbedder;
pub use embedding::{
    ClaimEmbeddingCache, EmbedderConfig, EmbeddingError, SentenceEmbedder, TextEmbedder,
};
#[cfg(any(test, feature = "mock"))]
pub use fetch::MockFetcher;
pub use fetch::{DocumentFetcher, FetchError, HttpFetcher};
pub use hashing::{hash_claim, hash_to_u64, url_fingerprint};
pub use pipeline::{CheckError, ClaimReport, FactChecker, SetupError};
pub use queries::generate_queries;
pub use relevance::{BestSentence, cosine_similarity, select_best_sentence};
pub use retrieval::{
    EngineHandles, RetrievalCoordinator, RetrievalOutcome, RetrievalSettings, RetrievalStats,
    UnitError,
};
#[cfg(any(test, feature = "mock"))]
pub use search::{MockResponse, MockSearchProvider};
pub use search::{FallbackSearchClient, SearchError, SearchHit, SearchProvider};
#[cfg(any(test, feature = "mock"))]
pub use stance::MockStanceClassifier;
pub use stance::{
    NliClassifier, StanceClassifier, StanceConfig, StanceError, StanceLabel, StancePrediction,
};
pub use verdict::{Evidence, Verdict, VerdictLabel, aggregate};
