use thiserror::Error;

use crate::config::ConfigError;
use crate::credibility::CredibilityError;
use crate::embedding::EmbeddingError;
use crate::fetch::FetchError;
use crate::search::SearchError;
use crate::stance::StanceError;

/// Caller-input errors: the only way a claim check can fail.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CheckError {
    #[error("claim is too short ({chars} chars, minimum {min})")]
    ClaimTooShort { chars: usize, min: usize },

    #[error("claim is too long ({chars} chars, maximum {max})")]
    ClaimTooLong { chars: usize, max: usize },

    #[error("at least one non-blank query is required")]
    NoQueries,

    #[error("too many queries ({count}, maximum {max})")]
    TooManyQueries { count: usize, max: usize },

    #[error("max_results must be in 1..={max}, got {value}")]
    InvalidMaxResults { value: usize, max: usize },
}

/// Failures while wiring the real adapters at startup.
#[derive(Debug, Error)]
pub enum SetupError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("embedder setup failed: {0}")]
    Embedding(#[from] EmbeddingError),

    #[error("stance classifier setup failed: {0}")]
    Stance(#[from] StanceError),

    #[error("credibility table setup failed: {0}")]
    Credibility(#[from] CredibilityError),

    #[error("search setup failed: {0}")]
    Search(#[from] SearchError),

    #[error("HTTP client setup failed: {0}")]
    Http(#[from] FetchError),
}
