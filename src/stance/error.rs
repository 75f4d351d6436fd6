use std::path::PathBuf;
use thiserror::Error;

use crate::embedding::EmbeddingError;

#[derive(Debug, Error)]
pub enum StanceError {
    #[error("stance model not found at path: {path}")]
    ModelNotFound { path: PathBuf },

    #[error("failed to load stance model: {reason}")]
    ModelLoadFailed { reason: String },

    #[error("stance inference failed: {reason}")]
    InferenceFailed { reason: String },

    #[error("tokenization failed: {reason}")]
    TokenizationFailed { reason: String },

    #[error("invalid stance configuration: {reason}")]
    InvalidConfig { reason: String },

    #[error("model label '{label}' does not map to supports/refutes/neutral")]
    UnknownLabel { label: String },
}

impl From<candle_core::Error> for StanceError {
    fn from(err: candle_core::Error) -> Self {
        StanceError::InferenceFailed {
            reason: err.to_string(),
        }
    }
}

impl From<EmbeddingError> for StanceError {
    fn from(err: EmbeddingError) -> Self {
        match err {
            EmbeddingError::ModelNotFound { path } => StanceError::ModelNotFound { path },
            EmbeddingError::ModelLoadFailed { reason } => StanceError::ModelLoadFailed { reason },
            EmbeddingError::TokenizationFailed { reason } => {
                StanceError::TokenizationFailed { reason }
            }
            EmbeddingError::InvalidConfig { reason } => StanceError::InvalidConfig { reason },
            EmbeddingError::InferenceFailed { reason } => StanceError::InferenceFailed { reason },
        }
    }
}
