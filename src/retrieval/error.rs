use std::time::Duration;

use thiserror::Error;

use crate::embedding::EmbeddingError;
use crate::fetch::FetchError;
use crate::stance::StanceError;

/// Why one URL contributed no evidence. Logged and absorbed, never returned
/// from a claim check.
#[derive(Debug, Error)]
pub enum UnitError {
    #[error("fetch failed: {0}")]
    Fetch(#[from] FetchError),

    #[error("fetch timed out after {timeout:?}")]
    FetchTimeout { timeout: Duration },

    #[error("document too short ({chars} chars, need {min})")]
    TooShort { chars: usize, min: usize },

    #[error("no usable sentences after segmentation")]
    NoSentences,

    #[error("best similarity {similarity:.3} below floor {floor:.3}")]
    BelowSimilarityFloor { similarity: f64, floor: f64 },

    #[error("embedding failed: {0}")]
    Embedding(#[from] EmbeddingError),

    #[error("stance classification failed: {0}")]
    Stance(#[from] StanceError),

    #[error("worker task failed: {reason}")]
    TaskFailed { reason: String },
}

impl From<tokio::task::JoinError> for UnitError {
    fn from(e: tokio::task::JoinError) -> Self {
        UnitError::TaskFailed {
            reason: e.to_string(),
        }
    }
}

impl From<tokio::sync::AcquireError> for UnitError {
    fn from(e: tokio::sync::AcquireError) -> Self {
        UnitError::TaskFailed {
            reason: e.to_string(),
        }
    }
}
