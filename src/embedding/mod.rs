//! Embedding + model utilities.
//!
//! - [`sentence`] provides the sentence embedder used for relevance scoring.
//! - [`bert`] holds the candle BERT encoder and the sequence classifier used
//!   by [`crate::stance`].

/// BERT encoder and sequence-pair classifier.
pub mod bert;
mod cache;
/// Device selection (CPU / Metal / CUDA).
pub mod device;
mod error;
#[cfg(any(test, feature = "mock"))]
mod mock;
/// Sentence embedder (mean-pooled BERT, or hashed bag-of-words stub).
pub mod sentence;
/// Tokenizer/model loading helpers.
pub mod utils;

pub use cache::ClaimEmbeddingCache;
pub use error::EmbeddingError;
#[cfg(any(test, feature = "mock"))]
pub use mock::MockEmbedder;
pub use sentence::{EmbedderConfig, SentenceEmbedder};

/// Maps text to a fixed-length vector.
///
/// Implementations must be deterministic for identical input. Calls are
/// blocking (model inference); async callers go through `spawn_blocking`.
pub trait TextEmbedder: Send + Sync {
    fn embed(&self, text: &str) -> Result<Vec<f32>, EmbeddingError>;

    fn embed_batch(&self, texts: &[&str]) -> Result<Vec<Vec<f32>>, EmbeddingError> {
        texts.iter().map(|text| self.embed(text)).collect()
    }

    fn dimension(&self) -> usize;
}

/// Scales `vector` to unit length in place (zero vectors are left as is).
pub fn l2_normalize(vector: &mut [f32]) {
    let norm: f32 = vector.iter().map(|x| x * x).sum::<f32>().sqrt();
    if norm > 0.0 {
        for x in vector.iter_mut() {
            *x /= norm;
        }
    }
}
