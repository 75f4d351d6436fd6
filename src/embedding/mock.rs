use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};

use parking_lot::RwLock;

use super::error::EmbeddingError;
use super::{TextEmbedder, l2_normalize};
use crate::hashing::hash_to_u64;

/// Test embedder with pinned vectors for chosen texts.
///
/// Texts without a pinned vector get a deterministic pseudo-random unit vector.
pub struct MockEmbedder {
    dimension: usize,
    pinned: RwLock<HashMap<String, Vec<f32>>>,
    fail: bool,
    calls: AtomicUsize,
}

impl MockEmbedder {
    pub fn new(dimension: usize) -> Self {
        Self {
            dimension,
            pinned: RwLock::new(HashMap::new()),
            fail: false,
            calls: AtomicUsize::new(0),
        }
    }

    /// Every call returns [`EmbeddingError::InferenceFailed`].
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::new(4)
        }
    }

    /// Pins `vector` (padded or cut to the dimension) for exactly `text`.
    pub fn with_vector(self, text: &str, vector: Vec<f32>) -> Self {
        self.pin(text, vector);
        self
    }

    pub fn pin(&self, text: &str, mut vector: Vec<f32>) {
        vector.resize(self.dimension, 0.0);
        self.pinned.write().insert(text.to_string(), vector);
    }

    /// Number of texts embedded so far (batch items count individually).
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn pseudo_random(&self, text: &str) -> Vec<f32> {
        let mut state = hash_to_u64(text.as_bytes());
        let mut vector = Vec::with_capacity(self.dimension);
        for _ in 0..self.dimension {
            state = state.wrapping_mul(6364136223846793005).wrapping_add(1);
            vector.push(((state >> 40) as f32 / (1u64 << 24) as f32) * 2.0 - 1.0);
        }
        l2_normalize(&mut vector);
        vector
    }
}

impl TextEmbedder for MockEmbedder {
    fn embed(&self, text: &str) -> Result<Vec<f32>, EmbeddingError> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        if self.fail {
            return Err(EmbeddingError::InferenceFailed {
                reason: "mock embedder failure".to_string(),
            });
        }

        if let Some(vector) = self.pinned.read().get(text) {
            return Ok(vector.clone());
        }

        Ok(self.pseudo_random(text))
    }

    fn dimension(&self) -> usize {
        self.dimension
    }
}
