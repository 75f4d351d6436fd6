//! Cross-request cache for claim vectors.
//!
//! The same claim is often checked repeatedly (retries, popular rumours), and
//! its embedding is the one vector needed by every retrieval unit.

use std::sync::Arc;

use moka::sync::Cache;
use tracing::debug;

use super::TextEmbedder;
use super::error::EmbeddingError;
use crate::constants::CLAIM_CACHE_CAPACITY;
use crate::hashing::hash_claim;

/// Bounded claim-hash -> vector cache (LRU-style eviction).
pub struct ClaimEmbeddingCache {
    entries: Cache<[u8; 32], Arc<Vec<f32>>>,
}

impl Default for ClaimEmbeddingCache {
    fn default() -> Self {
        Self::new()
    }
}

impl ClaimEmbeddingCache {
    pub fn new() -> Self {
        Self::with_capacity(CLAIM_CACHE_CAPACITY)
    }

    pub fn with_capacity(capacity: u64) -> Self {
        Self {
            entries: Cache::builder().max_capacity(capacity).build(),
        }
    }

    /// Returns the cached vector for `claim`, embedding it on a miss.
    ///
    /// Failures are not cached.
    pub fn get_or_embed(
        &self,
        claim: &str,
        embedder: &dyn TextEmbedder,
    ) -> Result<Arc<Vec<f32>>, EmbeddingError> {
        let key = hash_claim(claim);

        if let Some(vector) = self.entries.get(&key) {
            debug!("Claim embedding cache hit");
            return Ok(vector);
        }

        let vector = Arc::new(embedder.embed(claim)?);
        self.entries.insert(key, Arc::clone(&vector));
        Ok(vector)
    }

    pub fn contains(&self, claim: &str) -> bool {
        self.entries.contains_key(&hash_claim(claim))
    }

    pub fn clear(&self) {
        self.entries.invalidate_all();
    }
}
