//! BLAKE3 helpers for cache keys and feature hashing.

use blake3::Hasher;

/// Full 256-bit key for a claim string, used by the claim embedding cache.
#[inline]
pub fn hash_claim(claim: &str) -> [u8; 32] {
    *blake3::hash(claim.as_bytes()).as_bytes()
}

/// Computes a 64-bit hash of the input data using BLAKE3, truncated from 256 bits.
///
/// Only used for bucketing (stub embeddings) and log fingerprints, where a rare
/// collision costs a little accuracy and never correctness.
#[inline]
pub fn hash_to_u64(data: &[u8]) -> u64 {
    let hash = blake3::hash(data);
    let bytes: [u8; 8] = hash.as_bytes()[0..8]
        .try_into()
        .expect("BLAKE3 always produces at least 8 bytes");
    u64::from_le_bytes(bytes)
}

/// Stable fingerprint for a deduplicated URL key.
#[inline]
pub fn url_fingerprint(key: &str) -> u64 {
    let mut hasher = Hasher::new();
    hasher.update(b"url|");
    hasher.update(key.as_bytes());

    let hash = hasher.finalize();
    let bytes: [u8; 8] = hash.as_bytes()[0..8]
        .try_into()
        .expect("BLAKE3 always produces at least 8 bytes");
    u64::from_le_bytes(bytes)
}
