//! Cross-cutting, shared constants.
//!
//! Defaults for configuration live here so that the config layer, the
//! coordinator and the tests agree on the same numbers.

use std::time::Duration;

/// Net score above which a claim is reported as likely true (exclusive).
pub const TRUE_THRESHOLD: f64 = 0.4;

/// Net score below which a claim is reported as likely false (exclusive).
pub const FALSE_THRESHOLD: f64 = -0.4;

/// Credibility weight for domains absent from the table.
pub const DEFAULT_SOURCE_WEIGHT: f64 = 1.0;

pub const DEFAULT_MAX_QUERIES: usize = 10;
pub const DEFAULT_MAX_RESULTS_PER_QUERY: usize = 3;
pub const MAX_RESULTS_PER_QUERY_LIMIT: usize = 10;
pub const DEFAULT_MAX_DOCUMENTS: usize = 30;

pub const DEFAULT_WORKER_POOL_SIZE: usize = 5;
pub const DEFAULT_INFERENCE_CONCURRENCY: usize = 2;

pub const DEFAULT_FETCH_TIMEOUT: Duration = Duration::from_secs(8);
pub const DEFAULT_OVERALL_TIMEOUT: Duration = Duration::from_secs(45);

pub const MIN_CLAIM_CHARS: usize = 10;
pub const MAX_CLAIM_CHARS: usize = 1000;

/// Cleaned documents shorter than this are not worth segmenting.
pub const MIN_DOCUMENT_CHARS: usize = 50;

pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (compatible; VeriFact/2.0; +https://verifact.ai)";

/// Number of claim embeddings kept across requests.
pub const CLAIM_CACHE_CAPACITY: u64 = 32;

/// Cleaned text beyond this many characters is not segmented.
pub const MAX_DOCUMENT_CHARS: usize = 10_000;

/// Sentences must be strictly longer than this to be kept.
pub const MIN_SENTENCE_CHARS: usize = 20;

pub const MAX_SENTENCES_PER_DOCUMENT: usize = 50;

/// Output size of the stub embedder (matches MiniLM-L6).
pub const DEFAULT_EMBEDDING_DIM: usize = 384;

/// Token limit for sentence embedding inputs.
pub const DEFAULT_EMBEDDER_MAX_SEQ_LEN: usize = 256;

/// Token limit for premise/hypothesis pairs.
pub const DEFAULT_STANCE_MAX_SEQ_LEN: usize = 512;

/// Response bodies are cut off beyond this many bytes.
pub const MAX_BODY_BYTES: usize = 2 * 1024 * 1024;

/// Extra attempts for a document fetch after 429/5xx or a connect error.
pub const FETCH_MAX_RETRIES: u32 = 2;

/// First retry delay; doubled on each further attempt.
pub const FETCH_RETRY_BACKOFF: Duration = Duration::from_millis(500);
