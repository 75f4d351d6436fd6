//! Concurrent evidence retrieval.
//!
//! One unit of work is one unique URL: fetch, clean, segment, pick the best
//! sentence, classify its stance. Units run on a bounded worker pool; model
//! calls additionally share a smaller inference pool on the blocking thread
//! pool. Failed units are logged and dropped, and an overall deadline cancels
//! whatever is still outstanding.

mod coordinator;
mod error;
mod types;


pub use coordinator::RetrievalCoordinator;
pub use error::UnitError;
pub use types::{EngineHandles, RetrievalOutcome, RetrievalSettings, RetrievalStats};

use url::Url;

/// Key under which URLs are deduplicated: the parsed URL without fragment or
/// trailing `/`. `None` for anything that is not http(s).
pub fn dedup_key(url: &str) -> Option<String> {
    let mut parsed = Url::parse(url.trim()).ok()?;
    if !matches!(parsed.scheme(), "http" | "https") {
        return None;
    }
    parsed.set_fragment(None);
    Some(parsed.as_str().trim_end_matches('/').to_string())
}
