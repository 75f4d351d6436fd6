//! Stance scoring: does an evidence sentence support or refute the claim?
//!
//! [`NliClassifier`] wraps an NLI cross-encoder (entailment = supports,
//! contradiction = refutes). Without a model it falls back to a lexical
//! heuristic that is good enough for tests and offline demos.

pub mod config;
pub mod error;
#[cfg(any(test, feature = "mock"))]
mod mock;
mod nli;
pub mod types;

#[cfg(test)]
mod tests;

pub use config::{DEFAULT_TEMPERATURE, StanceConfig};
pub use error::StanceError;
#[cfg(any(test, feature = "mock"))]
pub use mock::MockStanceClassifier;
pub use nli::NliClassifier;
pub use types::{StanceDistribution, StanceLabel, StancePrediction};

/// Classifies a (premise, hypothesis) pair.
///
/// Callers pass the evidence sentence as `premise` and the claim as
/// `hypothesis`. Blocking; async callers go through `spawn_blocking`.
pub trait StanceClassifier: Send + Sync {
    fn classify(&self, premise: &str, hypothesis: &str) -> Result<StancePrediction, StanceError>;
}
