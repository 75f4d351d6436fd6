//! Source credibility weights.
//!
//! A static, tiered `domain -> weight` table. Known high-trust outlets weigh
//! more than the default, known social platforms less; anything unrecognised
//! gets [`DEFAULT_SOURCE_WEIGHT`]. Unknown sources are never penalised nor
//! rewarded, so missing reputation data can't silently exclude evidence.
//!
//! The table is built once at startup and shared read-only behind an `Arc`.

pub mod error;

#[cfg(test)]
mod tests;

pub use error::CredibilityError;

use std::collections::HashMap;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::info;
use url::Url;

use crate::constants::DEFAULT_SOURCE_WEIGHT;

/// Coarse credibility bucket, used for explanation counts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceTier {
    High,
    Default,
    Low,
}

impl SourceTier {
    /// Classifies a weight relative to the default.
    pub fn from_weight(weight: f64) -> Self {
        if weight > DEFAULT_SOURCE_WEIGHT {
            SourceTier::High
        } else if weight < DEFAULT_SOURCE_WEIGHT {
            SourceTier::Low
        } else {
            SourceTier::Default
        }
    }
}

const BUILTIN_DOMAINS: &[(&str, f64)] = &[
    // wire services
    ("reuters.com", 1.5),
    ("apnews.com", 1.5),
    ("afp.com", 1.5),
    // fact checkers
    ("snopes.com", 1.5),
    ("factcheck.org", 1.5),
    ("politifact.com", 1.5),
    ("fullfact.org", 1.5),
    // major newspapers and broadcasters
    ("bbc.com", 1.4),
    ("bbc.co.uk", 1.4),
    ("nytimes.com", 1.4),
    ("washingtonpost.com", 1.4),
    ("theguardian.com", 1.4),
    ("economist.com", 1.4),
    ("thehindu.com", 1.3),
    ("indianexpress.com", 1.3),
    ("hindustantimes.com", 1.3),
    ("ndtv.com", 1.2),
    ("timesofindia.com", 1.2),
    // social platforms
    ("twitter.com", 0.5),
    ("x.com", 0.5),
    ("facebook.com", 0.4),
    ("instagram.com", 0.4),
    ("reddit.com", 0.6),
    ("youtube.com", 0.5),
    ("tiktok.com", 0.3),
    ("threads.net", 0.4),
];

const BUILTIN_SUFFIXES: &[(&str, f64)] = &[
    ("gov.in", 1.4),
    ("nic.in", 1.4),
    ("gov", 1.4),
    ("edu", 1.3),
];

/// Read-only `domain -> weight` lookup.
#[derive(Debug, Clone)]
pub struct CredibilityTable {
    domains: HashMap<String, f64>,
    /// Longest suffix first.
    suffixes: Vec<(String, f64)>,
    default_weight: f64,
}

impl Default for CredibilityTable {
    fn default() -> Self {
        Self::builtin()
    }
}

impl CredibilityTable {
    /// Table with the built-in tiers.
    pub fn builtin() -> Self {
        let domains = BUILTIN_DOMAINS
            .iter()
            .map(|(domain, weight)| (domain.to_string(), *weight))
            .collect();

        let mut suffixes: Vec<(String, f64)> = BUILTIN_SUFFIXES
            .iter()
            .map(|(suffix, weight)| (suffix.to_string(), *weight))
            .collect();
        suffixes.sort_by(|a, b| b.0.len().cmp(&a.0.len()));

        Self {
            domains,
            suffixes,
            default_weight: DEFAULT_SOURCE_WEIGHT,
        }
    }

    /// Built-in table with overrides from a JSON object of `domain -> weight`.
    pub fn from_json_file(path: &Path) -> Result<Self, CredibilityError> {
        let content = std::fs::read_to_string(path).map_err(|e| CredibilityError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;
        let overrides: HashMap<String, f64> = serde_json::from_str(&content)?;

        let mut table = Self::builtin();
        table.merge(overrides)?;

        info!(
            path = %path.display(),
            domains = table.len(),
            "Loaded credibility overrides"
        );

        Ok(table)
    }

    /// Merges overrides; every weight must be finite and positive.
    pub fn merge(&mut self, overrides: HashMap<String, f64>) -> Result<(), CredibilityError> {
        for (domain, weight) in overrides {
            if !weight.is_finite() || weight <= 0.0 {
                return Err(CredibilityError::InvalidWeight { domain, weight });
            }
            let domain = normalize_domain(&domain);
            if domain.is_empty() {
                return Err(CredibilityError::InvalidDomain { domain });
            }
            self.domains.insert(domain, weight);
        }
        Ok(())
    }

    /// Weight for a bare domain (`www.` and case are ignored).
    ///
    /// Lookup order: exact domain, parent domains, suffix rules, default.
    pub fn weight_for(&self, domain: &str) -> f64 {
        let domain = normalize_domain(domain);
        if domain.is_empty() {
            return self.default_weight;
        }

        let mut candidate = domain.as_str();
        loop {
            if let Some(weight) = self.domains.get(candidate) {
                return *weight;
            }
            match candidate.split_once('.') {
                Some((_, parent)) if parent.contains('.') => candidate = parent,
                _ => break,
            }
        }

        for (suffix, weight) in &self.suffixes {
            if domain.len() > suffix.len()
                && domain.ends_with(suffix.as_str())
                && domain.as_bytes()[domain.len() - suffix.len() - 1] == b'.'
            {
                return *weight;
            }
        }

        self.default_weight
    }

    /// Weight for the host of `url`; unparsable URLs get the default.
    pub fn weight_for_url(&self, url: &str) -> f64 {
        self.weight_for(&extract_domain(url))
    }

    pub fn tier_of(&self, domain: &str) -> SourceTier {
        SourceTier::from_weight(self.weight_for(domain))
    }

    pub fn default_weight(&self) -> f64 {
        self.default_weight
    }

    pub fn len(&self) -> usize {
        self.domains.len()
    }

    pub fn is_empty(&self) -> bool {
        self.domains.is_empty()
    }
}

/// Lower-cased host of `url` without a leading `www.`; empty if unparsable.
pub fn extract_domain(url: &str) -> String {
    Url::parse(url)
        .ok()
        .and_then(|u| u.host_str().map(normalize_domain))
        .unwrap_or_default()
}

fn normalize_domain(domain: &str) -> String {
    let domain = domain.trim().trim_end_matches('.').to_ascii_lowercase();
    match domain.strip_prefix("www.") {
        Some(stripped) => stripped.to_string(),
        None => domain,
    }
}
