//! Environment-backed configuration.
//!
//! Most settings have defaults. Override with `VERIFACT_*` environment variables
//! (search provider keys keep their vendor names: `TAVILY_API_KEY`, `BRAVE_API_KEY`).

pub mod error;

#[cfg(test)]
mod tests;

pub use error::ConfigError;

use std::env;
use std::path::PathBuf;
use std::time::Duration;

use crate::constants::{
    DEFAULT_FETCH_TIMEOUT, DEFAULT_INFERENCE_CONCURRENCY, DEFAULT_MAX_DOCUMENTS,
    DEFAULT_MAX_QUERIES, DEFAULT_MAX_RESULTS_PER_QUERY, DEFAULT_OVERALL_TIMEOUT,
    DEFAULT_USER_AGENT, DEFAULT_WORKER_POOL_SIZE, MAX_RESULTS_PER_QUERY_LIMIT,
};
use crate::stance::DEFAULT_TEMPERATURE;

/// Engine configuration loaded from environment variables.
///
/// Use [`Config::from_env`] to read overrides on top of defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// Upper bound on the query set for one claim. Default: `10`.
    pub max_queries: usize,

    /// Search hits requested per query. Default: `3`.
    pub max_results_per_query: usize,

    /// Unique URLs processed per claim. Default: `30`.
    pub max_documents: usize,

    /// Concurrent I/O units (search + fetch pipelines). Default: `5`.
    pub worker_pool_size: usize,

    /// Concurrent model inference calls. Default: `2`.
    pub inference_concurrency: usize,

    /// Timeout for a single search or document fetch. Default: 8s.
    pub per_fetch_timeout: Duration,

    /// Deadline for a whole claim check. Default: 45s.
    pub overall_timeout: Duration,

    /// Optional hard relevance floor; unset keeps filtering soft.
    pub min_similarity: Option<f64>,

    /// Sentence embedding model directory (config.json, model.safetensors, tokenizer.json).
    pub embedder_path: Option<PathBuf>,

    /// NLI classifier model directory.
    pub stance_model_path: Option<PathBuf>,

    /// Stance confidence calibration `p^(1/T)`. Default: `1.0` (identity).
    pub stance_temperature: f64,

    /// JSON file with `{"domain": weight}` credibility overrides.
    pub credibility_path: Option<PathBuf>,

    /// User agent for document fetches and keyless search.
    pub user_agent: String,

    pub tavily_api_key: Option<String>,

    pub brave_api_key: Option<String>,

    /// Whether DuckDuckGo closes the search fallback chain. Default: `true`.
    pub duckduckgo_enabled: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            max_queries: DEFAULT_MAX_QUERIES,
            max_results_per_query: DEFAULT_MAX_RESULTS_PER_QUERY,
            max_documents: DEFAULT_MAX_DOCUMENTS,
            worker_pool_size: DEFAULT_WORKER_POOL_SIZE,
            inference_concurrency: DEFAULT_INFERENCE_CONCURRENCY,
            per_fetch_timeout: DEFAULT_FETCH_TIMEOUT,
            overall_timeout: DEFAULT_OVERALL_TIMEOUT,
            min_similarity: None,
            embedder_path: None,
            stance_model_path: None,
            stance_temperature: DEFAULT_TEMPERATURE,
            credibility_path: None,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            tavily_api_key: None,
            brave_api_key: None,
            duckduckgo_enabled: true,
        }
    }
}

impl Config {
    const ENV_MAX_QUERIES: &'static str = "VERIFACT_MAX_QUERIES";
    const ENV_MAX_RESULTS: &'static str = "VERIFACT_MAX_RESULTS";
    const ENV_MAX_DOCUMENTS: &'static str = "VERIFACT_MAX_DOCUMENTS";
    const ENV_WORKER_POOL: &'static str = "VERIFACT_WORKER_POOL";
    const ENV_INFERENCE_CONCURRENCY: &'static str = "VERIFACT_INFERENCE_CONCURRENCY";
    const ENV_FETCH_TIMEOUT_MS: &'static str = "VERIFACT_FETCH_TIMEOUT_MS";
    const ENV_OVERALL_TIMEOUT_MS: &'static str = "VERIFACT_OVERALL_TIMEOUT_MS";
    const ENV_MIN_SIMILARITY: &'static str = "VERIFACT_MIN_SIMILARITY";
    const ENV_EMBEDDER_PATH: &'static str = "VERIFACT_EMBEDDER_PATH";
    const ENV_STANCE_MODEL_PATH: &'static str = "VERIFACT_STANCE_MODEL_PATH";
    const ENV_STANCE_TEMPERATURE: &'static str = "VERIFACT_STANCE_TEMPERATURE";
    const ENV_CREDIBILITY_PATH: &'static str = "VERIFACT_CREDIBILITY_PATH";
    const ENV_USER_AGENT: &'static str = "VERIFACT_USER_AGENT";
    const ENV_TAVILY_API_KEY: &'static str = "TAVILY_API_KEY";
    const ENV_BRAVE_API_KEY: &'static str = "BRAVE_API_KEY";
    const ENV_DUCKDUCKGO: &'static str = "VERIFACT_DUCKDUCKGO";

    /// Loads configuration from environment variables (falling back to defaults).
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let max_queries = Self::parse_usize_from_env(Self::ENV_MAX_QUERIES, defaults.max_queries)?;
        let max_results_per_query =
            Self::parse_usize_from_env(Self::ENV_MAX_RESULTS, defaults.max_results_per_query)?;
        let max_documents =
            Self::parse_usize_from_env(Self::ENV_MAX_DOCUMENTS, defaults.max_documents)?;
        let worker_pool_size =
            Self::parse_usize_from_env(Self::ENV_WORKER_POOL, defaults.worker_pool_size)?;
        let inference_concurrency = Self::parse_usize_from_env(
            Self::ENV_INFERENCE_CONCURRENCY,
            defaults.inference_concurrency,
        )?;
        let per_fetch_timeout =
            Self::parse_millis_from_env(Self::ENV_FETCH_TIMEOUT_MS, defaults.per_fetch_timeout)?;
        let overall_timeout =
            Self::parse_millis_from_env(Self::ENV_OVERALL_TIMEOUT_MS, defaults.overall_timeout)?;
        let min_similarity = Self::parse_optional_f64_from_env(Self::ENV_MIN_SIMILARITY)?;
        let embedder_path = Self::parse_optional_path_from_env(Self::ENV_EMBEDDER_PATH);
        let stance_model_path = Self::parse_optional_path_from_env(Self::ENV_STANCE_MODEL_PATH);
        let stance_temperature = Self::parse_optional_f64_from_env(Self::ENV_STANCE_TEMPERATURE)?
            .unwrap_or(defaults.stance_temperature);
        let credibility_path = Self::parse_optional_path_from_env(Self::ENV_CREDIBILITY_PATH);
        let user_agent = Self::parse_string_from_env(Self::ENV_USER_AGENT, defaults.user_agent);
        let tavily_api_key = Self::parse_optional_string_from_env(Self::ENV_TAVILY_API_KEY);
        let brave_api_key = Self::parse_optional_string_from_env(Self::ENV_BRAVE_API_KEY);
        let duckduckgo_enabled =
            Self::parse_bool_from_env(Self::ENV_DUCKDUCKGO, defaults.duckduckgo_enabled)?;

        Ok(Self {
            max_queries,
            max_results_per_query,
            max_documents,
            worker_pool_size,
            inference_concurrency,
            per_fetch_timeout,
            overall_timeout,
            min_similarity,
            embedder_path,
            stance_model_path,
            stance_temperature,
            credibility_path,
            user_agent,
            tavily_api_key,
            brave_api_key,
            duckduckgo_enabled,
        })
    }

    /// Validates numeric invariants and configured paths (does not load anything).
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (name, value) in [
            ("max_queries", self.max_queries),
            ("max_documents", self.max_documents),
            ("worker_pool_size", self.worker_pool_size),
            ("inference_concurrency", self.inference_concurrency),
        ] {
            if value == 0 {
                return Err(ConfigError::ZeroValue { name });
            }
        }

        if !(1..=MAX_RESULTS_PER_QUERY_LIMIT).contains(&self.max_results_per_query) {
            return Err(ConfigError::OutOfRange {
                name: "max_results_per_query",
                value: self.max_results_per_query.to_string(),
                expected: "1..=10",
            });
        }

        if self.per_fetch_timeout.is_zero() {
            return Err(ConfigError::ZeroValue {
                name: "per_fetch_timeout",
            });
        }

        if self.per_fetch_timeout > self.overall_timeout {
            return Err(ConfigError::TimeoutOrder {
                per_fetch: self.per_fetch_timeout,
                overall: self.overall_timeout,
            });
        }

        if let Some(floor) = self.min_similarity
            && !(0.0..=1.0).contains(&floor)
        {
            return Err(ConfigError::OutOfRange {
                name: "min_similarity",
                value: floor.to_string(),
                expected: "0.0..=1.0",
            });
        }

        if !self.stance_temperature.is_finite() || self.stance_temperature <= 0.0 {
            return Err(ConfigError::OutOfRange {
                name: "stance_temperature",
                value: self.stance_temperature.to_string(),
                expected: "finite and > 0",
            });
        }

        for path in [&self.embedder_path, &self.stance_model_path]
            .into_iter()
            .flatten()
        {
            if !path.exists() {
                return Err(ConfigError::PathNotFound { path: path.clone() });
            }
            if !path.is_dir() {
                return Err(ConfigError::NotADirectory { path: path.clone() });
            }
        }

        if let Some(ref path) = self.credibility_path {
            if !path.exists() {
                return Err(ConfigError::PathNotFound { path: path.clone() });
            }
            if !path.is_file() {
                return Err(ConfigError::NotAFile { path: path.clone() });
            }
        }

        Ok(())
    }

    /// Returns `true` if at least one search provider can be built.
    pub fn has_search_provider(&self) -> bool {
        self.tavily_api_key.is_some() || self.brave_api_key.is_some() || self.duckduckgo_enabled
    }

    fn parse_usize_from_env(var_name: &'static str, default: usize) -> Result<usize, ConfigError> {
        match env::var(var_name) {
            Ok(value) => value
                .trim()
                .parse()
                .map_err(|e| ConfigError::IntParseError {
                    name: var_name,
                    value: value.clone(),
                    source: e,
                }),
            Err(_) => Ok(default),
        }
    }

    fn parse_millis_from_env(
        var_name: &'static str,
        default: Duration,
    ) -> Result<Duration, ConfigError> {
        match env::var(var_name) {
            Ok(value) => {
                let millis: u64 =
                    value
                        .trim()
                        .parse()
                        .map_err(|e| ConfigError::IntParseError {
                            name: var_name,
                            value: value.clone(),
                            source: e,
                        })?;
                Ok(Duration::from_millis(millis))
            }
            Err(_) => Ok(default),
        }
    }

    fn parse_optional_f64_from_env(var_name: &'static str) -> Result<Option<f64>, ConfigError> {
        match Self::parse_optional_string_from_env(var_name) {
            Some(value) => value
                .parse()
                .map(Some)
                .map_err(|e| ConfigError::FloatParseError {
                    name: var_name,
                    value,
                    source: e,
                }),
            None => Ok(None),
        }
    }

    fn parse_bool_from_env(var_name: &'static str, default: bool) -> Result<bool, ConfigError> {
        match env::var(var_name) {
            Ok(value) => match value.trim().to_ascii_lowercase().as_str() {
                "1" | "true" | "yes" | "on" => Ok(true),
                "0" | "false" | "no" | "off" => Ok(false),
                _ => Err(ConfigError::InvalidBool {
                    name: var_name,
                    value,
                }),
            },
            Err(_) => Ok(default),
        }
    }

    fn parse_optional_path_from_env(var_name: &str) -> Option<PathBuf> {
        Self::parse_optional_string_from_env(var_name).map(PathBuf::from)
    }

    fn parse_optional_string_from_env(var_name: &str) -> Option<String> {
        env::var(var_name)
            .ok()
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
    }

    fn parse_string_from_env(var_name: &str, default: String) -> String {
        env::var(var_name).unwrap_or(default)
    }
}
