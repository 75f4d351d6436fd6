use std::path::PathBuf;

use crate::constants::DEFAULT_STANCE_MAX_SEQ_LEN;

/// Identity calibration.
pub const DEFAULT_TEMPERATURE: f64 = 1.0;

#[derive(Debug, Clone)]
pub struct StanceConfig {
    /// NLI model directory; `None` selects the lexical stub.
    pub model_path: Option<PathBuf>,

    /// Token limit for the premise/hypothesis pair.
    pub max_seq_len: usize,

    /// Confidence calibration: winning probability `p` is reported as `p^(1/T)`.
    pub temperature: f64,
}

impl Default for StanceConfig {
    fn default() -> Self {
        Self {
            model_path: None,
            max_seq_len: DEFAULT_STANCE_MAX_SEQ_LEN,
            temperature: DEFAULT_TEMPERATURE,
        }
    }
}

impl StanceConfig {
    pub const ENV_MODEL_PATH: &'static str = "VERIFACT_STANCE_MODEL_PATH";
    pub const ENV_TEMPERATURE: &'static str = "VERIFACT_STANCE_TEMPERATURE";

    pub fn new<P: Into<PathBuf>>(model_path: P) -> Self {
        Self {
            model_path: Some(model_path.into()),
            ..Default::default()
        }
    }

    pub fn stub() -> Self {
        Self::default()
    }

    pub fn from_path(model_path: Option<PathBuf>) -> Self {
        match model_path {
            Some(path) => Self::new(path),
            None => Self::stub(),
        }
    }

    pub fn with_temperature(mut self, temperature: f64) -> Self {
        self.temperature = temperature;
        self
    }

    pub fn validate(&self) -> Result<(), String> {
        if !self.temperature.is_finite() || self.temperature <= 0.0 {
            return Err(format!(
                "temperature must be positive and finite, got {}",
                self.temperature
            ));
        }

        if self.max_seq_len == 0 {
            return Err("max_seq_len must be greater than zero".to_string());
        }

        if let Some(ref path) = self.model_path
            && path.as_os_str().is_empty()
        {
            return Err("model_path cannot be empty when provided".to_string());
        }

        Ok(())
    }

    /// Unparsable temperatures fall back to the default.
    pub fn from_env() -> Self {
        let model_path = std::env::var(Self::ENV_MODEL_PATH)
            .ok()
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .map(PathBuf::from);

        let temperature = std::env::var(Self::ENV_TEMPERATURE)
            .ok()
            .and_then(|v| v.trim().parse().ok())
            .unwrap_or(DEFAULT_TEMPERATURE);

        Self {
            model_path,
            temperature,
            ..Default::default()
        }
    }
}
