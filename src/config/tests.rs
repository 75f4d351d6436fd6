use super::*;
use serial_test::serial;
use std::env;
use std::path::PathBuf;
use std::time::Duration;

fn with_env_vars<F, R>(vars: &[(&str, &str)], f: F) -> R
where
    F: FnOnce() -> R,
{
    // SAFETY: Test code only, we accept the thread-safety risk in tests.
    for (key, value) in vars {
        unsafe { env::set_var(key, value) };
    }

    let result = f();

    // SAFETY: Test code only, we accept the thread-safety risk in tests.
    for (key, _) in vars {
        unsafe { env::remove_var(key) };
    }

    result
}

fn clear_verifact_env() {
    // SAFETY: Test code only, we accept the thread-safety risk in tests.
    unsafe {
        env::remove_var("VERIFACT_MAX_QUERIES");
        env::remove_var("VERIFACT_MAX_RESULTS");
        env::remove_var("VERIFACT_MAX_DOCUMENTS");
        env::remove_var("VERIFACT_WORKER_POOL");
        env::remove_var("VERIFACT_INFERENCE_CONCURRENCY");
        env::remove_var("VERIFACT_FETCH_TIMEOUT_MS");
        env::remove_var("VERIFACT_OVERALL_TIMEOUT_MS");
        env::remove_var("VERIFACT_MIN_SIMILARITY");
        env::remove_var("VERIFACT_EMBEDDER_PATH");
        env::remove_var("VERIFACT_STANCE_MODEL_PATH");
        env::remove_var("VERIFACT_STANCE_TEMPERATURE");
        env::remove_var("VERIFACT_CREDIBILITY_PATH");
        env::remove_var("VERIFACT_USER_AGENT");
        env::remove_var("TAVILY_API_KEY");
        env::remove_var("BRAVE_API_KEY");
        env::remove_var("VERIFACT_DUCKDUCKGO");
    }
}

#[test]
fn test_default_config() {
    let config = Config::default();

    assert_eq!(config.max_queries, 10);
    assert_eq!(config.max_results_per_query, 3);
    assert_eq!(config.worker_pool_size, 5);
    assert_eq!(config.per_fetch_timeout, Duration::from_secs(8));
    assert!(config.min_similarity.is_none());
    assert!(config.embedder_path.is_none());
    assert_eq!(config.stance_temperature, 1.0);
    assert!(config.duckduckgo_enabled);
    assert!(config.validate().is_ok());
}

#[test]
#[serial]
fn test_from_env_with_defaults() {
    clear_verifact_env();

    let config = Config::from_env().expect("should parse with defaults");

    assert_eq!(config.max_queries, 10);
    assert_eq!(config.overall_timeout, Duration::from_secs(45));
    assert!(config.tavily_api_key.is_none());
    assert!(config.has_search_provider());
}

#[test]
#[serial]
fn test_from_env_overrides() {
    clear_verifact_env();

    let config = with_env_vars(
        &[
            ("VERIFACT_MAX_QUERIES", "6"),
            ("VERIFACT_WORKER_POOL", " 8 "),
            ("VERIFACT_FETCH_TIMEOUT_MS", "2500"),
            ("VERIFACT_MIN_SIMILARITY", "0.3"),
            ("VERIFACT_STANCE_TEMPERATURE", "1.5"),
            ("TAVILY_API_KEY", "tvly-test"),
            ("VERIFACT_DUCKDUCKGO", "off"),
        ],
        || Config::from_env().expect("overrides should parse"),
    );

    assert_eq!(config.max_queries, 6);
    assert_eq!(config.worker_pool_size, 8);
    assert_eq!(config.per_fetch_timeout, Duration::from_millis(2500));
    assert_eq!(config.min_similarity, Some(0.3));
    assert_eq!(config.stance_temperature, 1.5);
    assert_eq!(config.tavily_api_key.as_deref(), Some("tvly-test"));
    assert!(!config.duckduckgo_enabled);
}

#[test]
#[serial]
fn test_blank_key_is_treated_as_unset() {
    clear_verifact_env();

    let config = with_env_vars(&[("BRAVE_API_KEY", "   ")], || {
        Config::from_env().expect("should parse")
    });

    assert!(config.brave_api_key.is_none());
}

#[test]
#[serial]
fn test_from_env_invalid_number() {
    clear_verifact_env();

    let result = with_env_vars(&[("VERIFACT_WORKER_POOL", "many")], Config::from_env);

    assert!(matches!(
        result,
        Err(ConfigError::IntParseError {
            name: "VERIFACT_WORKER_POOL",
            ..
        })
    ));
}

#[test]
#[serial]
fn test_from_env_invalid_bool() {
    clear_verifact_env();

    let result = with_env_vars(&[("VERIFACT_DUCKDUCKGO", "maybe")], Config::from_env);

    assert!(matches!(result, Err(ConfigError::InvalidBool { .. })));
}

#[test]
#[serial]
fn test_from_env_invalid_temperature() {
    clear_verifact_env();

    let result = with_env_vars(&[("VERIFACT_STANCE_TEMPERATURE", "warm")], Config::from_env);

    assert!(matches!(
        result,
        Err(ConfigError::FloatParseError {
            name: "VERIFACT_STANCE_TEMPERATURE",
            ..
        })
    ));
}

#[test]
fn test_validate_temperature() {
    for temperature in [0.0, -1.0, f64::NAN, f64::INFINITY] {
        let config = Config {
            stance_temperature: temperature,
            ..Default::default()
        };

        assert!(
            matches!(
                config.validate(),
                Err(ConfigError::OutOfRange {
                    name: "stance_temperature",
                    ..
                })
            ),
            "{temperature}"
        );
    }
}

#[test]
fn test_validate_zero_pool() {
    let config = Config {
        worker_pool_size: 0,
        ..Default::default()
    };

    assert!(matches!(
        config.validate(),
        Err(ConfigError::ZeroValue {
            name: "worker_pool_size"
        })
    ));
}

#[test]
fn test_validate_max_results_range() {
    let config = Config {
        max_results_per_query: 11,
        ..Default::default()
    };

    assert!(matches!(
        config.validate(),
        Err(ConfigError::OutOfRange { .. })
    ));
}

#[test]
fn test_validate_timeout_order() {
    let config = Config {
        per_fetch_timeout: Duration::from_secs(60),
        overall_timeout: Duration::from_secs(10),
        ..Default::default()
    };

    assert!(matches!(
        config.validate(),
        Err(ConfigError::TimeoutOrder { .. })
    ));
}

#[test]
fn test_validate_similarity_floor() {
    let config = Config {
        min_similarity: Some(1.5),
        ..Default::default()
    };

    assert!(config.validate().is_err());
}

#[test]
fn test_validate_missing_model_dir() {
    let config = Config {
        embedder_path: Some(PathBuf::from("/nonexistent/minilm")),
        ..Default::default()
    };

    assert!(matches!(
        config.validate(),
        Err(ConfigError::PathNotFound { .. })
    ));
}

#[test]
fn test_validate_credibility_path_must_be_file() {
    let dir = tempfile::tempdir().expect("tempdir");
    let config = Config {
        credibility_path: Some(dir.path().to_path_buf()),
        ..Default::default()
    };

    assert!(matches!(
        config.validate(),
        Err(ConfigError::NotAFile { .. })
    ));
}

#[test]
fn test_no_search_provider() {
    let config = Config {
        duckduckgo_enabled: false,
        ..Default::default()
    };

    assert!(!config.has_search_provider());
}
