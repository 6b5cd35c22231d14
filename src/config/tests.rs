use std::path::Path;
use tempfile::TempDir;

use crate::config::environment::{
    BASE_URL_ENV, LOG_LEVEL_ENV, MAX_FILE_SIZE_ENV, MODEL_ENV, PROVIDER_ENV, TIMEOUT_ENV,
    env_positive_f64, env_string,
};
use crate::config::{Config, LogLevel, Model, OutputFormat};
use crate::error::AppError;
use crate::test_support::{EnvGuard, env_lock};

const OVERRIDES: [&str; 6] = [
    MODEL_ENV,
    PROVIDER_ENV,
    TIMEOUT_ENV,
    MAX_FILE_SIZE_ENV,
    LOG_LEVEL_ENV,
    BASE_URL_ENV,
];

fn clear_overrides() -> EnvGuard {
    let vars: Vec<(&str, Option<&str>)> = OVERRIDES.iter().map(|key| (*key, None)).collect();
    EnvGuard::new(&vars)
}

fn write_config(dir: &TempDir, body: &str) -> std::path::PathBuf {
    let path = dir.path().join(".ai_cli_config.json");
    std::fs::write(&path, body).unwrap();
    path
}

fn defaults() -> Config {
    Config::builder().build()
}

#[test]
fn missing_file_yields_defaults() {
    let _lock = env_lock();
    let _env = clear_overrides();
    let dir = TempDir::new().unwrap();

    let (config, discarded) = Config::load_from(&dir.path().join("absent.json")).unwrap();
    assert_eq!(config, defaults());
    assert_eq!(discarded, None);
    assert_eq!(config.llm.model, Model::Sonar);
    assert_eq!(config.llm.provider, "perplexity");
    assert_eq!(config.llm.timeout_secs, 30.0);
    assert_eq!(config.files.max_size_mb, 10.0);
    assert_eq!(config.output.format, OutputFormat::Markdown);
    assert!(config.output.show_thinking_animation);
    assert_eq!(config.logging.level, LogLevel::Info);
}

#[test]
fn valid_file_merges_with_defaults_and_ignores_unknown_keys() {
    let _lock = env_lock();
    let _env = clear_overrides();
    let dir = TempDir::new().unwrap();
    let path = write_config(
        &dir,
        r#"{
            "default_model": "sonar-pro",
            "timeout": 12.5,
            "output_format": "plain",
            "show_thinking_animation": false,
            "theme": "solarized"
        }"#,
    );

    let (config, _) = Config::load_from(&path).unwrap();
    assert_eq!(config.llm.model, Model::SonarPro);
    assert_eq!(config.llm.timeout_secs, 12.5);
    assert_eq!(config.output.format, OutputFormat::Plain);
    assert!(!config.output.show_thinking_animation);
    assert_eq!(config.files.max_size_mb, 10.0);
    assert_eq!(config.logging.level, LogLevel::Info);
}

#[test]
fn invalid_log_level_discards_entire_file() {
    let _lock = env_lock();
    let _env = clear_overrides();
    let dir = TempDir::new().unwrap();
    let path = write_config(
        &dir,
        r#"{"timeout": 60, "max_file_size_mb": 25, "log_level": "VERBOSE"}"#,
    );

    let (config, discarded) = Config::load_from(&path).unwrap();
    assert_eq!(config, defaults());
    let reason = discarded.expect("discarded file should report why");
    assert!(reason.contains("log_level"), "{reason}");
    assert!(reason.contains(path.to_str().unwrap()), "{reason}");
}

#[test]
fn invalid_values_for_each_recognized_key_fall_back_to_defaults() {
    let _lock = env_lock();
    let _env = clear_overrides();
    let dir = TempDir::new().unwrap();

    let bodies = [
        r#"{"timeout": 0}"#,
        r#"{"timeout": "30"}"#,
        r#"{"max_file_size_mb": -1}"#,
        r#"{"show_thinking_animation": "yes"}"#,
        r#"{"output_format": "html"}"#,
        r#"{"default_model": "gpt-4"}"#,
        r#"{"default_provider": ""}"#,
        r#"["not", "an", "object"]"#,
        r#"{"timeout": 45,"#,
    ];

    for body in bodies {
        let path = write_config(&dir, body);
        let (config, discarded) = Config::load_from(&path).unwrap();
        assert_eq!(config, defaults(), "expected defaults for {body}");
        assert!(discarded.is_some(), "expected a discard reason for {body}");
    }
}

#[test]
fn empty_file_is_treated_as_missing() {
    let _lock = env_lock();
    let _env = clear_overrides();
    let dir = TempDir::new().unwrap();
    let path = write_config(&dir, "   \n");

    assert_eq!(Config::load_from(&path).unwrap(), (defaults(), None));
}

#[test]
fn env_overrides_take_precedence_over_file() {
    let _lock = env_lock();
    let _clear = clear_overrides();
    let dir = TempDir::new().unwrap();
    let path = write_config(&dir, r#"{"timeout": 20, "default_model": "sonar-pro"}"#);

    let _env = EnvGuard::new(&[
        (TIMEOUT_ENV, Some("45")),
        (MODEL_ENV, Some("sonar-deep-research")),
        (BASE_URL_ENV, Some("http://localhost:9999")),
        (LOG_LEVEL_ENV, Some("DEBUG")),
    ]);

    let (config, _) = Config::load_from(&path).unwrap();
    assert_eq!(config.llm.timeout_secs, 45.0);
    assert_eq!(config.llm.model, Model::SonarDeepResearch);
    assert_eq!(config.llm.base_url, "http://localhost:9999");
    assert_eq!(config.logging.level, LogLevel::Debug);
}

#[test]
fn invalid_env_override_is_a_configuration_error() {
    let _lock = env_lock();
    let _clear = clear_overrides();
    let _env = EnvGuard::new(&[(TIMEOUT_ENV, Some("soon"))]);

    let err = Config::load_from(Path::new("/definitely/not/here.json")).unwrap_err();
    assert!(matches!(err, AppError::Configuration(_)));
    assert_eq!(err.exit_code(), 6);
    assert!(err.to_string().contains(TIMEOUT_ENV));
}

#[test]
fn config_path_lives_in_home() {
    let _lock = env_lock();
    let home = TempDir::new().unwrap();
    let _env = EnvGuard::new(&[("HOME", Some(home.path().to_str().unwrap()))]);

    let path = Config::config_path().unwrap();
    assert_eq!(path, home.path().join(".ai_cli_config.json"));
}

#[test]
fn test_env_string() {
    let _lock = env_lock();
    let _env = EnvGuard::new(&[("SMART_TERM_TEST_VAR", Some(" value ")), ("SMART_TERM_BLANK", Some("  "))]);

    assert_eq!(env_string("SMART_TERM_TEST_VAR").unwrap(), Some("value".to_string()));
    assert_eq!(env_string("SMART_TERM_BLANK").unwrap(), None);
    assert_eq!(env_string("SMART_TERM_NONEXISTENT_VAR").unwrap(), None);
}

#[test]
fn test_env_positive_f64() {
    let _lock = env_lock();
    let _env = EnvGuard::new(&[
        ("SMART_TERM_TEST_NUM", Some("2.5")),
        ("SMART_TERM_TEST_NEG", Some("-3")),
    ]);

    assert_eq!(env_positive_f64("SMART_TERM_TEST_NUM").unwrap(), Some(2.5));
    assert!(env_positive_f64("SMART_TERM_TEST_NEG").is_err());
    assert_eq!(env_positive_f64("SMART_TERM_NONEXISTENT_VAR").unwrap(), None);
}
