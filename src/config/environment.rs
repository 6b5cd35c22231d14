use std::env;

use crate::error::AppError;

use super::builder::ConfigBuilder;
use super::types::{LogLevel, Model};
use super::validation::positive_number;

pub const MODEL_ENV: &str = "SMART_TERM_MODEL";
pub const PROVIDER_ENV: &str = "SMART_TERM_PROVIDER";
pub const TIMEOUT_ENV: &str = "SMART_TERM_TIMEOUT";
pub const MAX_FILE_SIZE_ENV: &str = "SMART_TERM_MAX_FILE_SIZE_MB";
pub const LOG_LEVEL_ENV: &str = "SMART_TERM_LOG_LEVEL";
pub const BASE_URL_ENV: &str = "PERPLEXITY_BASE_URL";

pub fn apply_env_overrides(mut builder: ConfigBuilder) -> Result<ConfigBuilder, AppError> {
    if let Some(raw) = env_string(MODEL_ENV)? {
        let model = raw
            .parse::<Model>()
            .map_err(|err| AppError::configuration(format!("{MODEL_ENV}: {err}")))?;
        builder = builder.with_llm(|llm| llm.model = model);
    }

    if let Some(provider) = env_string(PROVIDER_ENV)? {
        builder = builder.with_llm(|llm| llm.provider = provider);
    }

    if let Some(base_url) = env_string(BASE_URL_ENV)? {
        builder = builder.with_llm(|llm| llm.base_url = base_url);
    }

    if let Some(timeout) = env_positive_f64(TIMEOUT_ENV)? {
        builder = builder.with_llm(|llm| llm.timeout_secs = timeout);
    }

    if let Some(max_size) = env_positive_f64(MAX_FILE_SIZE_ENV)? {
        builder = builder.with_files(|files| files.max_size_mb = max_size);
    }

    if let Some(raw) = env_string(LOG_LEVEL_ENV)? {
        let level = raw
            .parse::<LogLevel>()
            .map_err(|err| AppError::configuration(format!("{LOG_LEVEL_ENV}: {err}")))?;
        builder = builder.with_logging(|logging| logging.level = level);
    }

    Ok(builder)
}

/// Read a variable, treating unset and blank values alike.
pub fn env_string(key: &str) -> Result<Option<String>, AppError> {
    match env::var(key) {
        Ok(val) if val.trim().is_empty() => Ok(None),
        Ok(val) => Ok(Some(val.trim().to_string())),
        Err(env::VarError::NotPresent) => Ok(None),
        Err(env::VarError::NotUnicode(_)) => Err(AppError::configuration(format!(
            "{key} contains invalid UTF-8"
        ))),
    }
}

pub fn env_positive_f64(key: &str) -> Result<Option<f64>, AppError> {
    let Some(value) = env_string(key)? else {
        return Ok(None);
    };

    let parsed = value.parse::<f64>().map_err(|_| {
        AppError::configuration(format!("Failed to parse {key} value '{value}' as a number"))
    })?;

    positive_number(key, parsed)
        .map(Some)
        .map_err(AppError::configuration)
}
