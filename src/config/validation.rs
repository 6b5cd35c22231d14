use serde_json::{Map, Value};

use super::types::{FileConfig, LogLevel, Model, OutputFormat};

/// Validate every recognized key of a parsed config document.
///
/// Unknown keys are ignored. The first invalid recognized key rejects the
/// whole document; the returned message names that key.
pub(super) fn validate_file_config(document: &Value) -> Result<FileConfig, String> {
    let map = document
        .as_object()
        .ok_or_else(|| "Configuration must be a JSON object".to_string())?;

    Ok(FileConfig {
        default_model: optional(map, "default_model", |value| {
            value
                .as_str()
                .and_then(|name| name.parse::<Model>().ok())
                .ok_or_else(|| {
                    let names: Vec<&str> = Model::ALL.iter().map(|m| m.as_str()).collect();
                    format!(
                        "Invalid default_model '{value}'. Must be one of {}.",
                        names.join(", ")
                    )
                })
        })?,
        default_provider: optional(map, "default_provider", |value| {
            non_empty_string("default_provider", value)
        })?,
        timeout: optional(map, "timeout", |value| {
            value
                .as_f64()
                .ok_or_else(|| not_positive("timeout", value))
                .and_then(|number| positive_number("timeout", number))
        })?,
        max_file_size_mb: optional(map, "max_file_size_mb", |value| {
            value
                .as_f64()
                .ok_or_else(|| not_positive("max_file_size_mb", value))
                .and_then(|number| positive_number("max_file_size_mb", number))
        })?,
        output_format: optional(map, "output_format", |value| {
            value
                .as_str()
                .and_then(|raw| raw.parse::<OutputFormat>().ok())
                .ok_or_else(|| {
                    format!("Invalid output_format '{value}'. Must be one of markdown, plain.")
                })
        })?,
        show_thinking_animation: optional(map, "show_thinking_animation", |value| {
            value.as_bool().ok_or_else(|| {
                format!("Invalid show_thinking_animation value '{value}'. Must be a boolean.")
            })
        })?,
        log_level: optional(map, "log_level", |value| {
            value
                .as_str()
                .and_then(|raw| raw.parse::<LogLevel>().ok())
                .ok_or_else(|| {
                    format!(
                        "Invalid log_level '{value}'. Must be one of {}.",
                        LogLevel::NAMES.join(", ")
                    )
                })
        })?,
        perplexity_base_url: optional(map, "perplexity_base_url", |value| {
            non_empty_string("perplexity_base_url", value)
        })?,
    })
}

pub(super) fn positive_number(key: &str, number: f64) -> Result<f64, String> {
    if number.is_finite() && number > 0.0 {
        Ok(number)
    } else {
        Err(format!(
            "Invalid {key} value '{number}'. Must be a positive number."
        ))
    }
}

fn optional<T>(
    map: &Map<String, Value>,
    key: &str,
    check: impl FnOnce(&Value) -> Result<T, String>,
) -> Result<Option<T>, String> {
    map.get(key).map(check).transpose()
}

fn non_empty_string(key: &str, value: &Value) -> Result<String, String> {
    value
        .as_str()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .ok_or_else(|| format!("Invalid {key} value '{value}'. Must be a non-empty string."))
}

fn not_positive(key: &str, value: &Value) -> String {
    format!("Invalid {key} value '{value}'. Must be a positive number.")
}
