//! Configuration management for the smart-term assistant.
//!
//! Settings are layered in this order:
//! - Built-in defaults
//! - The optional JSON file at `~/.ai_cli_config.json` (discarded as a whole
//!   when any recognized key holds an invalid value)
//! - `SMART_TERM_*` / `PERPLEXITY_BASE_URL` environment overrides

mod builder;
mod constants;
mod defaults;
mod environment;
mod loader;
mod types;
mod validation;

#[allow(unused_imports)]
pub use types::{
    Config, FileSettings, LlmSettings, LogLevel, LoggingSettings, Model, OutputFormat,
    OutputSettings,
};

#[cfg(test)]
mod tests;
