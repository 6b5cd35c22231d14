use super::constants::*;
use super::types::{
    FileSettings, LlmSettings, LogLevel, LoggingSettings, Model, OutputFormat, OutputSettings,
};

impl Default for LlmSettings {
    fn default() -> Self {
        Self {
            provider: DEFAULT_PROVIDER.to_string(),
            model: Model::Sonar,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            base_url: DEFAULT_PERPLEXITY_BASE_URL.to_string(),
        }
    }
}

impl Default for FileSettings {
    fn default() -> Self {
        Self {
            max_size_mb: DEFAULT_MAX_FILE_SIZE_MB,
        }
    }
}

impl Default for OutputSettings {
    fn default() -> Self {
        Self {
            format: OutputFormat::Markdown,
            show_thinking_animation: true,
        }
    }
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: LogLevel::Info,
        }
    }
}
