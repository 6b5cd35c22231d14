use dirs::home_dir;
use std::{
    fs,
    path::{Path, PathBuf},
};

use crate::error::AppError;

use super::Config;
use super::builder::ConfigBuilder;
use super::constants::CONFIG_FILE_NAME;
use super::environment::apply_env_overrides;
use super::types::FileConfig;
use super::validation::validate_file_config;

impl Config {
    pub fn config_path() -> Result<PathBuf, AppError> {
        let mut path = home_dir()
            .ok_or_else(|| AppError::configuration("Could not determine home directory"))?;
        path.push(CONFIG_FILE_NAME);
        Ok(path)
    }

    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::new()
    }

    /// Load the settings, along with the reason the user's file was
    /// discarded when it was. Logging is not up yet at this point, so the
    /// caller records that reason once it is.
    pub fn load() -> Result<(Self, Option<String>), AppError> {
        let path = Self::config_path()?;
        Self::load_from(&path)
    }

    pub fn load_from(path: &Path) -> Result<(Self, Option<String>), AppError> {
        let mut builder = ConfigBuilder::new();

        let discarded = match read_file_config(path) {
            Ok(Some(file)) => {
                builder = file.apply(builder);
                None
            }
            Ok(None) => None,
            Err(issue) => {
                eprintln!(
                    "⚠️  Warning: {issue} in {}. Using default configuration.",
                    path.display()
                );
                Some(format!("{issue} in {}", path.display()))
            }
        };

        builder = apply_env_overrides(builder)?;
        Ok((builder.build(), discarded))
    }
}

/// Read and validate the user's file. `Ok(None)` means there is no file to
/// apply; `Err` carries the reason the whole file was rejected.
fn read_file_config(path: &Path) -> Result<Option<FileConfig>, String> {
    if !path.exists() {
        return Ok(None);
    }

    let contents = fs::read_to_string(path)
        .map_err(|err| format!("Could not read configuration ({err})"))?;

    if contents.trim().is_empty() {
        return Ok(None);
    }

    let document: serde_json::Value =
        serde_json::from_str(&contents).map_err(|err| format!("Invalid JSON ({err})"))?;

    validate_file_config(&document).map(Some)
}

impl FileConfig {
    pub fn apply(self, builder: ConfigBuilder) -> ConfigBuilder {
        builder
            .with_llm(|llm| {
                if let Some(model) = self.default_model {
                    llm.model = model;
                }
                if let Some(provider) = self.default_provider {
                    llm.provider = provider;
                }
                if let Some(timeout) = self.timeout {
                    llm.timeout_secs = timeout;
                }
                if let Some(base_url) = self.perplexity_base_url {
                    llm.base_url = base_url;
                }
            })
            .with_files(|files| {
                if let Some(max_size) = self.max_file_size_mb {
                    files.max_size_mb = max_size;
                }
            })
            .with_output(|output| {
                if let Some(format) = self.output_format {
                    output.format = format;
                }
                if let Some(show) = self.show_thinking_animation {
                    output.show_thinking_animation = show;
                }
            })
            .with_logging(|logging| {
                if let Some(level) = self.log_level {
                    logging.level = level;
                }
            })
    }
}
