use anyhow::anyhow;
use std::fmt;

/// Remote model variants offered by the Perplexity provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Model {
    Sonar,
    SonarPro,
    SonarReasoningPro,
    SonarDeepResearch,
}

impl Model {
    pub const ALL: [Model; 4] = [
        Model::Sonar,
        Model::SonarPro,
        Model::SonarReasoningPro,
        Model::SonarDeepResearch,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Model::Sonar => "sonar",
            Model::SonarPro => "sonar-pro",
            Model::SonarReasoningPro => "sonar-reasoning-pro",
            Model::SonarDeepResearch => "sonar-deep-research",
        }
    }
}

impl fmt::Display for Model {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Model {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Model::ALL
            .into_iter()
            .find(|model| model.as_str() == s)
            .ok_or_else(|| anyhow!("Unknown model '{s}'"))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Markdown,
    Plain,
}

impl std::str::FromStr for OutputFormat {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "markdown" => Ok(OutputFormat::Markdown),
            "plain" => Ok(OutputFormat::Plain),
            other => Err(anyhow!("Unknown output format '{other}'")),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    Debug,
    Info,
    Warning,
    Error,
    Critical,
}

impl LogLevel {
    pub const NAMES: [&'static str; 5] = ["DEBUG", "INFO", "WARNING", "ERROR", "CRITICAL"];

    /// Directive understood by `tracing_subscriber::EnvFilter`.
    pub fn filter_directive(self) -> &'static str {
        match self {
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warning => "warn",
            LogLevel::Error | LogLevel::Critical => "error",
        }
    }
}

impl std::str::FromStr for LogLevel {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "DEBUG" => Ok(LogLevel::Debug),
            "INFO" => Ok(LogLevel::Info),
            "WARNING" => Ok(LogLevel::Warning),
            "ERROR" => Ok(LogLevel::Error),
            "CRITICAL" => Ok(LogLevel::Critical),
            other => Err(anyhow!(
                "Invalid log_level '{other}'. Must be one of {}",
                LogLevel::NAMES.join(", ")
            )),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub llm: LlmSettings,
    pub files: FileSettings,
    pub output: OutputSettings,
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LlmSettings {
    pub provider: String,
    pub model: Model,
    pub timeout_secs: f64,
    pub base_url: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FileSettings {
    pub max_size_mb: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct OutputSettings {
    pub format: OutputFormat,
    pub show_thinking_animation: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LoggingSettings {
    pub level: LogLevel,
}

/// Recognized keys of the user's JSON file, already validated.
#[derive(Debug, Default, PartialEq)]
pub(super) struct FileConfig {
    pub default_model: Option<Model>,
    pub default_provider: Option<String>,
    pub timeout: Option<f64>,
    pub max_file_size_mb: Option<f64>,
    pub output_format: Option<OutputFormat>,
    pub show_thinking_animation: Option<bool>,
    pub log_level: Option<LogLevel>,
    pub perplexity_base_url: Option<String>,
}
