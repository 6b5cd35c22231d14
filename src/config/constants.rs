pub const CONFIG_FILE_NAME: &str = ".ai_cli_config.json";
pub const DEFAULT_PROVIDER: &str = "perplexity";
pub const DEFAULT_TIMEOUT_SECS: f64 = 30.0;
pub const DEFAULT_MAX_FILE_SIZE_MB: f64 = 10.0;
pub const DEFAULT_PERPLEXITY_BASE_URL: &str = "https://api.perplexity.ai";
