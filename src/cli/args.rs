use clap::Parser;

use super::commands;

/// Entry point for the `ai` command-line interface.
#[derive(Debug, Parser)]
#[command(
    name = "ai",
    about = "Ask Perplexity from your terminal, optionally about a file",
    version,
    long_about = None
)]
pub struct Cli {
    /// `[file_path] <query...> [--s|--p|--r|--deep] [--show-sources]`
    #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
    pub tokens: Vec<String>,
}

impl Cli {
    /// Run the assistant and return the process exit code.
    pub async fn run(self) -> i32 {
        commands::run(self).await
    }
}
