use std::future::Future;

use anyhow::Result;
use tracing::{error, info, warn};

use crate::config::Config;
use crate::error::{
    AppError, EXIT_API_ERROR, EXIT_FAILURE, EXIT_INTERRUPTED, EXIT_SUCCESS, exit_code_for,
};
use crate::files;
use crate::logging;
use crate::output::{self, ThinkingSpinner};
use crate::provider::ProviderRegistry;

use super::args::Cli;
use super::interpreter;

const NO_QUERY_MESSAGE: &str =
    "No query provided. Usage: ai [file_path] <query> [--s|--p|--r|--deep]";
const EMPTY_ANSWER_MESSAGE: &str = "No response received from AI provider";
const CANCELLED_MESSAGE: &str = "\n\nOperation cancelled by user.";

/// How a run ended when it did not fail with an error.
#[derive(Debug, PartialEq, Eq)]
enum Outcome {
    Answered,
    NoQuery,
    EmptyAnswer,
    Interrupted,
}

pub(crate) async fn run(cli: Cli) -> i32 {
    if cli.tokens.is_empty() {
        print_usage();
        return EXIT_FAILURE;
    }

    let (config, discarded) = match Config::load() {
        Ok(loaded) => loaded,
        Err(err) => {
            output::display_error(&err);
            return err.exit_code();
        }
    };

    let _log_guard = logging::init(config.logging.level);
    info!(version = env!("CARGO_PKG_VERSION"), "smart-term starting");
    if let Some(issue) = discarded {
        warn!(issue = %issue, "discarded configuration file, using defaults");
    }

    execute(&cli.tokens, &config, &ProviderRegistry::default(), ctrl_c()).await
}

/// Resolves on Ctrl-C; never resolves if the handler cannot be installed.
async fn ctrl_c() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        warn!(error = %err, "could not listen for Ctrl-C");
        std::future::pending::<()>().await;
    }
}

/// Run one query end to end and map the result to an exit code.
pub(crate) async fn execute<F>(
    tokens: &[String],
    config: &Config,
    registry: &ProviderRegistry,
    interrupt: F,
) -> i32
where
    F: Future<Output = ()>,
{
    match pipeline(tokens, config, registry, interrupt).await {
        Ok(Outcome::Answered) => EXIT_SUCCESS,
        Ok(Outcome::NoQuery) => {
            output::display_error_message("Error", NO_QUERY_MESSAGE);
            EXIT_FAILURE
        }
        Ok(Outcome::EmptyAnswer) => {
            warn!("provider returned an empty answer");
            output::display_error_message("Error", EMPTY_ANSWER_MESSAGE);
            EXIT_API_ERROR
        }
        Ok(Outcome::Interrupted) => {
            info!("cancelled by user");
            println!("{CANCELLED_MESSAGE}");
            EXIT_INTERRUPTED
        }
        Err(err) => report(&err),
    }
}

fn report(err: &anyhow::Error) -> i32 {
    match err.downcast_ref::<AppError>() {
        Some(app) => {
            error!(kind = app.kind_label(), "{app}");
            output::display_error(app);
        }
        None => {
            error!("unexpected failure: {err:?}");
            output::display_error_message("Error", &format!("Unexpected error: {err}"));
        }
    }
    exit_code_for(err)
}

async fn pipeline<F>(
    tokens: &[String],
    config: &Config,
    registry: &ProviderRegistry,
    interrupt: F,
) -> Result<Outcome>
where
    F: Future<Output = ()>,
{
    let parsed = interpreter::parse(tokens, config.llm.model, &config.llm.provider);
    for warning in &parsed.warnings {
        eprintln!("{warning}");
    }
    let request = parsed.descriptor;
    info!(
        model = %request.model,
        provider = %request.provider,
        file = ?request.file_path,
        show_sources = request.show_sources,
        "parsed arguments"
    );

    if request.query.is_empty() && request.file_path.is_none() {
        return Ok(Outcome::NoQuery);
    }

    let file = match &request.file_path {
        Some(path) => Some(files::read_file(path, config.files.max_size_mb)?),
        None => None,
    };

    output::display_query(&request.query, file.as_ref());

    let provider = registry.create(&request.provider, config)?;

    let answer = {
        let _spinner =
            ThinkingSpinner::start("Thinking...", config.output.show_thinking_animation);
        tokio::select! {
            result = provider.send_query(&request.query, request.model, file.as_ref()) => result?,
            () = interrupt => return Ok(Outcome::Interrupted),
        }
    };

    if answer.is_blank(request.show_sources) {
        return Ok(Outcome::EmptyAnswer);
    }

    output::display_response(
        &answer,
        request.model.as_str(),
        request.show_sources,
        config.output.format,
    );
    if request.show_sources && answer.citations.is_none() {
        output::display_info("No sources were returned for this answer.");
    }

    Ok(Outcome::Answered)
}

fn usage_text() -> String {
    let config_hint = Config::config_path()
        .map(|path| path.display().to_string())
        .unwrap_or_else(|_| "~/.ai_cli_config.json".to_string());

    format!(
        "Smart-term AI CLI Tool

Usage: ai [file_path] <query> [--s|--p|--r|--deep] [--show-sources]

Model flags:
  --s      Use sonar model (default)
  --p      Use sonar-pro model
  --r      Use sonar-reasoning-pro model
  --deep   Use sonar-deep-research model

Source flags:
  --show-sources, --show-source, --show-s   Show the cited answer and its sources

Examples:
  ai 'What is the capital of France?'
  ai document.pdf 'Summarize this document' --p
  ai ~/code/script.py 'Explain this code' --r
  ai image.png 'What is in this image?'
  ai 'Latest Rust release notes' --show-sources

Requires PERPLEXITY_API_KEY in the environment (or a .env file).
Configuration: {config_hint}"
    )
}

fn print_usage() {
    println!("{}", usage_text());
}
