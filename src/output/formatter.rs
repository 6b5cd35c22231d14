use colored::{Color, Colorize};

use super::citations::render_citation_lines;
use super::frame::{model_color, render_frame};
use super::markdown::render_markdown;
use crate::config::OutputFormat;
use crate::error::AppError;
use crate::files::FileContent;
use crate::provider::ProviderAnswer;

pub fn render_query(query: &str, file: Option<&FileContent>) -> String {
    let mut out = format!("\n{}\n  {}\n", "Query:".cyan().bold(), query);
    if let Some(file) = file {
        let attached = format!(
            "📎 Attached file: {} (type: {})",
            file.display_path(),
            file.kind
        );
        out.push_str(&format!("\n{}\n", attached.dimmed()));
    }
    out
}

pub fn render_response(
    answer: &ProviderAnswer,
    model: &str,
    show_sources: bool,
    format: OutputFormat,
) -> String {
    let body = answer.body(show_sources);
    let body = match format {
        OutputFormat::Markdown => render_markdown(body),
        OutputFormat::Plain => body.to_string(),
    };

    let mut out = render_frame(
        &format!("Response from {model}"),
        &body,
        model_color(model),
    );

    if show_sources {
        let lines = answer
            .citations
            .as_deref()
            .map(render_citation_lines)
            .unwrap_or_default();
        if !lines.is_empty() {
            out.push('\n');
            out.push_str(&render_frame("Sources", &lines.join("\n"), Color::Yellow));
        }
    }

    out
}

pub fn render_error(label: &str, message: &str) -> String {
    let body = format!("{}\n{}", format!("{label}:").red().bold(), message);
    render_frame("Error", &body, Color::Red)
}

pub fn render_info(message: &str) -> String {
    format!("{}  {}", "ℹ".blue().bold(), message)
}

pub fn display_query(query: &str, file: Option<&FileContent>) {
    println!("{}", render_query(query, file));
}

pub fn display_response(
    answer: &ProviderAnswer,
    model: &str,
    show_sources: bool,
    format: OutputFormat,
) {
    println!("{}", render_response(answer, model, show_sources, format));
}

pub fn display_error(error: &AppError) {
    display_error_message(error.kind_label(), &error.to_string());
}

pub fn display_error_message(label: &str, message: &str) {
    eprintln!("{}", render_error(label, message));
}

pub fn display_info(message: &str) {
    println!("{}", render_info(message));
}
