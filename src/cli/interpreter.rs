use std::path::PathBuf;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::config::Model;
use crate::files::expand_home;

const MODEL_FLAGS: &[(&str, Model)] = &[
    ("--s", Model::Sonar),
    ("--p", Model::SonarPro),
    ("--r", Model::SonarReasoningPro),
    ("--deep", Model::SonarDeepResearch),
];

const SOURCES_FLAGS: &[&str] = &["--show-sources", "--show-source", "--show-s"];

static FLAG_SHAPE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^--[A-Za-z]{1,5}$").expect("Invalid FLAG_SHAPE regex"));

/// What the user asked for, with every flag resolved.
#[derive(Debug, Clone, PartialEq)]
pub struct RequestDescriptor {
    pub query: String,
    pub file_path: Option<PathBuf>,
    pub model: Model,
    pub provider: String,
    pub show_sources: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ParsedArgs {
    pub descriptor: RequestDescriptor,
    /// Messages for stderr; malformed flags never fail the parse.
    pub warnings: Vec<String>,
}

pub fn parse(tokens: &[String], default_model: Model, default_provider: &str) -> ParsedArgs {
    let mut warnings = Vec::new();

    let (file_path, rest) = detect_file(tokens);
    let (model, rest) = extract_model(rest, &mut warnings);
    let (show_sources, rest) = extract_sources(rest);

    ParsedArgs {
        descriptor: RequestDescriptor {
            query: rest.join(" "),
            file_path,
            model: model.unwrap_or(default_model),
            provider: default_provider.to_string(),
            show_sources,
        },
        warnings,
    }
}

/// Only the first token is ever considered as a file path.
fn detect_file(tokens: &[String]) -> (Option<PathBuf>, Vec<&str>) {
    let rest: Vec<&str> = tokens.iter().map(String::as_str).collect();
    match rest.first() {
        Some(first) => {
            let candidate = expand_home(first);
            if candidate.is_file() {
                (Some(candidate), rest[1..].to_vec())
            } else {
                (None, rest)
            }
        }
        None => (None, rest),
    }
}

fn extract_model<'a>(tokens: Vec<&'a str>, warnings: &mut Vec<String>) -> (Option<Model>, Vec<&'a str>) {
    let mut found: Vec<(String, Model)> = Vec::new();
    let mut rest = Vec::with_capacity(tokens.len());

    for token in tokens {
        let lowered = token.to_lowercase();
        if let Some((_, model)) = MODEL_FLAGS.iter().find(|(flag, _)| *flag == lowered) {
            found.push((lowered, *model));
            continue;
        }

        if FLAG_SHAPE.is_match(token) && !SOURCES_FLAGS.contains(&lowered.as_str()) {
            warnings.push(format!(
                "⚠ Warning: Unknown flag '{token}'. Using default model.\n   Valid model flags: --s, --p, --r, --deep"
            ));
        }
        rest.push(token);
    }

    if found.len() > 1 {
        let flags = found
            .iter()
            .map(|(flag, _)| flag.as_str())
            .collect::<Vec<_>>()
            .join(", ");
        let last = &found[found.len() - 1].0;
        warnings.push(format!(
            "⚠ Warning: Multiple model flags provided ({flags}). Using the last one: {last}"
        ));
    }

    (found.last().map(|(_, model)| *model), rest)
}

fn extract_sources(tokens: Vec<&str>) -> (bool, Vec<&str>) {
    let (flags, rest): (Vec<&str>, Vec<&str>) = tokens
        .into_iter()
        .partition(|token| SOURCES_FLAGS.contains(&token.to_lowercase().as_str()));
    (!flags.is_empty(), rest)
}
