use colored::Colorize;
use once_cell::sync::Lazy;
use regex::Regex;
use reqwest::Url;

use crate::provider::{CITATIONS_MARKER, WITH_CITATIONS_MARKER};

const MAX_LINK_TEXT: usize = 60;

static CITATION_LINE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\[(\d+)\]\s+(https?://\S+)\s*$").expect("Invalid CITATION_LINE regex")
});

/// Wrap `text` in an OSC 8 escape so terminals render it as a link to `url`.
pub fn hyperlink(url: &str, text: &str) -> String {
    format!("\x1b]8;;{url}\x1b\\{text}\x1b]8;;\x1b\\")
}

/// `https://www.example.com/docs/intro?x=1` becomes `example.com/docs`.
pub fn shorten_url(url: &str) -> String {
    let short = match Url::parse(url) {
        Ok(parsed) => {
            let host = parsed.host_str().unwrap_or_default();
            let host = host.strip_prefix("www.").unwrap_or(host);
            let first_segment = parsed
                .path_segments()
                .and_then(|mut segments| segments.next())
                .filter(|segment| !segment.is_empty());
            match first_segment {
                Some(segment) => format!("{host}/{segment}"),
                None => host.to_string(),
            }
        }
        Err(_) => url.to_string(),
    };

    truncate(&short)
}

fn truncate(text: &str) -> String {
    if text.chars().count() <= MAX_LINK_TEXT {
        return text.to_string();
    }
    let kept: String = text.chars().take(MAX_LINK_TEXT - 3).collect();
    format!("{kept}...")
}

/// Render a raw `[n] url` list into display lines.
///
/// Well-formed entries become `[n] <short link>`; other lines pass through,
/// blank lines and stray markers are dropped.
pub fn render_citation_lines(citations: &str) -> Vec<String> {
    citations
        .lines()
        .filter(|line| {
            let trimmed = line.trim();
            !trimmed.is_empty() && trimmed != CITATIONS_MARKER && trimmed != WITH_CITATIONS_MARKER
        })
        .map(|line| match CITATION_LINE.captures(line.trim()) {
            Some(caps) => {
                let url = &caps[2];
                let short = shorten_url(url).blue().underline().to_string();
                format!("[{}] {}", &caps[1], hyperlink(url, &short))
            }
            None => line.to_string(),
        })
        .collect()
}
