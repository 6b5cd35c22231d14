use tracing::warn;

pub const WITH_CITATIONS_MARKER: &str = "__WITH_CITATIONS__";
pub const CITATIONS_MARKER: &str = "__CITATIONS__";

/// A provider answer with the citation bookkeeping already split out.
///
/// `body_clean` is the answer without inline citation references,
/// `body_cited` the variant that keeps them. When the provider only sends one
/// variant both fields hold the same text. `citations` is the raw bibliography,
/// one `[n] url` entry per line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderAnswer {
    pub body_clean: String,
    pub body_cited: String,
    pub citations: Option<String>,
}

impl ProviderAnswer {
    /// Parse an answer that may embed `__WITH_CITATIONS__` and `__CITATIONS__`.
    pub fn from_raw(raw: &str) -> Self {
        match raw.split_once(WITH_CITATIONS_MARKER) {
            Some((clean, cited)) => {
                if !cited.contains(CITATIONS_MARKER) && !clean.contains(CITATIONS_MARKER) {
                    warn!("answer has a cited variant but no citations list");
                }
                let (body_clean, clean_citations) = split_citations(clean);
                let (body_cited, cited_citations) = split_citations(cited);
                Self {
                    body_clean,
                    body_cited,
                    citations: cited_citations.or(clean_citations),
                }
            }
            None => {
                let (body, citations) = split_citations(raw);
                Self {
                    body_clean: body.clone(),
                    body_cited: body,
                    citations,
                }
            }
        }
    }

    /// Fill the citations list from a URL array when the body carried none.
    pub fn with_citation_urls(mut self, urls: &[String]) -> Self {
        if self.citations.is_none() && !urls.is_empty() {
            let lines = urls
                .iter()
                .enumerate()
                .map(|(idx, url)| format!("[{}] {}", idx + 1, url))
                .collect::<Vec<_>>()
                .join("\n");
            self.citations = Some(lines);
        }
        self
    }

    pub fn body(&self, show_sources: bool) -> &str {
        if show_sources {
            &self.body_cited
        } else {
            &self.body_clean
        }
    }

    pub fn is_blank(&self, show_sources: bool) -> bool {
        self.body(show_sources).trim().is_empty()
    }
}

fn split_citations(segment: &str) -> (String, Option<String>) {
    match segment.split_once(CITATIONS_MARKER) {
        Some((body, citations)) => {
            let citations = citations.trim();
            (
                body.trim().to_string(),
                (!citations.is_empty()).then(|| citations.to_string()),
            )
        }
        None => (segment.trim().to_string(), None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_answer_has_no_citations() {
        let answer = ProviderAnswer::from_raw("  Four.\n");
        assert_eq!(answer.body_clean, "Four.");
        assert_eq!(answer.body_cited, "Four.");
        assert_eq!(answer.citations, None);
    }

    #[test]
    fn citations_marker_splits_body_from_list() {
        let answer = ProviderAnswer::from_raw(
            "Rust is a language.\n__CITATIONS__\n[1] https://www.rust-lang.org/learn",
        );
        assert_eq!(answer.body(false), "Rust is a language.");
        assert_eq!(
            answer.citations.as_deref(),
            Some("[1] https://www.rust-lang.org/learn")
        );
    }

    #[test]
    fn both_markers_produce_two_bodies() {
        let raw = "Clean body\n__WITH_CITATIONS__\nCited body [1]\n__CITATIONS__\n[1] https://a.example/x";
        let answer = ProviderAnswer::from_raw(raw);

        assert_eq!(answer.body(false), "Clean body");
        assert_eq!(answer.body(true), "Cited body [1]");
        assert_eq!(answer.citations.as_deref(), Some("[1] https://a.example/x"));
        assert!(!answer.body(false).contains("__"));
        assert!(!answer.body(true).contains("__"));
    }

    #[test]
    fn citations_before_with_marker_are_still_found() {
        let raw = "Clean\n__CITATIONS__\n[1] https://a.example\n__WITH_CITATIONS__\nCited [1]";
        let answer = ProviderAnswer::from_raw(raw);
        assert_eq!(answer.body(true), "Cited [1]");
        assert_eq!(answer.citations.as_deref(), Some("[1] https://a.example"));
    }

    #[test]
    fn with_marker_alone_leaves_citations_empty() {
        let answer = ProviderAnswer::from_raw("Clean\n__WITH_CITATIONS__\nCited");
        assert_eq!(answer.body(false), "Clean");
        assert_eq!(answer.body(true), "Cited");
        assert_eq!(answer.citations, None);
    }

    #[test]
    fn url_array_fills_missing_citations() {
        let urls = vec![
            "https://a.example/one".to_string(),
            "https://b.example/two".to_string(),
        ];
        let answer = ProviderAnswer::from_raw("Body").with_citation_urls(&urls);
        assert_eq!(
            answer.citations.as_deref(),
            Some("[1] https://a.example/one\n[2] https://b.example/two")
        );
    }

    #[test]
    fn url_array_never_replaces_inline_citations() {
        let answer = ProviderAnswer::from_raw("Body\n__CITATIONS__\n[1] https://inline.example")
            .with_citation_urls(&["https://other.example".to_string()]);
        assert_eq!(answer.citations.as_deref(), Some("[1] https://inline.example"));
    }

    #[test]
    fn blank_answer_is_detected() {
        assert!(ProviderAnswer::from_raw("   \n").is_blank(false));
        assert!(ProviderAnswer::from_raw("__CITATIONS__\n[1] https://a.example").is_blank(true));
        assert!(!ProviderAnswer::from_raw("ok").is_blank(true));
    }
}
