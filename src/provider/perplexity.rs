use std::env;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde_json::Value;
use tracing::{debug, info, warn};

use super::answer::ProviderAnswer;
use super::wire::{
    ChatCompletionRequest, ChatCompletionResponse, ChatMessage, ContentPart, ImageUrl,
    MessageContent,
};
use super::AiProvider;
use crate::config::{Config, Model};
use crate::error::AppError;
use crate::files::{FileContent, FileKind};

pub const API_KEY_ENV: &str = "PERPLEXITY_API_KEY";

const VALIDATION_TIMEOUT: Duration = Duration::from_secs(10);

const MISSING_KEY_HELP: &str = "PERPLEXITY_API_KEY environment variable is not set.\n\n\
To set up your API key:\n\
1. Get your API key from https://www.perplexity.ai/settings/api\n\
2. Set the environment variable:\n   export PERPLEXITY_API_KEY='your-api-key-here'\n\
3. Or add it to your ~/.bashrc or ~/.zshrc for persistence";

#[derive(Debug, Clone)]
pub struct PerplexityProvider {
    http: Client,
    base_url: String,
    api_key: String,
    timeout_secs: f64,
    user_agent: String,
}

impl PerplexityProvider {
    pub fn new(
        api_key: impl Into<String>,
        base_url: &str,
        timeout_secs: f64,
    ) -> Result<Self, AppError> {
        let http = Client::builder()
            .timeout(Duration::from_secs_f64(timeout_secs))
            .build()
            .map_err(|err| AppError::configuration(format!("Failed to build HTTP client: {err}")))?;

        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.into(),
            timeout_secs,
            user_agent: format!("smart-term/{}", env!("CARGO_PKG_VERSION")),
        })
    }

    /// Registry constructor: reads the API key from the environment.
    pub fn from_config(config: &Config) -> Result<Box<dyn AiProvider>, AppError> {
        let api_key = env::var(API_KEY_ENV)
            .ok()
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(|| AppError::MissingApiKey(MISSING_KEY_HELP.to_string()))?;

        let provider = Self::new(api_key, &config.llm.base_url, config.llm.timeout_secs)?;
        Ok(Box::new(provider))
    }

    fn endpoint(&self) -> String {
        format!("{}/chat/completions", self.base_url)
    }

    fn transport_error(&self, err: reqwest::Error) -> AppError {
        warn!(error = %err, "request to Perplexity failed");
        if err.is_timeout() {
            AppError::api(format!(
                "Request timed out after {} seconds",
                self.timeout_secs
            ))
        } else if err.is_connect() {
            AppError::api("Network error. Please check your internet connection.")
        } else {
            AppError::api(format!("Request failed: {err}"))
        }
    }
}

#[async_trait]
impl AiProvider for PerplexityProvider {
    fn name(&self) -> &str {
        "perplexity"
    }

    async fn send_query(
        &self,
        query: &str,
        model: Model,
        file: Option<&FileContent>,
    ) -> Result<ProviderAnswer, AppError> {
        let request = build_request(query, model, file);
        debug!(%model, endpoint = %self.endpoint(), "sending query");

        let response = self
            .http
            .post(self.endpoint())
            .bearer_auth(&self.api_key)
            .header("User-Agent", &self.user_agent)
            .json(&request)
            .send()
            .await
            .map_err(|err| self.transport_error(err))?;

        let status = response.status();
        match status {
            StatusCode::UNAUTHORIZED => Err(AppError::api(
                "Authentication failed. Please check your API key.",
            )),
            StatusCode::TOO_MANY_REQUESTS => Err(AppError::api(
                "Rate limit exceeded. Please wait and try again.",
            )),
            status if status.is_client_error() || status.is_server_error() => {
                let body = response.text().await.unwrap_or_default();
                warn!(status = status.as_u16(), "Perplexity returned an error status");
                Err(AppError::api(status_error_message(status.as_u16(), &body)))
            }
            _ => {
                let body = response
                    .text()
                    .await
                    .map_err(|err| self.transport_error(err))?;
                let answer = parse_answer(&body)?;
                info!(%model, "received answer");
                Ok(answer)
            }
        }
    }

    async fn validate_credentials(&self) -> Result<bool, AppError> {
        let request = ChatCompletionRequest {
            model: Model::Sonar.as_str().to_string(),
            messages: vec![ChatMessage::user(MessageContent::Text("test".to_string()))],
        };

        let response = self
            .http
            .post(self.endpoint())
            .bearer_auth(&self.api_key)
            .header("User-Agent", &self.user_agent)
            .timeout(VALIDATION_TIMEOUT)
            .json(&request)
            .send()
            .await
            .map_err(|err| {
                warn!(error = %err, "credential check failed");
                AppError::api("Unable to validate credentials due to network error")
            })?;

        Ok(response.status() != StatusCode::UNAUTHORIZED)
    }

    fn available_models(&self) -> Vec<Model> {
        Model::ALL.to_vec()
    }
}

/// Merge the query and optional attachment into a single user message.
pub fn build_request(query: &str, model: Model, file: Option<&FileContent>) -> ChatCompletionRequest {
    let content = match file {
        None => MessageContent::Text(query.to_string()),
        Some(file) => match file.kind {
            FileKind::Text => MessageContent::Text(format!(
                "File content from {}:\n\n{}\n\n{}",
                file.display_path(),
                file.payload.as_str(),
                query
            )),
            FileKind::Pdf => MessageContent::Text(format!(
                "Content from {}:\n\n{}\n\n{}",
                file.display_path(),
                file.payload.as_str(),
                query
            )),
            FileKind::Image => MessageContent::Parts(vec![
                ContentPart::Text {
                    text: query.to_string(),
                },
                ContentPart::ImageUrl {
                    image_url: ImageUrl {
                        url: format!(
                            "data:{};base64,{}",
                            file.mime_type(),
                            file.payload.as_str()
                        ),
                    },
                },
            ]),
        },
    };

    ChatCompletionRequest {
        model: model.as_str().to_string(),
        messages: vec![ChatMessage::user(content)],
    }
}

fn status_error_message(status: u16, body: &str) -> String {
    let mut message = format!("API request failed with status {status}");
    match serde_json::from_str::<Value>(body) {
        Ok(json) => {
            if let Some(error) = json.get("error") {
                let detail = match error {
                    Value::String(text) => text.clone(),
                    other => other.to_string(),
                };
                message.push_str(&format!(": {detail}"));
            }
        }
        Err(_) => message.push_str(&format!(": {body}")),
    }
    message
}

fn parse_answer(body: &str) -> Result<ProviderAnswer, AppError> {
    let unexpected = || AppError::api("Unexpected API response format");

    let response: ChatCompletionResponse = serde_json::from_str(body).map_err(|err| {
        warn!(error = %err, "could not decode chat completion response");
        unexpected()
    })?;

    let choice = response.choices.first().ok_or_else(unexpected)?;
    let raw = choice.message.content.as_deref().unwrap_or_default();
    debug!(finish_reason = ?choice.finish_reason, chars = raw.len(), "decoded answer");

    Ok(ProviderAnswer::from_raw(raw).with_citation_urls(&response.citations))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_error_uses_json_error_field() {
        assert_eq!(
            status_error_message(500, r#"{"error":"model overloaded"}"#),
            "API request failed with status 500: model overloaded"
        );
        assert_eq!(
            status_error_message(400, r#"{"error":{"message":"bad model"}}"#),
            r#"API request failed with status 400: {"message":"bad model"}"#
        );
    }

    #[test]
    fn status_error_without_error_field_has_no_detail() {
        assert_eq!(
            status_error_message(503, r#"{"detail":"down"}"#),
            "API request failed with status 503"
        );
    }

    #[test]
    fn status_error_falls_back_to_raw_text() {
        assert_eq!(
            status_error_message(502, "Bad Gateway"),
            "API request failed with status 502: Bad Gateway"
        );
    }

    #[test]
    fn missing_choices_is_unexpected_format() {
        let err = parse_answer(r#"{"choices":[]}"#).unwrap_err();
        assert_eq!(err.to_string(), "Unexpected API response format");

        let err = parse_answer("not json").unwrap_err();
        assert_eq!(err.to_string(), "Unexpected API response format");
    }

    #[test]
    fn citations_array_becomes_numbered_list() {
        let answer = parse_answer(
            r#"{"choices":[{"message":{"content":"Body"}}],"citations":["https://a.example","https://b.example"]}"#,
        )
        .unwrap();
        assert_eq!(answer.body(false), "Body");
        assert_eq!(
            answer.citations.as_deref(),
            Some("[1] https://a.example\n[2] https://b.example")
        );
    }
}
