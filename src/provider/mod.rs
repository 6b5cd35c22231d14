//! Remote AI providers and the registry that builds them by name.

mod answer;
mod perplexity;
mod wire;


use std::collections::BTreeMap;

use async_trait::async_trait;
use tracing::debug;

use crate::config::{Config, Model};
use crate::error::AppError;
use crate::files::FileContent;

#[allow(unused_imports)]
pub use answer::{CITATIONS_MARKER, ProviderAnswer, WITH_CITATIONS_MARKER};
#[allow(unused_imports)]
pub use perplexity::{API_KEY_ENV, PerplexityProvider, build_request};
#[allow(unused_imports)]
pub use wire::{
    ChatCompletionRequest, ChatMessage, ChatMessageRole, ContentPart, ImageUrl, MessageContent,
};

#[async_trait]
pub trait AiProvider: Send + Sync {
    fn name(&self) -> &str;

    async fn send_query(
        &self,
        query: &str,
        model: Model,
        file: Option<&FileContent>,
    ) -> Result<ProviderAnswer, AppError>;

    /// `Ok(false)` only for rejected credentials; transport failures are errors.
    async fn validate_credentials(&self) -> Result<bool, AppError>;

    fn available_models(&self) -> Vec<Model>;
}

pub type ProviderConstructor = fn(&Config) -> Result<Box<dyn AiProvider>, AppError>;

pub struct ProviderRegistry {
    constructors: BTreeMap<&'static str, ProviderConstructor>,
}

impl ProviderRegistry {
    pub fn empty() -> Self {
        Self {
            constructors: BTreeMap::new(),
        }
    }

    pub fn register(&mut self, name: &'static str, constructor: ProviderConstructor) -> &mut Self {
        self.constructors.insert(name, constructor);
        self
    }

    pub fn names(&self) -> Vec<&'static str> {
        self.constructors.keys().copied().collect()
    }

    pub fn create(&self, name: &str, config: &Config) -> Result<Box<dyn AiProvider>, AppError> {
        let constructor = self.constructors.get(name).ok_or_else(|| {
            AppError::UnsupportedProvider(format!(
                "Provider '{name}' is not supported. Available providers: {}",
                self.names().join(", ")
            ))
        })?;

        debug!(provider = name, "creating provider");
        constructor(config)
    }
}

impl Default for ProviderRegistry {
    fn default() -> Self {
        let mut registry = Self::empty();
        registry.register("perplexity", PerplexityProvider::from_config);
        registry
    }
}
