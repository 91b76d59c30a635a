//! LLM provider trait, model selection and the provider registry

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Which hosted model answers a query
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModelChoice {
    #[default]
    Gemini,
    Mistral,
    Llama,
}

impl ModelChoice {
    /// Map a positional selector (0, 1, 2) to a model choice
    pub fn from_index(index: usize) -> Option<Self> {
        match index {
            0 => Some(Self::Gemini),
            1 => Some(Self::Mistral),
            2 => Some(Self::Llama),
            _ => None,
        }
    }

    /// Stable lowercase label, matching the wire format
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Gemini => "gemini",
            Self::Mistral => "mistral",
            Self::Llama => "llama",
        }
    }
}

impl std::fmt::Display for ModelChoice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Trait for invoking a hosted chat/completion model
#[async_trait]
pub trait LlmProvider: Send + Sync + std::fmt::Debug {
    /// Send a fully assembled prompt and return the raw completion text
    async fn invoke(&self, prompt: &str) -> Result<String>;

    /// Provider name for logging
    fn name(&self) -> &str;

    /// Underlying model identifier
    fn model(&self) -> &str;
}

/// Registry of configured LLM providers keyed by model choice
pub struct ModelRegistry {
    providers: HashMap<ModelChoice, Arc<dyn LlmProvider>>,
}

impl ModelRegistry {
    pub fn new() -> Self {
        Self {
            providers: HashMap::new(),
        }
    }

    /// Register a provider for a model choice, replacing any existing one
    pub fn register(&mut self, choice: ModelChoice, provider: Arc<dyn LlmProvider>) {
        self.providers.insert(choice, provider);
    }

    /// Look up the provider for a choice
    pub fn provider(&self, choice: ModelChoice) -> Result<Arc<dyn LlmProvider>> {
        self.providers.get(&choice).cloned().ok_or_else(|| {
            Error::Invocation(format!("no provider registered for model '{}'", choice))
        })
    }
}

impl Default for ModelRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_choice_is_gemini() {
        assert_eq!(ModelChoice::default(), ModelChoice::Gemini);
    }

    #[test]
    fn index_mapping_matches_menu_order() {
        assert_eq!(ModelChoice::from_index(0), Some(ModelChoice::Gemini));
        assert_eq!(ModelChoice::from_index(1), Some(ModelChoice::Mistral));
        assert_eq!(ModelChoice::from_index(2), Some(ModelChoice::Llama));
        assert_eq!(ModelChoice::from_index(3), None);
    }

    #[test]
    fn deserializes_lowercase_labels() {
        let choice: ModelChoice = serde_json::from_str("\"llama\"").unwrap();
        assert_eq!(choice, ModelChoice::Llama);
    }

    #[test]
    fn missing_provider_is_an_invocation_error() {
        let registry = ModelRegistry::new();
        let err = registry.provider(ModelChoice::Mistral).unwrap_err();
        assert!(matches!(err, Error::Invocation(_)));
    }
}
