//! Query request types

use serde::{Deserialize, Serialize};

use super::chat::ChatTurn;
use crate::providers::llm::ModelChoice;

/// Query request for the chat endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QueryRequest {
    /// The question to answer
    pub question: String,

    /// Which LLM backend answers (default: Gemini)
    #[serde(default)]
    pub model: ModelChoice,

    /// Prior conversation turns, oldest first
    #[serde(default)]
    pub history: Vec<ChatTurn>,

    /// Number of contexts to retrieve (default: 3)
    #[serde(default = "default_top_k")]
    pub top_k: usize,

    /// Minimum relevance score for a context (default: 0.3)
    #[serde(default = "default_threshold")]
    pub score_threshold: f32,
}

fn default_top_k() -> usize {
    3
}

fn default_threshold() -> f32 {
    0.3
}

impl QueryRequest {
    /// Create a request with defaults
    pub fn new(question: impl Into<String>) -> Self {
        Self {
            question: question.into(),
            model: ModelChoice::default(),
            history: Vec::new(),
            top_k: default_top_k(),
            score_threshold: default_threshold(),
        }
    }

    /// Select the answering backend
    pub fn with_model(mut self, model: ModelChoice) -> Self {
        self.model = model;
        self
    }

    /// Attach prior conversation turns
    pub fn with_history(mut self, history: Vec<ChatTurn>) -> Self {
        self.history = history;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_deserializes_with_defaults() {
        let request: QueryRequest =
            serde_json::from_str(r#"{"question": "What is AI?"}"#).unwrap();
        assert_eq!(request.top_k, 3);
        assert_eq!(request.score_threshold, 0.3);
        assert_eq!(request.model, ModelChoice::Gemini);
        assert!(request.history.is_empty());
    }

    #[test]
    fn request_accepts_model_name() {
        let request: QueryRequest =
            serde_json::from_str(r#"{"question": "q", "model": "mistral"}"#).unwrap();
        assert_eq!(request.model, ModelChoice::Mistral);
    }
}
