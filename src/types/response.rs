//! Response types for the chat and ingestion endpoints

use serde::{Deserialize, Serialize};

/// Answer returned for a query
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatResponse {
    /// Generated answer text
    pub answer: String,
    /// Up to 3 suggested follow-up questions
    pub follow_ups: Vec<String>,
    /// Whether the answer came from retrieved corpus context. False for the
    /// insufficient-knowledge fallback.
    pub grounded: bool,
    /// Processing time in milliseconds
    pub processing_time_ms: u64,
}

impl ChatResponse {
    /// Maximum follow-up questions rendered per answer
    pub const MAX_FOLLOW_UPS: usize = 3;

    /// Create a grounded response, truncating follow-ups to the render limit
    pub fn grounded(
        answer: String,
        mut follow_ups: Vec<String>,
        processing_time_ms: u64,
    ) -> Self {
        follow_ups.truncate(Self::MAX_FOLLOW_UPS);
        Self {
            answer,
            follow_ups,
            grounded: true,
            processing_time_ms,
        }
    }

    /// Inline error message shown in place of an answer when a provider
    /// call fails; the session stays usable for the next query
    pub fn error(message: String, processing_time_ms: u64) -> Self {
        Self {
            answer: message,
            follow_ups: Vec::new(),
            grounded: false,
            processing_time_ms,
        }
    }

    /// Fallback response used when no context survives relevance filtering
    pub fn fallback(processing_time_ms: u64) -> Self {
        Self {
            answer: "I don't know about this topic. You can try these topics".to_string(),
            follow_ups: vec![
                "What is Generative AI".to_string(),
                "Explain about bias-variance trade-off".to_string(),
                "Explain neural networks.".to_string(),
            ],
            grounded: false,
            processing_time_ms,
        }
    }
}

/// Report returned by an ingestion run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IngestReport {
    /// Fragments read from the corpus directory
    pub fragments_loaded: usize,
    /// Chapters extracted across all titles
    pub chapters_extracted: usize,
    /// Chunks produced and embedded
    pub chunks_indexed: usize,
    /// Vectors the index held before this run
    pub preexisting_vectors: u64,
    /// Completion timestamp
    pub completed_at: chrono::DateTime<chrono::Utc>,
    /// Processing time in milliseconds
    pub processing_time_ms: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn grounded_truncates_follow_ups() {
        let follow_ups: Vec<String> = (0..5).map(|i| format!("q{}", i)).collect();
        let response = ChatResponse::grounded("a".to_string(), follow_ups, 10);
        assert_eq!(response.follow_ups.len(), ChatResponse::MAX_FOLLOW_UPS);
        assert!(response.grounded);
    }

    #[test]
    fn fallback_suggests_three_topics() {
        let response = ChatResponse::fallback(5);
        assert!(!response.grounded);
        assert_eq!(response.follow_ups.len(), 3);
        assert!(response.answer.starts_with("I don't know"));
    }
}
