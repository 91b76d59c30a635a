//! Retrieval augmentation with score-threshold filtering

use std::sync::Arc;

use crate::error::Result;
use crate::generation::PromptBuilder;
use crate::providers::embedding::EmbeddingProvider;
use crate::providers::index::VectorIndexProvider;
use crate::types::ChatTurn;

/// Embeds a question, retrieves scored contexts and assembles the
/// augmented prompt. Returns `None` when no context clears the score
/// threshold, signalling insufficient knowledge to the caller.
pub struct RetrievalAugmenter {
    embedder: Arc<dyn EmbeddingProvider>,
    index: Arc<dyn VectorIndexProvider>,
}

impl RetrievalAugmenter {
    pub fn new(
        embedder: Arc<dyn EmbeddingProvider>,
        index: Arc<dyn VectorIndexProvider>,
    ) -> Self {
        Self { embedder, index }
    }

    /// Build an augmented prompt for `question`, or `None` if retrieval
    /// found nothing at or above `score_threshold`.
    ///
    /// Retrieval failures propagate; insufficient knowledge does not.
    pub async fn augment(
        &self,
        question: &str,
        history: &[ChatTurn],
        top_k: usize,
        score_threshold: f32,
    ) -> Result<Option<String>> {
        let embedding = self.embedder.embed(question).await?;
        let retrieved = self.index.query(&embedding, top_k).await?;

        let contexts: Vec<_> = retrieved
            .into_iter()
            .filter(|c| c.score >= score_threshold)
            .collect();

        if contexts.is_empty() {
            tracing::debug!(
                "no context scored at or above {:.2} for question '{}'",
                score_threshold,
                question
            );
            return Ok(None);
        }

        tracing::debug!(
            "augmenting with {} contexts (best score {:.3})",
            contexts.len(),
            contexts[0].score
        );
        Ok(Some(PromptBuilder::build_prompt(
            question, history, &contexts,
        )))
    }
}
