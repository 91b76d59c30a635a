//! Query pipeline: augment, invoke, parse

use std::time::Instant;

use crate::error::Result;
use crate::generation::ResponseParser;
use crate::providers::llm::ModelRegistry;
use crate::retrieval::RetrievalAugmenter;
use crate::types::{ChatResponse, QueryRequest};

/// Answers a query end to end: retrieval augmentation, model invocation
/// and response parsing. Insufficient context short-circuits to the
/// fallback response; provider failures propagate to the caller.
pub struct QueryPipeline {
    augmenter: RetrievalAugmenter,
    models: ModelRegistry,
    parser: ResponseParser,
}

impl QueryPipeline {
    pub fn new(augmenter: RetrievalAugmenter, models: ModelRegistry) -> Self {
        Self {
            augmenter,
            models,
            parser: ResponseParser::new(),
        }
    }

    /// Answer one query
    pub async fn answer(&self, request: &QueryRequest) -> Result<ChatResponse> {
        let started = Instant::now();

        let prompt = self
            .augmenter
            .augment(
                &request.question,
                &request.history,
                request.top_k,
                request.score_threshold,
            )
            .await?;

        let Some(prompt) = prompt else {
            tracing::info!("no grounded context for '{}'", request.question);
            return Ok(ChatResponse::fallback(started.elapsed().as_millis() as u64));
        };

        let provider = self.models.provider(request.model)?;
        tracing::debug!("invoking {} ({})", provider.name(), provider.model());
        let raw = provider.invoke(&prompt).await?;

        let parsed = self.parser.parse(&raw);
        Ok(ChatResponse::grounded(
            parsed.answer,
            parsed.follow_ups,
            started.elapsed().as_millis() as u64,
        ))
    }
}
