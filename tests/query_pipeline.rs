//! End-to-end query flow tests with stub providers

use std::sync::Arc;

use async_trait::async_trait;

use insight_rag::error::{Error, Result};
use insight_rag::pipeline::QueryPipeline;
use insight_rag::providers::embedding::EmbeddingProvider;
use insight_rag::providers::index::{
    IndexStats, ScoredContext, VectorIndexProvider, VectorRecord,
};
use insight_rag::providers::llm::{LlmProvider, ModelChoice, ModelRegistry};
use insight_rag::retrieval::RetrievalAugmenter;
use insight_rag::types::QueryRequest;

struct StubEmbedder;

#[async_trait]
impl EmbeddingProvider for StubEmbedder {
    async fn embed(&self, _text: &str) -> Result<Vec<f32>> {
        Ok(vec![0.1; 768])
    }

    fn dimensions(&self) -> usize {
        768
    }

    fn name(&self) -> &str {
        "stub"
    }
}

struct StubIndex {
    scores: Vec<f32>,
    fail: bool,
}

impl StubIndex {
    fn with_scores(scores: Vec<f32>) -> Self {
        Self {
            scores,
            fail: false,
        }
    }

    fn failing() -> Self {
        Self {
            scores: Vec::new(),
            fail: true,
        }
    }
}

#[async_trait]
impl VectorIndexProvider for StubIndex {
    async fn create_index(&self, _dimension: usize) -> Result<()> {
        Ok(())
    }

    async fn describe_stats(&self) -> Result<IndexStats> {
        Ok(IndexStats::default())
    }

    async fn upsert(&self, _records: &[VectorRecord]) -> Result<()> {
        Ok(())
    }

    async fn query(&self, _vector: &[f32], top_k: usize) -> Result<Vec<ScoredContext>> {
        if self.fail {
            return Err(Error::Retrieval("index unreachable".to_string()));
        }
        Ok(self
            .scores
            .iter()
            .take(top_k)
            .enumerate()
            .map(|(i, &score)| ScoredContext {
                content: format!("Context passage {}.", i + 1),
                score,
                title: "Test Book".to_string(),
                chapter_page_no: 10,
            })
            .collect())
    }

    fn name(&self) -> &str {
        "stub"
    }
}

#[derive(Debug)]
struct StubLlm {
    completion: Option<String>,
}

impl StubLlm {
    fn replying(completion: &str) -> Self {
        Self {
            completion: Some(completion.to_string()),
        }
    }

    fn failing() -> Self {
        Self { completion: None }
    }
}

#[async_trait]
impl LlmProvider for StubLlm {
    async fn invoke(&self, _prompt: &str) -> Result<String> {
        self.completion
            .clone()
            .ok_or_else(|| Error::Invocation("backend down".to_string()))
    }

    fn name(&self) -> &str {
        "stub"
    }

    fn model(&self) -> &str {
        "stub-model"
    }
}

fn pipeline(index: StubIndex, llm: StubLlm) -> QueryPipeline {
    let augmenter = RetrievalAugmenter::new(Arc::new(StubEmbedder), Arc::new(index));
    let mut models = ModelRegistry::new();
    models.register(ModelChoice::Gemini, Arc::new(llm));
    QueryPipeline::new(augmenter, models)
}

#[tokio::test]
async fn below_threshold_scores_yield_fallback() {
    let pipeline = pipeline(
        StubIndex::with_scores(vec![0.1, 0.1, 0.1]),
        StubLlm::replying("should never be invoked"),
    );

    let response = pipeline
        .answer(&QueryRequest::new("What is AI?"))
        .await
        .unwrap();

    assert!(!response.grounded);
    assert!(response.answer.starts_with("I don't know about this topic"));
    assert_eq!(response.follow_ups.len(), 3);
}

#[tokio::test]
async fn grounded_answer_carries_parsed_follow_ups() {
    let pipeline = pipeline(
        StubIndex::with_scores(vec![0.9, 0.5]),
        StubLlm::replying(
            "Agents perceive and act. Feel free to ask more!\
             Follow up questions: 1. What is a rational agent?\
             2. How do agents learn?3. What are environments?",
        ),
    );

    let response = pipeline
        .answer(&QueryRequest::new("What is an agent?"))
        .await
        .unwrap();

    assert!(response.grounded);
    assert!(response.answer.starts_with("Agents perceive and act."));
    assert_eq!(
        response.follow_ups,
        vec![
            "What is a rational agent",
            "How do agents learn",
            "What are environments"
        ]
    );
}

#[tokio::test]
async fn marker_free_completion_degrades_to_plain_answer() {
    let pipeline = pipeline(
        StubIndex::with_scores(vec![0.8]),
        StubLlm::replying("A plain answer without suggestions."),
    );

    let response = pipeline.answer(&QueryRequest::new("q")).await.unwrap();
    assert!(response.grounded);
    assert_eq!(response.answer, "A plain answer without suggestions.");
    assert!(response.follow_ups.is_empty());
}

#[tokio::test]
async fn retrieval_failure_propagates() {
    let pipeline = pipeline(StubIndex::failing(), StubLlm::replying("unused"));

    let err = pipeline.answer(&QueryRequest::new("q")).await.unwrap_err();
    assert!(matches!(err, Error::Retrieval(_)));
}

#[tokio::test]
async fn invocation_failure_propagates() {
    let pipeline = pipeline(StubIndex::with_scores(vec![0.9]), StubLlm::failing());

    let err = pipeline.answer(&QueryRequest::new("q")).await.unwrap_err();
    assert!(matches!(err, Error::Invocation(_)));
}

#[tokio::test]
async fn unregistered_model_is_an_invocation_error() {
    let pipeline = pipeline(
        StubIndex::with_scores(vec![0.9]),
        StubLlm::replying("unused"),
    );

    let request = QueryRequest::new("q").with_model(ModelChoice::Llama);
    let err = pipeline.answer(&request).await.unwrap_err();
    assert!(matches!(err, Error::Invocation(_)));
}

#[tokio::test]
async fn mixed_scores_only_keep_passing_contexts() {
    // One context above the 0.3 default threshold is enough to ground
    let pipeline = pipeline(
        StubIndex::with_scores(vec![0.35, 0.05, 0.01]),
        StubLlm::replying("Grounded answer."),
    );

    let response = pipeline.answer(&QueryRequest::new("q")).await.unwrap();
    assert!(response.grounded);
    assert_eq!(response.answer, "Grounded answer.");
}
