//! Application state for the RAG server

use std::sync::Arc;

use parking_lot::RwLock;

use crate::config::{Credentials, RagConfig};
use crate::error::Result;
use crate::ingestion::{
    ChapterExtractor, HfTokenCounter, PageLoader, SentenceChunker, TextCleaner,
};
use crate::pipeline::{IngestionPipeline, QueryPipeline};
use crate::providers::{
    EmbeddingProvider, GeminiClient, HfEmbedder, MistralClient, ModelChoice, ModelRegistry,
    PineconeIndex, TogetherClient, VectorIndexProvider,
};
use crate::retrieval::RetrievalAugmenter;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    /// Configuration
    config: RagConfig,
    /// Embedding provider shared by query and ingestion
    embedder: Arc<dyn EmbeddingProvider>,
    /// Vector index shared by query and ingestion
    index: Arc<dyn VectorIndexProvider>,
    /// Query pipeline, built at startup
    query_pipeline: QueryPipeline,
    /// Ingestion pipeline, built on first use so a missing tokenizer
    /// file only fails ingestion requests, not query serving
    ingestion_pipeline: RwLock<Option<Arc<IngestionPipeline>>>,
}

impl AppState {
    /// Create new application state, wiring all providers
    pub fn new(config: RagConfig, credentials: Credentials) -> Result<Self> {
        tracing::info!("initializing RAG application state...");

        let embedder: Arc<dyn EmbeddingProvider> =
            Arc::new(HfEmbedder::new(&config.embeddings, credentials.hf_token)?);
        tracing::info!(
            "embedding provider initialized ({}, {} dimensions)",
            config.embeddings.model,
            embedder.dimensions()
        );

        let index: Arc<dyn VectorIndexProvider> =
            Arc::new(PineconeIndex::new(&config.index, credentials.pinecone_api_key)?);
        tracing::info!("vector index initialized ('{}')", config.index.name);

        let mut models = ModelRegistry::new();
        models.register(
            ModelChoice::Gemini,
            Arc::new(GeminiClient::new(&config.llm, credentials.google_api_key)?),
        );
        models.register(
            ModelChoice::Mistral,
            Arc::new(MistralClient::new(&config.llm, credentials.mistral_api_key)?),
        );
        models.register(
            ModelChoice::Llama,
            Arc::new(TogetherClient::new(&config.llm, credentials.together_api_key)?),
        );
        tracing::info!("model registry initialized (gemini, mistral, llama)");

        let augmenter = RetrievalAugmenter::new(Arc::clone(&embedder), Arc::clone(&index));
        let query_pipeline = QueryPipeline::new(augmenter, models);

        Ok(Self {
            inner: Arc::new(AppStateInner {
                config,
                embedder,
                index,
                query_pipeline,
                ingestion_pipeline: RwLock::new(None),
            }),
        })
    }

    /// Get configuration
    pub fn config(&self) -> &RagConfig {
        &self.inner.config
    }

    /// Get the query pipeline
    pub fn query_pipeline(&self) -> &QueryPipeline {
        &self.inner.query_pipeline
    }

    /// Get or build the ingestion pipeline
    pub fn ingestion_pipeline(&self) -> Result<Arc<IngestionPipeline>> {
        if let Some(pipeline) = self.inner.ingestion_pipeline.read().clone() {
            return Ok(pipeline);
        }

        let config = &self.inner.config;
        let counter = HfTokenCounter::from_file(&config.chunking.tokenizer_file)?;
        let pipeline = Arc::new(IngestionPipeline::new(
            PageLoader::new(&config.corpus.source_dir),
            TextCleaner::new(),
            ChapterExtractor::new(config.corpus.valid_ranges.clone()),
            SentenceChunker::new(config.chunking.max_tokens, Arc::new(counter)),
            Arc::clone(&self.inner.embedder),
            Arc::clone(&self.inner.index),
            config.embeddings.batch_size,
            config.index.upsert_batch_size,
        ));

        *self.inner.ingestion_pipeline.write() = Some(Arc::clone(&pipeline));
        Ok(pipeline)
    }
}
