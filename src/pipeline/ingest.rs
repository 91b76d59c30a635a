//! Ingestion pipeline: fragments to indexed chapter chunks

use std::sync::Arc;
use std::time::Instant;

use sha2::{Digest, Sha256};

use crate::error::Result;
use crate::ingestion::{ChapterExtractor, PageLoader, SentenceChunker, TextCleaner};
use crate::providers::embedding::EmbeddingProvider;
use crate::providers::index::{VectorIndexProvider, VectorMetadata, VectorRecord};
use crate::types::IngestReport;

/// Runs the full ingestion flow: load fragments, extract chapters, clean
/// and chunk their text, embed the chunks and upsert them into the index.
///
/// Vector ids are content hashes, so re-running ingestion over unchanged
/// sources overwrites vectors in place instead of duplicating them.
pub struct IngestionPipeline {
    loader: PageLoader,
    cleaner: TextCleaner,
    extractor: ChapterExtractor,
    chunker: SentenceChunker,
    embedder: Arc<dyn EmbeddingProvider>,
    index: Arc<dyn VectorIndexProvider>,
    embed_batch_size: usize,
    upsert_batch_size: usize,
}

impl IngestionPipeline {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        loader: PageLoader,
        cleaner: TextCleaner,
        extractor: ChapterExtractor,
        chunker: SentenceChunker,
        embedder: Arc<dyn EmbeddingProvider>,
        index: Arc<dyn VectorIndexProvider>,
        embed_batch_size: usize,
        upsert_batch_size: usize,
    ) -> Self {
        Self {
            loader,
            cleaner,
            extractor,
            chunker,
            embedder,
            index,
            embed_batch_size: embed_batch_size.max(1),
            upsert_batch_size: upsert_batch_size.max(1),
        }
    }

    /// Run ingestion end to end and report what was indexed.
    ///
    /// Any extraction, embedding or index failure aborts the run; partial
    /// upserts are harmless to retry because ids are content-derived.
    pub async fn run(&self) -> Result<IngestReport> {
        let started = Instant::now();

        self.index.create_index(self.embedder.dimensions()).await?;

        let stats = self.index.describe_stats().await?;
        if stats.total_vector_count > 0 {
            tracing::info!(
                "index already holds {} vectors; content-hash ids keep re-ingestion idempotent",
                stats.total_vector_count
            );
        }

        let fragments = self.loader.load();
        let chapters = self.extractor.extract(&fragments)?;

        let mut chunks = Vec::new();
        for chapter in &chapters {
            let cleaned = self.cleaner.clean(&chapter.content);
            for chunk in self.chunker.chunk(&cleaned)? {
                chunks.push((chapter, chunk));
            }
        }
        tracing::info!("chunked {} chapters into {} chunks", chapters.len(), chunks.len());

        let mut records = Vec::with_capacity(chunks.len());
        for batch in chunks.chunks(self.embed_batch_size) {
            let texts: Vec<String> = batch.iter().map(|(_, text)| text.clone()).collect();
            let embeddings = self.embedder.embed_batch(&texts).await?;

            for ((chapter, text), values) in batch.iter().zip(embeddings) {
                records.push(VectorRecord {
                    id: hex::encode(Sha256::digest(text.as_bytes())),
                    values,
                    metadata: VectorMetadata {
                        title: chapter.title.clone(),
                        chapter_page_no: chapter.page_label,
                        content: text.clone(),
                    },
                });
            }
        }

        for batch in records.chunks(self.upsert_batch_size) {
            self.index.upsert(batch).await?;
        }

        let report = IngestReport {
            fragments_loaded: fragments.len(),
            chapters_extracted: chapters.len(),
            chunks_indexed: records.len(),
            preexisting_vectors: stats.total_vector_count,
            completed_at: chrono::Utc::now(),
            processing_time_ms: started.elapsed().as_millis() as u64,
        };
        tracing::info!(
            "ingestion complete: {} chunks indexed in {}ms",
            report.chunks_indexed,
            report.processing_time_ms
        );
        Ok(report)
    }
}
