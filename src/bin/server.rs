//! RAG chatbot server binary
//!
//! Run with: cargo run --bin insight-rag-server

use insight_rag::{
    config::{Credentials, RagConfig},
    server::RagServer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "insight_rag=info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration, falling back to defaults when no file is given
    let config = match std::env::args().nth(1) {
        Some(path) => RagConfig::from_file(&path)?,
        None => RagConfig::default(),
    };

    tracing::info!("Configuration loaded");
    tracing::info!("  - Embedding model: {}", config.embeddings.model);
    tracing::info!("  - Embedding dimensions: {}", config.embeddings.dimensions);
    tracing::info!("  - Vector index: {}", config.index.name);
    tracing::info!("  - Chunk budget: {} tokens", config.chunking.max_tokens);
    tracing::info!("  - Retrieval: top {} at threshold {}", config.retrieval.top_k, config.retrieval.score_threshold);

    // All provider credentials must be present before serving
    let credentials = Credentials::from_env()?;

    let server = RagServer::new(config, credentials)?;

    println!("\nServer starting...");
    println!("  API: http://{}", server.address());
    println!("  Health: http://{}/health", server.address());
    println!("\nEndpoints:");
    println!("  POST /api/ingest      - Ingest the configured corpus");
    println!("  POST /api/query       - Ask questions");
    println!("  GET  /api/suggestions - Starter questions");
    println!("\nPress Ctrl+C to stop\n");

    server.start().await?;

    Ok(())
}
