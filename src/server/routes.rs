//! API routes for the RAG server

use axum::{
    extract::State,
    routing::{get, post},
    Json, Router,
};

use crate::error::{Error, Result};
use crate::server::state::AppState;
use crate::types::{ChatResponse, IngestReport, QueryRequest};

/// Build all API routes
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/query", post(query))
        .route("/ingest", post(ingest))
        .route("/suggestions", get(suggestions))
}

/// POST /api/query - answer a question over the indexed corpus.
///
/// Provider failures come back as a visible message in the answer body
/// rather than an error status, so the conversation stays usable.
async fn query(
    State(state): State<AppState>,
    Json(request): Json<QueryRequest>,
) -> Result<Json<ChatResponse>> {
    tracing::info!("query: \"{}\" (model: {})", request.question, request.model);

    match state.query_pipeline().answer(&request).await {
        Ok(response) => Ok(Json(response)),
        Err(e @ (Error::Retrieval(_) | Error::Invocation(_))) => {
            tracing::error!("query failed: {}", e);
            Ok(Json(ChatResponse::error(format!("An error occurred: {}", e), 0)))
        }
        Err(e) => Err(e),
    }
}

/// POST /api/ingest - run corpus ingestion end to end
async fn ingest(State(state): State<AppState>) -> Result<Json<IngestReport>> {
    tracing::info!("ingestion requested");
    let pipeline = state.ingestion_pipeline()?;
    let report = pipeline.run().await?;
    Ok(Json(report))
}

/// GET /api/suggestions - starter questions for a fresh session
async fn suggestions() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "suggestions": [
            "What is Generative AI",
            "Explain about bias-variance trade-off",
            "Explain neural networks."
        ]
    }))
}
