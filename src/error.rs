//! Error taxonomy for the RAG system
//!
//! Four failure classes matter here: configuration problems (fatal at
//! startup or ingestion), retrieval failures (vector index unreachable),
//! invocation failures (LLM backend unreachable) and ingestion failures
//! (corpus processing aborted). A model completion without the follow-up
//! marker is NOT an error; the response parser degrades gracefully instead.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;

/// Result alias used throughout the crate
pub type Result<T> = std::result::Result<T, Error>;

/// All errors produced by the RAG system
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Missing credential, unknown title/range mapping, bad config file
    #[error("configuration error: {0}")]
    Config(String),

    /// Vector index query/auth/network failure
    #[error("retrieval error: {0}")]
    Retrieval(String),

    /// LLM backend call failure
    #[error("model invocation error: {0}")]
    Invocation(String),

    /// Corpus processing failure; aborts the ingestion run
    #[error("ingestion error: {0}")]
    Ingestion(String),

    /// Filesystem error
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[error("serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let status = match &self {
            Error::Config(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Error::Retrieval(_) | Error::Invocation(_) => StatusCode::BAD_GATEWAY,
            Error::Ingestion(_) => StatusCode::UNPROCESSABLE_ENTITY,
            Error::Io(_) | Error::Json(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        tracing::error!("request failed: {}", self);

        let body = Json(serde_json::json!({
            "error": self.to_string(),
        }));

        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_messages_carry_context() {
        let err = Error::Config("MISTRAL_API_KEY is not set".to_string());
        assert_eq!(
            err.to_string(),
            "configuration error: MISTRAL_API_KEY is not set"
        );

        let err = Error::Retrieval("index unreachable".to_string());
        assert!(err.to_string().starts_with("retrieval error"));
    }
}
