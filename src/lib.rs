//! insight-rag: retrieval-augmented chatbot over a textbook corpus
//!
//! Ingestion splits page-level fragments into chapter records, chunks them
//! into token-bounded sentence-aligned spans, embeds the chunks and upserts
//! them into a managed vector index. At query time the top-k contexts above a
//! relevance threshold are folded into a structured prompt, sent to one of
//! three LLM backends, and the completion is parsed into an answer plus
//! follow-up questions.

pub mod config;
pub mod error;
pub mod generation;
pub mod ingestion;
pub mod pipeline;
pub mod providers;
pub mod retrieval;
pub mod server;
pub mod types;

pub use config::RagConfig;
pub use error::{Error, Result};
pub use types::{
    chapter::ChapterRecord,
    chat::{ChatRole, ChatTurn},
    fragment::DocumentFragment,
    query::QueryRequest,
    response::ChatResponse,
};
