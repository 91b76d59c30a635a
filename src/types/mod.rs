//! Core data types flowing through the ingestion and query pipelines

pub mod chapter;
pub mod chat;
pub mod fragment;
pub mod query;
pub mod response;

pub use chapter::ChapterRecord;
pub use chat::{ChatRole, ChatTurn};
pub use fragment::DocumentFragment;
pub use query::QueryRequest;
pub use response::{ChatResponse, IngestReport};
