//! End-to-end ingestion and query pipelines

pub mod ingest;
pub mod query;

pub use ingest::IngestionPipeline;
pub use query::QueryPipeline;
