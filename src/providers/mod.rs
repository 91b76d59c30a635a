//! Provider traits and HTTP clients for external model and index services

pub mod embedding;
pub mod gemini;
pub mod index;
pub mod llm;
pub mod mistral;
pub mod together;

pub use embedding::{EmbeddingProvider, HfEmbedder};
pub use gemini::GeminiClient;
pub use index::{IndexStats, PineconeIndex, ScoredContext, VectorIndexProvider, VectorRecord};
pub use llm::{LlmProvider, ModelChoice, ModelRegistry};
pub use mistral::MistralClient;
pub use together::TogetherClient;
