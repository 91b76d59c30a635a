//! Configuration for the RAG system

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Main RAG system configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RagConfig {
    /// Server configuration
    #[serde(default)]
    pub server: ServerConfig,
    /// Embedding configuration
    #[serde(default)]
    pub embeddings: EmbeddingConfig,
    /// Chunking configuration
    #[serde(default)]
    pub chunking: ChunkingConfig,
    /// LLM backend configuration
    #[serde(default)]
    pub llm: LlmConfig,
    /// Vector index configuration
    #[serde(default)]
    pub index: IndexConfig,
    /// Retrieval configuration
    #[serde(default)]
    pub retrieval: RetrievalConfig,
    /// Source corpus configuration
    #[serde(default)]
    pub corpus: CorpusConfig,
}

impl RagConfig {
    /// Load configuration from a TOML file, falling back to defaults for
    /// any section the file omits
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        toml::from_str(&content)
            .map_err(|e| Error::Config(format!("invalid config file: {}", e)))
    }
}

/// Server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Host address
    pub host: String,
    /// Port number
    pub port: u16,
    /// Enable CORS
    pub enable_cors: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            enable_cors: true,
        }
    }
}

/// Embedding configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmbeddingConfig {
    /// Hugging Face model id used for feature extraction
    pub model: String,
    /// Embedding dimensions (768 for all-mpnet-base-v2)
    pub dimensions: usize,
    /// Batch size for embedding generation during ingestion
    pub batch_size: usize,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl Default for EmbeddingConfig {
    fn default() -> Self {
        Self {
            model: "sentence-transformers/all-mpnet-base-v2".to_string(),
            dimensions: 768,
            batch_size: 16,
            timeout_secs: 60,
        }
    }
}

/// Text chunking configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChunkingConfig {
    /// Maximum tokens per chunk
    pub max_tokens: usize,
    /// Path to the tokenizer vocabulary file (tokenizer.json format,
    /// matching the embedding model's subword vocabulary)
    pub tokenizer_file: PathBuf,
}

impl Default for ChunkingConfig {
    fn default() -> Self {
        Self {
            max_tokens: 256,
            tokenizer_file: PathBuf::from("models/tokenizer.json"),
        }
    }
}

/// LLM backend configuration, one model name per provider
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmConfig {
    /// Gemini model name
    pub gemini_model: String,
    /// Mistral model name
    pub mistral_model: String,
    /// Together-hosted Llama model name
    pub together_model: String,
    /// Sampling temperature
    pub temperature: f32,
    /// Maximum tokens to generate
    pub max_tokens: u32,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            gemini_model: "gemini-1.5-pro".to_string(),
            mistral_model: "mistral-large-latest".to_string(),
            together_model: "meta-llama/Llama-3.3-70B-Instruct-Turbo-Free".to_string(),
            temperature: 0.4,
            max_tokens: 2048,
            timeout_secs: 60,
        }
    }
}

/// Vector index configuration (Pinecone serverless)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IndexConfig {
    /// Index name
    pub name: String,
    /// Data-plane host for the index; resolved from the control plane when
    /// empty
    pub host: String,
    /// Serverless cloud provider
    pub cloud: String,
    /// Serverless region
    pub region: String,
    /// Batch size for vector upserts
    pub upsert_batch_size: usize,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl Default for IndexConfig {
    fn default() -> Self {
        Self {
            name: "ai-chatbot".to_string(),
            host: String::new(),
            cloud: "aws".to_string(),
            region: "us-east-1".to_string(),
            upsert_batch_size: 100,
            timeout_secs: 30,
        }
    }
}

/// Retrieval configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetrievalConfig {
    /// Number of contexts to retrieve per query
    pub top_k: usize,
    /// Minimum relevance score for a context to be included
    pub score_threshold: f32,
}

impl Default for RetrievalConfig {
    fn default() -> Self {
        Self {
            top_k: 3,
            score_threshold: 0.3,
        }
    }
}

/// Source corpus configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CorpusConfig {
    /// Directory holding page-level fragment files (JSON lines)
    pub source_dir: PathBuf,
    /// Valid page range per source title, inclusive on both ends. Pages
    /// outside the range (front/back matter) are excluded from extraction.
    pub valid_ranges: HashMap<String, PageRange>,
}

impl Default for CorpusConfig {
    fn default() -> Self {
        let mut valid_ranges = HashMap::new();
        valid_ranges.insert(
            "Artificial Intelligence: A Modern Approach, Global Edition, 4ed".to_string(),
            PageRange { start: 19, end: 1072 },
        );
        valid_ranges.insert(
            "Designing Machine Learning Systems".to_string(),
            PageRange { start: 1, end: 375 },
        );
        valid_ranges.insert(
            "Hands-On Machine Learning with Scikit-Learn, Keras, and TensorFlow".to_string(),
            PageRange { start: 28, end: 1229 },
        );

        Self {
            source_dir: PathBuf::from("data"),
            valid_ranges,
        }
    }
}

/// Inclusive page interval
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageRange {
    /// First valid page (1-based)
    pub start: u32,
    /// Last valid page, inclusive
    pub end: u32,
}

impl PageRange {
    /// Check whether a page lies inside the range
    pub fn contains(&self, page: u32) -> bool {
        page >= self.start && page <= self.end
    }
}

/// API credentials, sourced exclusively from the environment
#[derive(Debug, Clone)]
pub struct Credentials {
    /// Gemini API key
    pub google_api_key: String,
    /// Mistral API key
    pub mistral_api_key: String,
    /// Together API key
    pub together_api_key: String,
    /// Hugging Face token for the embedding endpoint
    pub hf_token: String,
    /// Pinecone API key
    pub pinecone_api_key: String,
}

impl Credentials {
    /// Read all required credentials. Any missing key is a fatal
    /// configuration error reported at startup, not at first use.
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            google_api_key: require_env("GOOGLE_API_KEY")?,
            mistral_api_key: require_env("MISTRAL_API_KEY")?,
            together_api_key: require_env("TOGETHER_API_KEY")?,
            hf_token: require_env("HF_TOKEN")?,
            pinecone_api_key: require_env("PINECONE_API_KEY")?,
        })
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key)
        .map_err(|_| Error::Config(format!("{} is not set in the environment", key)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn page_range_is_inclusive() {
        let range = PageRange { start: 19, end: 1072 };
        assert!(range.contains(19));
        assert!(range.contains(1072));
        assert!(!range.contains(18));
        assert!(!range.contains(1073));
    }

    #[test]
    fn defaults_match_corpus() {
        let config = RagConfig::default();
        assert_eq!(config.chunking.max_tokens, 256);
        assert_eq!(config.retrieval.top_k, 3);
        assert_eq!(config.embeddings.dimensions, 768);
        assert!(config
            .corpus
            .valid_ranges
            .contains_key("Designing Machine Learning Systems"));
    }

    #[test]
    fn config_parses_partial_toml() {
        let parsed: RagConfig = toml::from_str(
            r#"
            [retrieval]
            top_k = 5
            score_threshold = 0.25
            "#,
        )
        .unwrap();
        assert_eq!(parsed.retrieval.top_k, 5);
        assert_eq!(parsed.server.port, 8080);
    }
}
