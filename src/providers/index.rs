//! Vector index trait and the Pinecone serverless HTTP client

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::config::IndexConfig;
use crate::error::{Error, Result};

/// A vector with its identifier and chapter metadata, ready to upsert
#[derive(Debug, Clone, Serialize)]
pub struct VectorRecord {
    pub id: String,
    pub values: Vec<f32>,
    pub metadata: VectorMetadata,
}

/// Chapter provenance stored alongside each vector
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VectorMetadata {
    pub title: String,
    pub chapter_page_no: u32,
    pub content: String,
}

/// A retrieved chunk with its similarity score
#[derive(Debug, Clone)]
pub struct ScoredContext {
    pub content: String,
    pub score: f32,
    pub title: String,
    pub chapter_page_no: u32,
}

/// Index occupancy as reported by the backing store
#[derive(Debug, Clone, Copy, Default)]
pub struct IndexStats {
    pub total_vector_count: u64,
}

/// Trait for the vector index backing retrieval
#[async_trait]
pub trait VectorIndexProvider: Send + Sync {
    /// Create the index if it does not already exist
    async fn create_index(&self, dimension: usize) -> Result<()>;

    /// Current index statistics
    async fn describe_stats(&self) -> Result<IndexStats>;

    /// Upsert a batch of vectors
    async fn upsert(&self, records: &[VectorRecord]) -> Result<()>;

    /// Nearest-neighbor query, returning at most `top_k` scored contexts
    async fn query(&self, vector: &[f32], top_k: usize) -> Result<Vec<ScoredContext>>;

    /// Provider name for logging
    fn name(&self) -> &str;
}

/// Pinecone serverless index over its control and data plane HTTP APIs
pub struct PineconeIndex {
    http: reqwest::Client,
    api_key: String,
    index_name: String,
    host: String,
    cloud: String,
    region: String,
}

impl PineconeIndex {
    /// Create a client for the configured serverless index
    pub fn new(config: &IndexConfig, api_key: String) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| Error::Config(format!("failed to build http client: {}", e)))?;

        Ok(Self {
            http,
            api_key,
            index_name: config.name.clone(),
            host: config.host.clone(),
            cloud: config.cloud.clone(),
            region: config.region.clone(),
        })
    }

    fn data_url(&self, path: &str) -> Result<String> {
        if self.host.is_empty() {
            return Err(Error::Config(
                "index host is not configured; set [index] host to the data-plane hostname"
                    .to_string(),
            ));
        }
        Ok(format!("https://{}/{}", self.host, path))
    }
}

#[derive(Serialize)]
struct CreateIndexRequest<'a> {
    name: &'a str,
    dimension: usize,
    metric: &'a str,
    spec: IndexSpec<'a>,
}

#[derive(Serialize)]
struct IndexSpec<'a> {
    serverless: ServerlessSpec<'a>,
}

#[derive(Serialize)]
struct ServerlessSpec<'a> {
    cloud: &'a str,
    region: &'a str,
}

#[derive(Deserialize)]
struct StatsResponse {
    #[serde(rename = "totalVectorCount", default)]
    total_vector_count: u64,
}

#[derive(Serialize)]
struct UpsertRequest<'a> {
    vectors: &'a [VectorRecord],
}

#[derive(Serialize)]
struct QueryRequest<'a> {
    vector: &'a [f32],
    #[serde(rename = "topK")]
    top_k: usize,
    #[serde(rename = "includeMetadata")]
    include_metadata: bool,
}

#[derive(Deserialize)]
struct QueryResponse {
    #[serde(default)]
    matches: Vec<QueryMatch>,
}

#[derive(Deserialize)]
struct QueryMatch {
    score: f32,
    metadata: Option<VectorMetadata>,
}

#[async_trait]
impl VectorIndexProvider for PineconeIndex {
    async fn create_index(&self, dimension: usize) -> Result<()> {
        let request = CreateIndexRequest {
            name: &self.index_name,
            dimension,
            metric: "cosine",
            spec: IndexSpec {
                serverless: ServerlessSpec {
                    cloud: &self.cloud,
                    region: &self.region,
                },
            },
        };

        let response = self
            .http
            .post("https://api.pinecone.io/indexes")
            .header("Api-Key", &self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| Error::Retrieval(format!("index creation request failed: {}", e)))?;

        // 409 means the index already exists, which is fine
        if response.status() == reqwest::StatusCode::CONFLICT {
            tracing::info!("index '{}' already exists", self.index_name);
            return Ok(());
        }

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(Error::Retrieval(format!(
                "index creation failed ({}): {}",
                status, body
            )));
        }

        tracing::info!(
            "created index '{}' ({}/{}, dimension {})",
            self.index_name,
            self.cloud,
            self.region,
            dimension
        );
        Ok(())
    }

    async fn describe_stats(&self) -> Result<IndexStats> {
        let response = self
            .http
            .post(self.data_url("describe_index_stats")?)
            .header("Api-Key", &self.api_key)
            .json(&serde_json::json!({}))
            .send()
            .await
            .map_err(|e| Error::Retrieval(format!("stats request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(Error::Retrieval(format!(
                "stats request failed ({}): {}",
                status, body
            )));
        }

        let stats: StatsResponse = response
            .json()
            .await
            .map_err(|e| Error::Retrieval(format!("failed to parse index stats: {}", e)))?;

        Ok(IndexStats {
            total_vector_count: stats.total_vector_count,
        })
    }

    async fn upsert(&self, records: &[VectorRecord]) -> Result<()> {
        if records.is_empty() {
            return Ok(());
        }

        let response = self
            .http
            .post(self.data_url("vectors/upsert")?)
            .header("Api-Key", &self.api_key)
            .json(&UpsertRequest { vectors: records })
            .send()
            .await
            .map_err(|e| Error::Retrieval(format!("upsert request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(Error::Retrieval(format!(
                "upsert failed ({}): {}",
                status, body
            )));
        }

        Ok(())
    }

    async fn query(&self, vector: &[f32], top_k: usize) -> Result<Vec<ScoredContext>> {
        let response = self
            .http
            .post(self.data_url("query")?)
            .header("Api-Key", &self.api_key)
            .json(&QueryRequest {
                vector,
                top_k,
                include_metadata: true,
            })
            .send()
            .await
            .map_err(|e| Error::Retrieval(format!("query request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(Error::Retrieval(format!(
                "query failed ({}): {}",
                status, body
            )));
        }

        let query_response: QueryResponse = response
            .json()
            .await
            .map_err(|e| Error::Retrieval(format!("failed to parse query response: {}", e)))?;

        let contexts = query_response
            .matches
            .into_iter()
            .filter_map(|m| {
                m.metadata.map(|meta| ScoredContext {
                    content: meta.content,
                    score: m.score,
                    title: meta.title,
                    chapter_page_no: meta.chapter_page_no,
                })
            })
            .collect();

        Ok(contexts)
    }

    fn name(&self) -> &str {
        "pinecone"
    }
}
