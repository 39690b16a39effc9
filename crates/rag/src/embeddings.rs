//! Text embeddings
//!
//! Embedding inference runs out of process; this module only holds the
//! HTTP client for an Ollama-compatible embedding API and a
//! deterministic hash embedder used when no endpoint is configured.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::RagError;

/// Embedding configuration
#[derive(Debug, Clone)]
pub struct EmbeddingConfig {
    /// Embedding API endpoint
    pub endpoint: String,
    /// Model name
    pub model: String,
    /// Embedding dimension
    pub embedding_dim: usize,
}

impl Default for EmbeddingConfig {
    fn default() -> Self {
        Self {
            endpoint: catalog_agent_config::constants::endpoints::EMBEDDING_DEFAULT.to_string(),
            model: catalog_agent_config::constants::retrieval::EMBEDDING_MODEL.to_string(),
            embedding_dim: catalog_agent_config::constants::retrieval::VECTOR_DIM,
        }
    }
}

/// Embedder interface
#[async_trait]
pub trait Embedder: Send + Sync {
    /// Embed a single text
    async fn embed(&self, text: &str) -> Result<Vec<f32>, RagError>;

    /// Get embedding dimension
    fn dim(&self) -> usize;
}

/// Request to the embedding API
#[derive(Debug, Serialize)]
struct EmbedRequest {
    model: String,
    input: String,
}

/// Response from the embedding API
#[derive(Debug, Deserialize)]
struct EmbedResponse {
    embeddings: Vec<Vec<f32>>,
}

/// HTTP embedder against an Ollama-compatible `/api/embed`
pub struct HttpEmbedder {
    client: Client,
    config: EmbeddingConfig,
}

impl HttpEmbedder {
    /// Create a new HTTP embedder
    pub fn new(config: EmbeddingConfig) -> Self {
        Self {
            client: Client::new(),
            config,
        }
    }
}

#[async_trait]
impl Embedder for HttpEmbedder {
    async fn embed(&self, text: &str) -> Result<Vec<f32>, RagError> {
        let request = EmbedRequest {
            model: self.config.model.clone(),
            input: text.to_string(),
        };

        let url = format!("{}/api/embed", self.config.endpoint);

        let response = self
            .client
            .post(&url)
            .json(&request)
            .send()
            .await
            .map_err(|e| RagError::Embedding(format!("Embedding request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(RagError::Embedding(format!(
                "Embedding API failed: {} - {}",
                status, body
            )));
        }

        let embed_response: EmbedResponse = response
            .json()
            .await
            .map_err(|e| RagError::Embedding(format!("Failed to parse embedding response: {}", e)))?;

        embed_response
            .embeddings
            .into_iter()
            .next()
            .ok_or_else(|| RagError::Embedding("No embedding returned".to_string()))
    }

    fn dim(&self) -> usize {
        self.config.embedding_dim
    }
}

/// Deterministic hash-based embedder (no model required)
///
/// Not semantically meaningful, but stable per input, which is enough
/// for tests and offline development.
pub struct HashEmbedder {
    embedding_dim: usize,
}

impl HashEmbedder {
    pub fn new(embedding_dim: usize) -> Self {
        Self { embedding_dim }
    }

    fn embed_sync(&self, text: &str) -> Vec<f32> {
        let mut embedding = vec![0.0f32; self.embedding_dim];

        for (i, c) in text.chars().enumerate() {
            let idx = (c as usize + i) % self.embedding_dim;
            embedding[idx] += 1.0;
        }

        let norm: f32 = embedding.iter().map(|x| x * x).sum::<f32>().sqrt();
        if norm > 0.0 {
            for v in &mut embedding {
                *v /= norm;
            }
        }

        embedding
    }
}

#[async_trait]
impl Embedder for HashEmbedder {
    async fn embed(&self, text: &str) -> Result<Vec<f32>, RagError> {
        Ok(self.embed_sync(text))
    }

    fn dim(&self) -> usize {
        self.embedding_dim
    }
}
