//! Retrieval collaborator for the catalog agent
//!
//! Implements the `core::Retriever` boundary:
//! - Dense vector search via Qdrant
//! - Embeddings via an HTTP embedding API (Ollama-compatible), with a
//!   deterministic hash embedder for tests and offline development
//!
//! The routing engine treats all of this as opaque; it only sees
//! `index(documents)` and `query(text, top_k)`.

pub mod embeddings;
pub mod retriever;
pub mod vector_store;

pub use embeddings::{Embedder, EmbeddingConfig, HashEmbedder, HttpEmbedder};
pub use retriever::VectorRetriever;
pub use vector_store::{VectorSearchResult, VectorStore, VectorStoreConfig};

use thiserror::Error;

/// Retrieval errors
#[derive(Error, Debug)]
pub enum RagError {
    #[error("Embedding error: {0}")]
    Embedding(String),

    #[error("Vector store error: {0}")]
    VectorStore(String),

    #[error("Search error: {0}")]
    Search(String),

    #[error("Connection error: {0}")]
    Connection(String),
}

impl From<RagError> for catalog_agent_core::Error {
    fn from(err: RagError) -> Self {
        catalog_agent_core::Error::Retrieval(err.to_string())
    }
}
