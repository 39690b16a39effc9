//! Vector retriever
//!
//! Ties an embedder and the vector store together behind the
//! `core::Retriever` trait the routing engine consumes.

use std::sync::Arc;

use async_trait::async_trait;

use catalog_agent_core::{Document, Result, Retriever, ScoredDocument};

use crate::embeddings::{Embedder, EmbeddingConfig, HashEmbedder, HttpEmbedder};
use crate::vector_store::{VectorStore, VectorStoreConfig};
use crate::RagError;

/// Dense retriever over the catalog document corpus
pub struct VectorRetriever {
    store: VectorStore,
    embedder: Arc<dyn Embedder>,
    min_score: f32,
}

impl VectorRetriever {
    /// Create a retriever with an explicit embedder
    pub fn new(store: VectorStore, embedder: Arc<dyn Embedder>, min_score: f32) -> Self {
        Self {
            store,
            embedder,
            min_score,
        }
    }

    /// Build from settings
    ///
    /// Uses the HTTP embedder when an embedding endpoint is configured,
    /// otherwise the deterministic hash embedder.
    pub fn from_config(
        config: &catalog_agent_config::RetrievalConfig,
    ) -> std::result::Result<Self, RagError> {
        let store = VectorStore::new(VectorStoreConfig::from(config))?;

        let embedder: Arc<dyn Embedder> = match &config.embedding_endpoint {
            Some(endpoint) => Arc::new(HttpEmbedder::new(EmbeddingConfig {
                endpoint: endpoint.clone(),
                model: config.embedding_model.clone(),
                embedding_dim: config.vector_dim,
            })),
            None => {
                tracing::warn!(
                    "No embedding endpoint configured, using hash embedder \
                     (fine for tests, not for production relevance)"
                );
                Arc::new(HashEmbedder::new(config.vector_dim))
            }
        };

        Ok(Self::new(store, embedder, config.min_score))
    }
}

#[async_trait]
impl Retriever for VectorRetriever {
    async fn index(&self, documents: &[Document]) -> Result<()> {
        self.store.recreate_collection().await?;

        let mut embeddings = Vec::with_capacity(documents.len());
        for doc in documents {
            embeddings.push(self.embedder.embed(&doc.content).await?);
        }

        if !documents.is_empty() {
            self.store.upsert(documents, &embeddings).await?;
        }

        tracing::info!(
            documents = documents.len(),
            collection = self.store.collection(),
            "Indexed catalog corpus"
        );
        Ok(())
    }

    async fn query(&self, text: &str, top_k: usize) -> Result<Vec<ScoredDocument>> {
        let embedding = self.embedder.embed(text).await?;
        let results = self.store.search(&embedding, top_k).await?;

        Ok(results
            .into_iter()
            .filter(|r| r.score >= self.min_score)
            .map(|r| ScoredDocument::new(r.document, r.score))
            .collect())
    }

    fn name(&self) -> &str {
        "vector"
    }
}
