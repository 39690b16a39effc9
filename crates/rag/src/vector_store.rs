//! Vector store using Qdrant
//!
//! Dense vector storage and similarity search over the catalog
//! document corpus. One collection per deployment; re-indexing drops
//! and recreates the collection so a shrunk corpus leaves no stale
//! points behind.

use qdrant_client::{
    qdrant::{
        value::Kind, CreateCollectionBuilder, Distance, PointStruct, SearchPointsBuilder,
        UpsertPointsBuilder, VectorParamsBuilder,
    },
    Qdrant,
};
use std::collections::HashMap;

use catalog_agent_core::{Document, DocumentLabel, LanguageVariant};

use crate::RagError;

/// Vector store configuration
#[derive(Debug, Clone)]
pub struct VectorStoreConfig {
    /// Qdrant endpoint
    pub endpoint: String,
    /// Collection name
    pub collection: String,
    /// Vector dimension
    pub vector_dim: usize,
    /// API key (optional)
    pub api_key: Option<String>,
}

impl Default for VectorStoreConfig {
    fn default() -> Self {
        Self {
            endpoint: catalog_agent_config::constants::endpoints::QDRANT_DEFAULT.to_string(),
            collection: "catalog_documents".to_string(),
            vector_dim: catalog_agent_config::constants::retrieval::VECTOR_DIM,
            api_key: None,
        }
    }
}

impl From<&catalog_agent_config::RetrievalConfig> for VectorStoreConfig {
    fn from(config: &catalog_agent_config::RetrievalConfig) -> Self {
        Self {
            endpoint: config.qdrant_endpoint.clone(),
            collection: config.qdrant_collection.clone(),
            vector_dim: config.vector_dim,
            api_key: config.qdrant_api_key.clone(),
        }
    }
}

/// Search result from the vector store
#[derive(Debug, Clone)]
pub struct VectorSearchResult {
    pub document: Document,
    /// Similarity score
    pub score: f32,
}

/// Vector store client
pub struct VectorStore {
    client: Qdrant,
    config: VectorStoreConfig,
}

impl VectorStore {
    /// Create a new vector store connection
    pub fn new(config: VectorStoreConfig) -> Result<Self, RagError> {
        let mut builder = Qdrant::from_url(&config.endpoint);

        if let Some(ref api_key) = config.api_key {
            builder = builder.api_key(api_key.clone());
            tracing::info!("Qdrant connection using API key authentication");
        }

        let client = builder
            .build()
            .map_err(|e| RagError::Connection(e.to_string()))?;

        Ok(Self { client, config })
    }

    /// Drop and recreate the collection for a fresh corpus
    pub async fn recreate_collection(&self) -> Result<(), RagError> {
        let exists = self
            .client
            .collection_exists(&self.config.collection)
            .await
            .map_err(|e| RagError::VectorStore(e.to_string()))?;

        if exists {
            self.client
                .delete_collection(&self.config.collection)
                .await
                .map_err(|e| RagError::VectorStore(e.to_string()))?;
        }

        self.client
            .create_collection(
                CreateCollectionBuilder::new(&self.config.collection).vectors_config(
                    VectorParamsBuilder::new(self.config.vector_dim as u64, Distance::Cosine),
                ),
            )
            .await
            .map_err(|e| RagError::VectorStore(e.to_string()))?;

        Ok(())
    }

    /// Insert documents with embeddings
    ///
    /// Point ids are corpus positions, so re-upserting the same corpus
    /// overwrites in place.
    pub async fn upsert(
        &self,
        documents: &[Document],
        embeddings: &[Vec<f32>],
    ) -> Result<(), RagError> {
        if documents.len() != embeddings.len() {
            return Err(RagError::VectorStore(
                "Document and embedding count mismatch".to_string(),
            ));
        }

        let points: Vec<PointStruct> = documents
            .iter()
            .zip(embeddings.iter())
            .enumerate()
            .map(|(position, (doc, emb))| {
                let mut payload: HashMap<String, qdrant_client::qdrant::Value> = HashMap::new();
                payload.insert("content".to_string(), doc.content.clone().into());
                payload.insert("node_id".to_string(), doc.node_id.clone().into());
                payload.insert("label".to_string(), doc.label.as_str().to_string().into());
                payload.insert("variant".to_string(), doc.variant.code().to_string().into());

                PointStruct::new(position as u64, emb.clone(), payload)
            })
            .collect();

        self.client
            .upsert_points(UpsertPointsBuilder::new(&self.config.collection, points))
            .await
            .map_err(|e| RagError::VectorStore(e.to_string()))?;

        Ok(())
    }

    /// Search by vector
    pub async fn search(
        &self,
        query_embedding: &[f32],
        top_k: usize,
    ) -> Result<Vec<VectorSearchResult>, RagError> {
        let search_builder = SearchPointsBuilder::new(
            &self.config.collection,
            query_embedding.to_vec(),
            top_k as u64,
        )
        .with_payload(true);

        let results = self
            .client
            .search_points(search_builder)
            .await
            .map_err(|e| RagError::Search(e.to_string()))?;

        let search_results: Vec<VectorSearchResult> = results
            .result
            .into_iter()
            .map(|point| {
                let mut content = String::new();
                let mut node_id = String::new();
                let mut label = DocumentLabel::Message;
                let mut variant = LanguageVariant::English;

                for (key, value) in point.payload {
                    let Some(Kind::StringValue(s)) = value.kind else {
                        continue;
                    };
                    match key.as_str() {
                        "content" => content = s,
                        "node_id" => node_id = s,
                        "label" => {
                            if let Some(parsed) = DocumentLabel::from_str_loose(&s) {
                                label = parsed;
                            }
                        }
                        "variant" => {
                            if let Some(parsed) = LanguageVariant::from_str_loose(&s) {
                                variant = parsed;
                            }
                        }
                        _ => {}
                    }
                }

                VectorSearchResult {
                    document: Document::new(node_id, content, label, variant),
                    score: point.score,
                }
            })
            .collect();

        Ok(search_results)
    }

    /// Collection name this store writes to
    pub fn collection(&self) -> &str {
        &self.config.collection
    }
}
