//! Trait boundary for the retrieval collaborator
//!
//! Embedding and nearest-neighbor search are opaque to the routing
//! engine; it only sees this interface.

use async_trait::async_trait;

use crate::document::{Document, ScoredDocument};
use crate::Result;

/// Retrieval collaborator interface
///
/// Implementations:
/// - `VectorRetriever` (rag crate) - embeddings + Qdrant dense search
///
/// # Example
///
/// ```ignore
/// let retriever: Arc<dyn Retriever> = Arc::new(VectorRetriever::new(config).await?);
/// retriever.index(&generation.documents).await?;
/// let hits = retriever.query("internet pack price", 5).await?;
/// ```
#[async_trait]
pub trait Retriever: Send + Sync + 'static {
    /// Index a document corpus, replacing any previous corpus
    ///
    /// Called once per catalog generation, at startup and after reload.
    async fn index(&self, documents: &[Document]) -> Result<()>;

    /// Retrieve the top-k documents most relevant to `text`
    ///
    /// Returns documents sorted by relevance (highest first). An empty
    /// result is a valid outcome, not an error.
    async fn query(&self, text: &str, top_k: usize) -> Result<Vec<ScoredDocument>>;

    /// Get retriever name for logging
    fn name(&self) -> &str;
}
