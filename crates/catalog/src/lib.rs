//! Catalog loading, trigger indexing, and generation lifecycle
//!
//! One hierarchical catalog definition feeds two derived structures:
//! a flat document corpus for retrieval and a keyword index for flow
//! triggering. Both live inside an immutable `CatalogGeneration` that
//! is built fully, then published by swapping a single reference.

pub mod generation;
pub mod index;
pub mod node;
pub mod normalize;
pub mod walker;

pub use generation::{CatalogGeneration, CatalogService};
pub use index::TriggerIndex;
pub use node::{CatalogNode, KeywordSet, LocalizedText};
pub use normalize::normalize;
pub use walker::{walk, TriggerRecord, WalkOutput};

use thiserror::Error;

/// Errors that make a catalog load unusable
///
/// Fatal to the generation being built, never to one already serving.
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("Failed to read catalog file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse catalog: {0}")]
    Parse(String),

    #[error("Unsupported catalog format: {0} (expected .yaml, .yml, or .json)")]
    UnsupportedFormat(String),

    #[error("Cycle detected in catalog: node {node_id} visited twice")]
    Cycle { node_id: String },
}

impl From<LoadError> for catalog_agent_core::Error {
    fn from(err: LoadError) -> Self {
        catalog_agent_core::Error::Catalog(err.to_string())
    }
}

/// Non-fatal problems found while walking a catalog
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationWarning {
    /// Trigger declared without any keywords; it can never be matched
    TriggerWithoutKeywords { trigger_id: String, node_id: String },
}

impl std::fmt::Display for ValidationWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::TriggerWithoutKeywords {
                trigger_id,
                node_id,
            } => write!(
                f,
                "trigger '{}' on node '{}' has no keywords and is unreachable",
                trigger_id, node_id
            ),
        }
    }
}
