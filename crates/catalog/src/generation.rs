//! Catalog generations and the swappable service handle
//!
//! A generation is one immutable snapshot of everything derived from a
//! catalog load: document corpus, trigger records, trigger index. The
//! service owns the single swappable reference; a reload builds the
//! next generation completely off to the side, then swaps the `Arc`
//! under a short write lock. In-flight requests keep the `Arc` they
//! cloned and never observe a half-built index. A failed reload leaves
//! the serving generation untouched.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use parking_lot::RwLock;

use catalog_agent_core::Document;

use crate::index::TriggerIndex;
use crate::node::CatalogNode;
use crate::walker::{walk, TriggerRecord};
use crate::{LoadError, ValidationWarning};

/// One immutable, fully-built catalog snapshot
#[derive(Debug)]
pub struct CatalogGeneration {
    /// Monotonic generation number, starts at 1
    pub sequence: u64,
    /// Flat document corpus for the retrieval collaborator
    pub documents: Vec<Document>,
    /// Flow triggers with their keyword sets
    pub triggers: Vec<TriggerRecord>,
    /// Keyword lookup structure
    pub index: TriggerIndex,
}

impl CatalogGeneration {
    /// Build a generation from an already-parsed catalog root
    pub fn from_root(
        root: &CatalogNode,
        sequence: u64,
    ) -> Result<(Self, Vec<ValidationWarning>), LoadError> {
        let output = walk(root)?;
        let index = TriggerIndex::build(&output.triggers);

        Ok((
            Self {
                sequence,
                documents: output.documents,
                triggers: output.triggers,
                index,
            },
            output.warnings,
        ))
    }

    /// Load and build a generation from a catalog file
    ///
    /// Format is dispatched on extension: `.yaml`/`.yml` or `.json`.
    pub fn load(
        path: &Path,
        sequence: u64,
    ) -> Result<(Self, Vec<ValidationWarning>), LoadError> {
        let content = std::fs::read_to_string(path).map_err(|e| LoadError::Io {
            path: path.display().to_string(),
            source: e,
        })?;

        let extension = path.extension().and_then(|e| e.to_str()).unwrap_or("");
        let root: CatalogNode = match extension {
            "yaml" | "yml" => serde_yaml::from_str(&content)
                .map_err(|e| LoadError::Parse(e.to_string()))?,
            "json" => serde_json::from_str(&content)
                .map_err(|e| LoadError::Parse(e.to_string()))?,
            other => return Err(LoadError::UnsupportedFormat(other.to_string())),
        };

        Self::from_root(&root, sequence)
    }
}

/// Owner of the current catalog generation
///
/// Cheap to share (`Arc<CatalogService>`); readers take a clone of the
/// generation `Arc` once per request and finish against that snapshot.
pub struct CatalogService {
    path: PathBuf,
    current: RwLock<Arc<CatalogGeneration>>,
}

impl CatalogService {
    /// Load the initial generation from `path`
    ///
    /// There is no previous generation to fall back to, so an initial
    /// load failure is fatal to the caller.
    pub fn load(path: impl Into<PathBuf>) -> Result<Self, LoadError> {
        let path = path.into();
        let (generation, warnings) = CatalogGeneration::load(&path, 1)?;
        log_generation(&generation, &warnings);

        Ok(Self {
            path,
            current: RwLock::new(Arc::new(generation)),
        })
    }

    /// The generation currently serving traffic
    pub fn current(&self) -> Arc<CatalogGeneration> {
        self.current.read().clone()
    }

    /// Path the catalog is loaded from
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Rebuild from the catalog file and swap the serving generation
    ///
    /// On any error the serving generation is unchanged and keeps
    /// answering queries exactly as before.
    pub fn reload(&self) -> Result<Arc<CatalogGeneration>, LoadError> {
        let next_sequence = self.current().sequence + 1;
        let (generation, warnings) = CatalogGeneration::load(&self.path, next_sequence)?;
        log_generation(&generation, &warnings);

        let generation = Arc::new(generation);
        *self.current.write() = generation.clone();
        Ok(generation)
    }
}

fn log_generation(generation: &CatalogGeneration, warnings: &[ValidationWarning]) {
    for warning in warnings {
        tracing::warn!(generation = generation.sequence, "Catalog validation: {}", warning);
    }
    tracing::info!(
        generation = generation.sequence,
        documents = generation.documents.len(),
        triggers = generation.triggers.len(),
        keywords = generation.index.keyword_count(),
        "Catalog generation built"
    );
}
