//! Application state
//!
//! Shared state across all handlers. The catalog service owns the
//! swappable generation; reload goes through here so the retrieval
//! corpus is re-indexed alongside the trigger index.

use std::sync::Arc;

use parking_lot::RwLock;

use catalog_agent_catalog::CatalogService;
use catalog_agent_config::Settings;
use catalog_agent_core::Retriever;
use catalog_agent_engine::{EngineConfig, RoutingEngine};

use crate::generator::AnswerGenerator;
use crate::ServerError;

/// Application state
#[derive(Clone)]
pub struct AppState {
    /// Configuration, shared for introspection by handlers
    pub config: Arc<RwLock<Settings>>,
    /// Catalog generations
    pub catalog: Arc<CatalogService>,
    /// Routing engine
    pub engine: Arc<RoutingEngine>,
    /// Retrieval collaborator, kept for corpus re-indexing on reload
    pub retriever: Option<Arc<dyn Retriever>>,
    /// Optional downstream answer generation
    pub generator: Option<Arc<AnswerGenerator>>,
}

impl AppState {
    /// Create state without a retrieval collaborator
    pub fn new(config: Settings, catalog: Arc<CatalogService>) -> Self {
        let engine_config = EngineConfig::from(&config.retrieval);
        Self {
            config: Arc::new(RwLock::new(config)),
            engine: Arc::new(RoutingEngine::new(catalog.clone(), engine_config)),
            catalog,
            retriever: None,
            generator: None,
        }
    }

    /// Attach the retrieval collaborator, rebuilding the engine
    pub fn with_retriever(mut self, retriever: Arc<dyn Retriever>) -> Self {
        let engine_config = EngineConfig::from(&self.config.read().retrieval);
        self.engine = Arc::new(
            RoutingEngine::new(self.catalog.clone(), engine_config)
                .with_retriever(retriever.clone()),
        );
        self.retriever = Some(retriever);
        self
    }

    /// Attach the answer generator
    pub fn with_generator(mut self, generator: Arc<AnswerGenerator>) -> Self {
        self.generator = Some(generator);
        self
    }

    /// Reload the catalog and re-index the retrieval corpus
    ///
    /// A failed reload leaves the serving generation untouched. A
    /// failed re-index keeps the new generation serving (triggers are
    /// current; retrieval answers from the stale corpus until the next
    /// successful index).
    pub async fn reload_catalog(&self) -> Result<u64, ServerError> {
        let generation = self
            .catalog
            .reload()
            .map_err(|e| ServerError::Reload(e.to_string()))?;

        if let Some(retriever) = &self.retriever {
            if let Err(e) = retriever.index(&generation.documents).await {
                tracing::error!(
                    generation = generation.sequence,
                    error = %e,
                    "Corpus re-index failed after reload, retrieval serves stale documents"
                );
            }
        }

        tracing::info!(generation = generation.sequence, "Catalog reloaded");
        Ok(generation.sequence)
    }
}
