//! The routing engine
//!
//! State machine per request, no state across requests:
//!
//! ```text
//! Start -> normalize -> KeywordCheck -> Triggered            (terminal)
//!                                    -> RetrievalFallback -> Retrieved (terminal)
//!                                                         -> NoAnswer  (terminal)
//! ```
//!
//! The keyword path never suspends; the only await point is the
//! delegated retrieval call, which runs under a timeout so a slow
//! collaborator degrades to `NoAnswer` instead of hanging the request.
//! The engine returns the decision; invoking the external workflow API
//! or answer generation is the caller's business.

use std::sync::Arc;
use std::time::Duration;

use catalog_agent_catalog::{normalize, CatalogService};
use catalog_agent_core::{NoAnswerReason, Retriever, RoutingResult};

/// Engine configuration
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Documents requested from the retrieval collaborator
    pub top_k: usize,
    /// Budget for one retrieval call
    pub retrieval_timeout: Duration,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            top_k: catalog_agent_config::constants::retrieval::DEFAULT_TOP_K,
            retrieval_timeout: Duration::from_millis(
                catalog_agent_config::constants::retrieval::TIMEOUT_MS,
            ),
        }
    }
}

impl From<&catalog_agent_config::RetrievalConfig> for EngineConfig {
    fn from(config: &catalog_agent_config::RetrievalConfig) -> Self {
        Self {
            top_k: config.top_k,
            retrieval_timeout: Duration::from_millis(config.timeout_ms),
        }
    }
}

/// Routing decision engine
///
/// Holds the swappable catalog handle and the retrieval collaborator.
/// For a fixed catalog generation and query string, routing is
/// deterministic.
pub struct RoutingEngine {
    catalog: Arc<CatalogService>,
    retriever: Option<Arc<dyn Retriever>>,
    config: EngineConfig,
}

impl RoutingEngine {
    /// Create an engine without a retrieval collaborator
    ///
    /// Queries that miss the trigger index resolve to `NoAnswer`.
    pub fn new(catalog: Arc<CatalogService>, config: EngineConfig) -> Self {
        Self {
            catalog,
            retriever: None,
            config,
        }
    }

    /// Attach the retrieval collaborator
    pub fn with_retriever(mut self, retriever: Arc<dyn Retriever>) -> Self {
        self.retriever = Some(retriever);
        self
    }

    /// Route one query using the configured limits
    pub async fn route(&self, query: &str) -> RoutingResult {
        self.route_with(query, None, None).await
    }

    /// Route one query with a caller-supplied retrieval timeout
    pub async fn route_with_timeout(&self, query: &str, timeout: Duration) -> RoutingResult {
        self.route_with(query, None, Some(timeout)).await
    }

    /// Route one query, optionally overriding top-k and timeout
    pub async fn route_with(
        &self,
        query: &str,
        top_k: Option<usize>,
        timeout: Option<Duration>,
    ) -> RoutingResult {
        let normalized = normalize(query);
        if normalized.is_empty() {
            return RoutingResult::no_answer(NoAnswerReason::EmptyQuery);
        }

        // The request pins one generation here; a concurrent reload
        // cannot change what this query sees.
        let generation = self.catalog.current();

        if let Some(trigger_id) = generation.index.best_match(&normalized) {
            tracing::debug!(
                generation = generation.sequence,
                trigger_id,
                query = %normalized,
                "Query matched flow trigger"
            );
            return RoutingResult::Triggered {
                trigger_id: trigger_id.to_string(),
            };
        }

        self.retrieval_fallback(
            &normalized,
            top_k.unwrap_or(self.config.top_k),
            timeout.unwrap_or(self.config.retrieval_timeout),
        )
        .await
    }

    async fn retrieval_fallback(&self, query: &str, top_k: usize, timeout: Duration) -> RoutingResult {
        let Some(retriever) = &self.retriever else {
            tracing::debug!(query, "No retriever configured, resolving to no answer");
            return RoutingResult::no_answer(NoAnswerReason::RetrievalFailed);
        };

        match tokio::time::timeout(timeout, retriever.query(query, top_k)).await {
            Err(_) => {
                tracing::warn!(
                    retriever = retriever.name(),
                    timeout_ms = timeout.as_millis() as u64,
                    query,
                    "Retrieval timed out"
                );
                RoutingResult::no_answer(NoAnswerReason::RetrievalFailed)
            }
            Ok(Err(e)) => {
                tracing::warn!(
                    retriever = retriever.name(),
                    error = %e,
                    query,
                    "Retrieval failed"
                );
                RoutingResult::no_answer(NoAnswerReason::RetrievalFailed)
            }
            Ok(Ok(documents)) if documents.is_empty() => {
                RoutingResult::no_answer(NoAnswerReason::NoMatch)
            }
            Ok(Ok(documents)) => RoutingResult::Retrieved { documents },
        }
    }
}
