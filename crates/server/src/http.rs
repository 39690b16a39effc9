//! HTTP endpoints
//!
//! REST API over the routing engine.

use axum::{
    extract::{Json, State},
    http::{HeaderValue, Method, StatusCode},
    routing::{get, post},
    Router,
};
use serde::{Deserialize, Serialize};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use catalog_agent_core::RoutingResult;

use crate::state::AppState;

/// Create the application router
pub fn create_router(state: AppState) -> Router {
    let config = state.config.read();
    let cors_layer = build_cors_layer(&config.server.cors_origins, config.server.cors_enabled);
    drop(config);

    Router::new()
        // Routing endpoint
        .route("/api/query", post(query))
        // Introspection
        .route("/api/triggers", get(list_triggers))
        // Health checks
        .route("/health", get(health_check))
        .route("/ready", get(readiness_check))
        // Admin endpoints
        .route("/admin/reload-catalog", post(reload_catalog))
        // Middleware
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer)
        .with_state(state)
}

/// Build CORS layer from configured origins
///
/// - If cors_enabled is false, returns permissive layer (for dev)
/// - If cors_origins is empty, defaults to localhost:3000 for safety
/// - Otherwise, uses the configured origins
fn build_cors_layer(origins: &[String], enabled: bool) -> CorsLayer {
    if !enabled {
        tracing::warn!("CORS is disabled - allowing all origins (NOT FOR PRODUCTION)");
        return CorsLayer::permissive();
    }

    let parsed_origins: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| {
            origin.parse::<HeaderValue>().ok().or_else(|| {
                tracing::warn!("Invalid CORS origin: {}", origin);
                None
            })
        })
        .collect();

    if parsed_origins.is_empty() {
        tracing::info!("No valid CORS origins configured, defaulting to localhost:3000");
        return CorsLayer::new()
            .allow_origin("http://localhost:3000".parse::<HeaderValue>().unwrap())
            .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
            .allow_headers(Any);
    }

    tracing::info!("CORS configured with {} origins", parsed_origins.len());
    CorsLayer::new()
        .allow_origin(parsed_origins)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers(Any)
}

/// Query request body
#[derive(Debug, Deserialize)]
struct QueryRequest {
    /// User message in any supported language variant
    text: String,
    /// Override for the number of retrieved documents
    #[serde(default)]
    top_k: Option<usize>,
}

/// Query response: the routing result, plus a generated answer when
/// the result is `Retrieved` and generation is enabled
#[derive(Debug, Serialize)]
struct QueryResponse {
    #[serde(flatten)]
    result: RoutingResult,
    #[serde(skip_serializing_if = "Option::is_none")]
    answer: Option<String>,
}

/// Route one query
async fn query(
    State(state): State<AppState>,
    Json(request): Json<QueryRequest>,
) -> Json<QueryResponse> {
    let result = state
        .engine
        .route_with(&request.text, request.top_k, None)
        .await;

    let answer = match (&result, &state.generator) {
        (RoutingResult::Retrieved { documents }, Some(generator)) => {
            match generator.generate(&request.text, documents).await {
                Ok(answer) => Some(answer),
                Err(e) => {
                    // Degrade to raw passages; never fabricate an answer
                    tracing::warn!(error = %e, "Answer generation failed");
                    None
                }
            }
        }
        _ => None,
    };

    Json(QueryResponse { result, answer })
}

/// List flow triggers in the serving generation
async fn list_triggers(State(state): State<AppState>) -> Json<serde_json::Value> {
    let generation = state.catalog.current();

    let triggers: Vec<serde_json::Value> = generation
        .triggers
        .iter()
        .map(|record| {
            serde_json::json!({
                "trigger_id": record.trigger_id,
                "node_id": record.node_id,
                "keywords": record.keywords,
            })
        })
        .collect();

    Json(serde_json::json!({
        "generation": generation.sequence,
        "triggers": triggers,
    }))
}

/// Liveness probe
async fn health_check() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "ok" }))
}

/// Readiness probe with generation info
async fn readiness_check(State(state): State<AppState>) -> Json<serde_json::Value> {
    let generation = state.catalog.current();
    Json(serde_json::json!({
        "ready": true,
        "generation": generation.sequence,
        "documents": generation.documents.len(),
        "triggers": generation.triggers.len(),
        "retrieval_enabled": state.retriever.is_some(),
    }))
}

/// Rebuild the catalog generation from disk
async fn reload_catalog(
    State(state): State<AppState>,
) -> Result<Json<serde_json::Value>, (StatusCode, String)> {
    match state.reload_catalog().await {
        Ok(sequence) => Ok(Json(serde_json::json!({
            "reloaded": true,
            "generation": sequence,
        }))),
        Err(e) => {
            tracing::error!(error = %e, "Catalog reload rejected");
            Err((StatusCode::from(e), "catalog reload failed".to_string()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use catalog_agent_catalog::CatalogService;
    use catalog_agent_config::Settings;

    const CATALOG_YAML: &str = r#"
kind: menu
id: root
title:
  en: "Main menu"
children:
  - kind: option
    id: balance_opt
    label:
      en: "Check balance"
    keywords:
      en: ["balance"]
      banglish: ["balance dekho"]
    trigger: flow_balance
"#;

    fn test_state() -> (AppState, tempfile::TempDir) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("catalog.yaml");
        std::fs::write(&path, CATALOG_YAML).unwrap();
        let catalog = Arc::new(CatalogService::load(&path).unwrap());
        (AppState::new(Settings::default(), catalog), dir)
    }

    #[tokio::test]
    async fn test_query_endpoint_triggers() {
        let (state, _dir) = test_state();

        let response = query(
            State(state),
            Json(QueryRequest {
                text: "balance dekho".to_string(),
                top_k: None,
            }),
        )
        .await;

        assert_eq!(response.0.result.trigger_id(), Some("flow_balance"));
        assert!(response.0.answer.is_none());
    }

    #[tokio::test]
    async fn test_readiness_reports_generation() {
        let (state, _dir) = test_state();

        let response = readiness_check(State(state)).await;
        assert_eq!(response.0["ready"], true);
        assert_eq!(response.0["generation"], 1);
        assert_eq!(response.0["triggers"], 1);
    }

    #[tokio::test]
    async fn test_list_triggers() {
        let (state, _dir) = test_state();

        let response = list_triggers(State(state)).await;
        let triggers = response.0["triggers"].as_array().unwrap();
        assert_eq!(triggers.len(), 1);
        assert_eq!(triggers[0]["trigger_id"], "flow_balance");
    }

    #[tokio::test]
    async fn test_reload_catalog_endpoint() {
        let (state, _dir) = test_state();

        let response = reload_catalog(State(state)).await.unwrap();
        assert_eq!(response.0["reloaded"], true);
        assert_eq!(response.0["generation"], 2);
    }
}
