//! Catalog agent server entry point

use std::net::SocketAddr;
use std::sync::Arc;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, Layer};

use catalog_agent_catalog::CatalogService;
use catalog_agent_config::{load_settings, Settings};
use catalog_agent_core::Retriever;
use catalog_agent_rag::VectorRetriever;
use catalog_agent_server::{create_router, AnswerGenerator, AppState};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Priority: env vars > config/{env}.yaml > config/default.yaml > defaults
    let env = std::env::var("CATALOG_AGENT_ENV").ok();
    let config = match load_settings(env.as_deref()) {
        Ok(settings) => {
            // Tracing not yet initialized, use eprintln for early logging
            eprintln!(
                "Loaded configuration from files (env: {})",
                env.as_deref().unwrap_or("default")
            );
            settings
        }
        Err(e) => {
            eprintln!("Warning: Failed to load config: {}. Using defaults.", e);
            Settings::default()
        }
    };

    init_tracing(&config);

    tracing::info!("Starting catalog agent v{}", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        environment = ?config.environment,
        catalog_path = %config.catalog.path,
        "Configuration loaded"
    );

    // Initial catalog load is fatal on failure: there is no previous
    // generation to keep serving.
    let catalog = match CatalogService::load(&config.catalog.path) {
        Ok(service) => Arc::new(service),
        Err(e) => {
            tracing::error!(
                path = %config.catalog.path,
                error = %e,
                "Failed to load catalog. Fix the catalog file and restart."
            );
            std::process::exit(1);
        }
    };

    let mut state = AppState::new(config.clone(), catalog.clone());

    // Optionally initialize the retrieval collaborator and index the corpus
    if config.retrieval.enabled {
        tracing::info!("Initializing retrieval collaborator...");
        match init_retriever(&config, &catalog).await {
            Ok(retriever) => {
                tracing::info!(
                    endpoint = %config.retrieval.qdrant_endpoint,
                    collection = %config.retrieval.qdrant_collection,
                    "Retrieval collaborator initialized"
                );
                state = state.with_retriever(retriever);
            }
            Err(e) => {
                tracing::warn!(
                    "Failed to initialize retrieval: {}. \
                     Queries without a trigger match will get no answer.",
                    e
                );
            }
        }
    } else {
        tracing::info!("Retrieval disabled, serving trigger matches only");
    }

    // Optionally initialize downstream answer generation
    if config.generation.enabled {
        match AnswerGenerator::new(config.generation.clone()) {
            Ok(generator) => {
                tracing::info!(
                    endpoint = %config.generation.endpoint,
                    model = %config.generation.model,
                    "Answer generation enabled"
                );
                state = state.with_generator(Arc::new(generator));
            }
            Err(e) => {
                tracing::warn!("Failed to initialize answer generation: {}", e);
            }
        }
    }

    let app = create_router(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.server.port));
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server shutdown complete");
    Ok(())
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM)
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C, initiating graceful shutdown...");
        }
        _ = terminate => {
            tracing::info!("Received SIGTERM, initiating graceful shutdown...");
        }
    }
}

/// Initialize tracing with env-filter and optional JSON output
fn init_tracing(config: &Settings) {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        let level = &config.observability.log_level;
        format!("catalog_agent={},tower_http=debug", level).into()
    });

    let subscriber = tracing_subscriber::registry().with(env_filter);
    let fmt_layer = if config.observability.log_json {
        tracing_subscriber::fmt::layer().json().boxed()
    } else {
        tracing_subscriber::fmt::layer().boxed()
    };
    subscriber.with(fmt_layer).init();
}

/// Build the retriever and index the current generation's corpus
async fn init_retriever(
    config: &Settings,
    catalog: &Arc<CatalogService>,
) -> Result<Arc<dyn Retriever>, Box<dyn std::error::Error>> {
    let retriever = VectorRetriever::from_config(&config.retrieval)?;
    let retriever: Arc<dyn Retriever> = Arc::new(retriever);

    let generation = catalog.current();
    retriever.index(&generation.documents).await?;
    tracing::info!(
        generation = generation.sequence,
        documents = generation.documents.len(),
        "Catalog corpus indexed"
    );

    Ok(retriever)
}
