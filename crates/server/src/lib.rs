//! Catalog agent server
//!
//! HTTP surface over the routing engine: query endpoint, trigger
//! introspection, health probes, and admin catalog reload.

pub mod generator;
pub mod http;
pub mod state;

pub use generator::AnswerGenerator;
pub use http::create_router;
pub use state::AppState;

use thiserror::Error;

/// Server errors
#[derive(Error, Debug)]
pub enum ServerError {
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Catalog reload failed: {0}")]
    Reload(String),

    #[error("Generation error: {0}")]
    Generation(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<ServerError> for axum::http::StatusCode {
    fn from(err: ServerError) -> Self {
        match err {
            ServerError::InvalidRequest(_) => axum::http::StatusCode::BAD_REQUEST,
            ServerError::Reload(_) => axum::http::StatusCode::UNPROCESSABLE_ENTITY,
            ServerError::Generation(_) => axum::http::StatusCode::BAD_GATEWAY,
            ServerError::Internal(_) => axum::http::StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}
