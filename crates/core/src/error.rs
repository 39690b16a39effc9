//! Error types shared across crates
//!
//! Each crate defines its own detailed error enum and converts into
//! this aggregate at the boundary.

use thiserror::Error;

/// Top-level error type
#[derive(Error, Debug)]
pub enum Error {
    #[error("Catalog error: {0}")]
    Catalog(String),

    #[error("Retrieval error: {0}")]
    Retrieval(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Server error: {0}")]
    Server(String),
}

/// Result alias using the top-level error
pub type Result<T> = std::result::Result<T, Error>;
