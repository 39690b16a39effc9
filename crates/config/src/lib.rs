//! Configuration management for the catalog agent
//!
//! Supports loading configuration from:
//! - YAML files (config/default.yaml, config/{env}.yaml)
//! - Environment variables (CATALOG_AGENT_ prefix)
//!
//! The catalog definition itself is not configuration; it is loaded
//! separately by the catalog crate from `catalog.path`.

pub mod constants;
pub mod settings;

pub use settings::{
    load_settings, CatalogConfig, GenerationConfig, ObservabilityConfig, RetrievalConfig,
    RuntimeEnvironment, ServerConfig, Settings,
};

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Configuration file not found: {0}")]
    FileNotFound(String),

    #[error("Failed to parse configuration: {0}")]
    ParseError(String),

    #[error("Invalid value for {field}: {message}")]
    InvalidValue { field: String, message: String },
}

impl From<config::ConfigError> for ConfigError {
    fn from(err: config::ConfigError) -> Self {
        ConfigError::ParseError(err.to_string())
    }
}
