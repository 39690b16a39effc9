//! Main settings module

use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::constants::{endpoints, generation, retrieval};
use crate::ConfigError;

/// Runtime environment enum
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum RuntimeEnvironment {
    /// Development mode - relaxed validation, warnings only
    #[default]
    Development,
    /// Staging mode - stricter validation
    Staging,
    /// Production mode - all validations enforced
    Production,
}

impl RuntimeEnvironment {
    /// Check if this is a production environment
    pub fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }
}

/// Main application settings
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Settings {
    /// Runtime environment (development, staging, production)
    #[serde(default)]
    pub environment: RuntimeEnvironment,

    /// Server configuration
    #[serde(default)]
    pub server: ServerConfig,

    /// Catalog source configuration
    #[serde(default)]
    pub catalog: CatalogConfig,

    /// Retrieval collaborator configuration
    #[serde(default)]
    pub retrieval: RetrievalConfig,

    /// Downstream answer generation configuration
    #[serde(default)]
    pub generation: GenerationConfig,

    /// Observability configuration
    #[serde(default)]
    pub observability: ObservabilityConfig,
}

/// HTTP server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Port to listen on
    #[serde(default = "default_port")]
    pub port: u16,
    /// Enable CORS origin checks
    #[serde(default = "default_true")]
    pub cors_enabled: bool,
    /// Allowed CORS origins
    #[serde(default)]
    pub cors_origins: Vec<String>,
}

fn default_port() -> u16 {
    8080
}

fn default_true() -> bool {
    true
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: default_port(),
            cors_enabled: true,
            cors_origins: Vec::new(),
        }
    }
}

/// Catalog source configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogConfig {
    /// Path to the catalog definition file (YAML or JSON)
    #[serde(default = "default_catalog_path")]
    pub path: String,
}

fn default_catalog_path() -> String {
    "config/catalog.yaml".to_string()
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            path: default_catalog_path(),
        }
    }
}

/// Retrieval collaborator configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetrievalConfig {
    /// Enable semantic retrieval fallback (false = trigger matching only)
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// Qdrant endpoint
    #[serde(default = "default_qdrant_endpoint")]
    pub qdrant_endpoint: String,
    /// Qdrant collection name
    #[serde(default = "default_qdrant_collection")]
    pub qdrant_collection: String,
    /// Qdrant API key (optional)
    #[serde(default)]
    pub qdrant_api_key: Option<String>,
    /// Embedding vector dimension
    #[serde(default = "default_vector_dim")]
    pub vector_dim: usize,
    /// Embedding API endpoint; when unset a deterministic hash embedder
    /// is used (tests, offline development)
    #[serde(default)]
    pub embedding_endpoint: Option<String>,
    /// Embedding model name
    #[serde(default = "default_embedding_model")]
    pub embedding_model: String,
    /// Documents returned per query
    #[serde(default = "default_top_k")]
    pub top_k: usize,
    /// Minimum similarity score for a document to count as relevant
    #[serde(default = "default_min_score")]
    pub min_score: f32,
    /// Retrieval round-trip budget in milliseconds
    #[serde(default = "default_retrieval_timeout_ms")]
    pub timeout_ms: u64,
}

fn default_qdrant_endpoint() -> String {
    endpoints::QDRANT_DEFAULT.to_string()
}

fn default_qdrant_collection() -> String {
    "catalog_documents".to_string()
}

fn default_vector_dim() -> usize {
    retrieval::VECTOR_DIM
}

fn default_embedding_model() -> String {
    retrieval::EMBEDDING_MODEL.to_string()
}

fn default_top_k() -> usize {
    retrieval::DEFAULT_TOP_K
}

fn default_min_score() -> f32 {
    retrieval::MIN_SCORE
}

fn default_retrieval_timeout_ms() -> u64 {
    retrieval::TIMEOUT_MS
}

impl Default for RetrievalConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            qdrant_endpoint: default_qdrant_endpoint(),
            qdrant_collection: default_qdrant_collection(),
            qdrant_api_key: None,
            vector_dim: default_vector_dim(),
            embedding_endpoint: None,
            embedding_model: default_embedding_model(),
            top_k: default_top_k(),
            min_score: default_min_score(),
            timeout_ms: default_retrieval_timeout_ms(),
        }
    }
}

/// Downstream answer generation configuration
///
/// Disabled by default; when disabled the server returns retrieved
/// passages without prose.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationConfig {
    /// Enable answer generation from retrieved passages
    #[serde(default)]
    pub enabled: bool,
    /// Generation API endpoint (Ollama-compatible)
    #[serde(default = "default_generation_endpoint")]
    pub endpoint: String,
    /// Generation model name
    #[serde(default = "default_generation_model")]
    pub model: String,
    /// Generation round-trip budget in milliseconds
    #[serde(default = "default_generation_timeout_ms")]
    pub timeout_ms: u64,
}

fn default_generation_endpoint() -> String {
    endpoints::GENERATION_DEFAULT.to_string()
}

fn default_generation_model() -> String {
    generation::MODEL.to_string()
}

fn default_generation_timeout_ms() -> u64 {
    generation::TIMEOUT_MS
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            endpoint: default_generation_endpoint(),
            model: default_generation_model(),
            timeout_ms: default_generation_timeout_ms(),
        }
    }
}

/// Observability configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ObservabilityConfig {
    /// Log level filter (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub log_level: String,
    /// Emit logs as JSON
    #[serde(default)]
    pub log_json: bool,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            log_json: false,
        }
    }
}

impl Settings {
    /// Create default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate settings
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.validate_catalog()?;
        self.validate_retrieval()?;
        Ok(())
    }

    fn validate_catalog(&self) -> Result<(), ConfigError> {
        if self.catalog.path.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "catalog.path".to_string(),
                message: "catalog path must not be empty".to_string(),
            });
        }
        Ok(())
    }

    fn validate_retrieval(&self) -> Result<(), ConfigError> {
        if self.retrieval.top_k == 0 {
            return Err(ConfigError::InvalidValue {
                field: "retrieval.top_k".to_string(),
                message: "top_k must be at least 1".to_string(),
            });
        }
        if self.retrieval.vector_dim == 0 {
            return Err(ConfigError::InvalidValue {
                field: "retrieval.vector_dim".to_string(),
                message: "vector_dim must be at least 1".to_string(),
            });
        }
        if !(0.0..=1.0).contains(&self.retrieval.min_score) {
            return Err(ConfigError::InvalidValue {
                field: "retrieval.min_score".to_string(),
                message: "min_score must be between 0.0 and 1.0".to_string(),
            });
        }
        if self.retrieval.timeout_ms == 0 {
            return Err(ConfigError::InvalidValue {
                field: "retrieval.timeout_ms".to_string(),
                message: "timeout_ms must be at least 1".to_string(),
            });
        }
        Ok(())
    }
}

/// Load settings from files and environment
///
/// Priority: env vars > config/{env}.yaml > config/default.yaml > defaults.
pub fn load_settings(env: Option<&str>) -> Result<Settings, ConfigError> {
    let mut builder = Config::builder();

    if Path::new("config/default.yaml").exists() {
        builder = builder.add_source(File::with_name("config/default"));
    }

    if let Some(env_name) = env {
        let env_file = format!("config/{}", env_name);
        if Path::new(&format!("{}.yaml", env_file)).exists() {
            builder = builder.add_source(File::with_name(&env_file));
        } else {
            tracing::warn!(env = env_name, "No config file for environment, skipping");
        }
    }

    builder = builder.add_source(
        Environment::with_prefix("CATALOG_AGENT")
            .separator("__")
            .try_parsing(true),
    );

    let settings: Settings = builder.build()?.try_deserialize()?;
    settings.validate()?;

    Ok(settings)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_settings_are_valid() {
        let settings = Settings::default();
        assert!(settings.validate().is_ok());
        assert_eq!(settings.server.port, 8080);
        assert_eq!(settings.retrieval.top_k, 5);
        assert!(!settings.generation.enabled);
    }

    #[test]
    fn test_validate_rejects_zero_top_k() {
        let mut settings = Settings::default();
        settings.retrieval.top_k = 0;
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_out_of_range_min_score() {
        let mut settings = Settings::default();
        settings.retrieval.min_score = 1.5;
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_empty_catalog_path() {
        let mut settings = Settings::default();
        settings.catalog.path = "  ".to_string();
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_settings_deserialization() {
        let yaml = r#"
environment: production
server:
  port: 9000
  cors_origins:
    - "https://app.example.com"
catalog:
  path: data/catalog.yaml
retrieval:
  top_k: 3
  min_score: 0.4
"#;
        let settings: Settings = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(settings.environment, RuntimeEnvironment::Production);
        assert_eq!(settings.server.port, 9000);
        assert_eq!(settings.catalog.path, "data/catalog.yaml");
        assert_eq!(settings.retrieval.top_k, 3);
        assert!(settings.validate().is_ok());
    }
}
