//! Centralized constants
//!
//! Defaults referenced from settings and from crates that construct
//! their own configs, so the numbers stay in one place.

/// Default external service endpoints
pub mod endpoints {
    /// Qdrant gRPC endpoint
    pub const QDRANT_DEFAULT: &str = "http://localhost:6334";
    /// Embedding API endpoint (Ollama-compatible)
    pub const EMBEDDING_DEFAULT: &str = "http://localhost:11434";
    /// Text generation API endpoint (Ollama-compatible)
    pub const GENERATION_DEFAULT: &str = "http://localhost:11434";
}

/// Retrieval defaults
pub mod retrieval {
    /// Documents returned to the caller per query
    pub const DEFAULT_TOP_K: usize = 5;
    /// Minimum similarity score for a document to count as relevant
    pub const MIN_SCORE: f32 = 0.25;
    /// Embedding dimension of the default model
    pub const VECTOR_DIM: usize = 1024;
    /// Budget for one retrieval round trip
    pub const TIMEOUT_MS: u64 = 2_000;
    /// Default embedding model name
    pub const EMBEDDING_MODEL: &str = "qwen3-embedding:0.6b";
}

/// Answer generation defaults
pub mod generation {
    /// Default generation model name
    pub const MODEL: &str = "qwen2.5:3b";
    /// Budget for one generation round trip
    pub const TIMEOUT_MS: u64 = 10_000;
}
