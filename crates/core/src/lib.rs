//! Core traits and types for the catalog agent
//!
//! This crate provides foundational types used across all other crates:
//! - Language variant and script definitions (English, Bengali, Banglish)
//! - Document types extracted from the service catalog
//! - Routing results (triggered flow / retrieved passages / no answer)
//! - The `Retriever` trait boundary for the retrieval collaborator
//! - Error types

pub mod document;
pub mod error;
pub mod language;
pub mod routing;
pub mod traits;

pub use document::{Document, DocumentLabel, ScoredDocument};
pub use error::{Error, Result};
pub use language::{LanguageVariant, Script};
pub use routing::{NoAnswerReason, RoutingResult};
pub use traits::Retriever;
