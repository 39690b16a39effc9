//! Routing decision engine
//!
//! Per-request pipeline: normalize the query, consult the trigger
//! index, fall back to semantic retrieval. Every request resolves to
//! exactly one `RoutingResult` variant; nothing here returns an error
//! to the caller.

pub mod engine;

pub use engine::{EngineConfig, RoutingEngine};
