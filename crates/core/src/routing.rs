//! Routing results
//!
//! The outcome of routing one query. Exactly one of three terminal
//! variants; request-time failures never surface as errors, they fold
//! into `NoAnswer`.

use serde::{Deserialize, Serialize};

use crate::document::ScoredDocument;

/// Tagged outcome of one query's routing decision
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum RoutingResult {
    /// The query matched a flow trigger; the caller should invoke the
    /// external workflow API with this identifier.
    Triggered { trigger_id: String },
    /// No trigger matched; these passages are the context for downstream
    /// answer generation.
    Retrieved { documents: Vec<ScoredDocument> },
    /// No relevant content was found. Never fabricated content.
    NoAnswer { reason: NoAnswerReason },
}

impl RoutingResult {
    pub fn no_answer(reason: NoAnswerReason) -> Self {
        Self::NoAnswer { reason }
    }

    pub fn is_triggered(&self) -> bool {
        matches!(self, Self::Triggered { .. })
    }

    /// Trigger id if this result is `Triggered`
    pub fn trigger_id(&self) -> Option<&str> {
        match self {
            Self::Triggered { trigger_id } => Some(trigger_id),
            _ => None,
        }
    }
}

/// Why a query resolved to `NoAnswer`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NoAnswerReason {
    /// Query was empty or whitespace-only
    EmptyQuery,
    /// Retrieval ran but returned nothing relevant
    NoMatch,
    /// Retrieval collaborator failed, timed out, or is not configured
    RetrievalFailed,
}
