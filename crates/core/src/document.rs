//! Retrievable documents extracted from the catalog
//!
//! Every non-empty localized string in the catalog tree becomes one
//! `Document`, tagged with the node it came from so answers can cite
//! their source. Documents are immutable for the lifetime of one
//! catalog generation.

use serde::{Deserialize, Serialize};

use crate::language::LanguageVariant;

/// One unit of retrievable catalog text
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    /// Identifier of the catalog node this text came from
    pub node_id: String,
    /// The text itself
    pub content: String,
    /// What kind of field the text was extracted from
    pub label: DocumentLabel,
    /// Language variant of the text
    pub variant: LanguageVariant,
}

impl Document {
    /// Create a new document
    pub fn new(
        node_id: impl Into<String>,
        content: impl Into<String>,
        label: DocumentLabel,
        variant: LanguageVariant,
    ) -> Self {
        Self {
            node_id: node_id.into(),
            content: content.into(),
            label,
            variant,
        }
    }

    /// Stable identifier for indexing: node id + label + variant
    ///
    /// A node contributes at most one string per (label, variant) pair,
    /// so this is unique within a generation.
    pub fn doc_id(&self) -> String {
        format!("{}:{}:{}", self.node_id, self.label.as_str(), self.variant.code())
    }
}

/// Origin of an extracted document within its node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentLabel {
    /// Body text of a message node
    Message,
    /// Title of a menu or carousel
    Title,
    /// Label of a selectable option
    OptionLabel,
    /// Title of a carousel card
    CardTitle,
    /// Body text of a carousel card
    CardBody,
}

impl DocumentLabel {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Message => "message",
            Self::Title => "title",
            Self::OptionLabel => "option_label",
            Self::CardTitle => "card_title",
            Self::CardBody => "card_body",
        }
    }

    /// Parse the string form produced by `as_str`
    pub fn from_str_loose(s: &str) -> Option<Self> {
        match s {
            "message" => Some(Self::Message),
            "title" => Some(Self::Title),
            "option_label" => Some(Self::OptionLabel),
            "card_title" => Some(Self::CardTitle),
            "card_body" => Some(Self::CardBody),
            _ => None,
        }
    }
}

/// A document paired with its retrieval relevance score
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredDocument {
    pub document: Document,
    /// Relevance score, higher is better
    pub score: f32,
}

impl ScoredDocument {
    pub fn new(document: Document, score: f32) -> Self {
        Self { document, score }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_doc_id_is_stable() {
        let doc = Document::new(
            "internet_menu",
            "Internet packages",
            DocumentLabel::Title,
            LanguageVariant::English,
        );
        assert_eq!(doc.doc_id(), "internet_menu:title:en");
    }

    #[test]
    fn test_label_as_str() {
        assert_eq!(DocumentLabel::OptionLabel.as_str(), "option_label");
        assert_eq!(DocumentLabel::CardTitle.as_str(), "card_title");
    }
}
