//! Catalog node model
//!
//! The source catalog is one hierarchical document. Each node kind is a
//! closed variant with explicit optional fields; anything structurally
//! wrong fails at deserialization or load-time validation instead of at
//! match time.

use serde::{Deserialize, Serialize};

use catalog_agent_core::{DocumentLabel, LanguageVariant};

/// One node of the catalog tree
///
/// The `kind` tag selects the variant. All variants may carry children,
/// keywords, and a trigger; which text fields they carry differs.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CatalogNode {
    /// Navigation menu with a title and child nodes
    Menu {
        id: String,
        #[serde(default)]
        title: LocalizedText,
        #[serde(default)]
        keywords: KeywordSet,
        #[serde(default)]
        trigger: Option<String>,
        #[serde(default)]
        children: Vec<CatalogNode>,
    },
    /// Plain message shown to the user
    Message {
        id: String,
        #[serde(default)]
        text: LocalizedText,
        #[serde(default)]
        keywords: KeywordSet,
        #[serde(default)]
        trigger: Option<String>,
        #[serde(default)]
        children: Vec<CatalogNode>,
    },
    /// Selectable option under a menu or message
    #[serde(rename = "option")]
    OptionItem {
        id: String,
        #[serde(default)]
        label: LocalizedText,
        #[serde(default)]
        keywords: KeywordSet,
        #[serde(default)]
        trigger: Option<String>,
        #[serde(default)]
        children: Vec<CatalogNode>,
    },
    /// Horizontal collection of cards
    Carousel {
        id: String,
        #[serde(default)]
        title: LocalizedText,
        #[serde(default)]
        keywords: KeywordSet,
        #[serde(default)]
        trigger: Option<String>,
        #[serde(default)]
        children: Vec<CatalogNode>,
    },
    /// One card inside a carousel
    Card {
        id: String,
        #[serde(default)]
        title: LocalizedText,
        #[serde(default)]
        body: LocalizedText,
        #[serde(default)]
        keywords: KeywordSet,
        #[serde(default)]
        trigger: Option<String>,
        #[serde(default)]
        children: Vec<CatalogNode>,
    },
}

impl CatalogNode {
    /// Node identifier
    pub fn id(&self) -> &str {
        match self {
            Self::Menu { id, .. }
            | Self::Message { id, .. }
            | Self::OptionItem { id, .. }
            | Self::Carousel { id, .. }
            | Self::Card { id, .. } => id,
        }
    }

    /// Node kind name as it appears in the source file
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Menu { .. } => "menu",
            Self::Message { .. } => "message",
            Self::OptionItem { .. } => "option",
            Self::Carousel { .. } => "carousel",
            Self::Card { .. } => "card",
        }
    }

    /// Child nodes in source order
    pub fn children(&self) -> &[CatalogNode] {
        match self {
            Self::Menu { children, .. }
            | Self::Message { children, .. }
            | Self::OptionItem { children, .. }
            | Self::Carousel { children, .. }
            | Self::Card { children, .. } => children,
        }
    }

    /// Trigger identifier, if this node starts a flow
    pub fn trigger(&self) -> Option<&str> {
        match self {
            Self::Menu { trigger, .. }
            | Self::Message { trigger, .. }
            | Self::OptionItem { trigger, .. }
            | Self::Carousel { trigger, .. }
            | Self::Card { trigger, .. } => trigger.as_deref(),
        }
    }

    /// Keyword set attached to this node
    pub fn keywords(&self) -> &KeywordSet {
        match self {
            Self::Menu { keywords, .. }
            | Self::Message { keywords, .. }
            | Self::OptionItem { keywords, .. }
            | Self::Carousel { keywords, .. }
            | Self::Card { keywords, .. } => keywords,
        }
    }

    /// Text fields this node contributes to the document corpus
    pub fn texts(&self) -> Vec<(DocumentLabel, &LocalizedText)> {
        match self {
            Self::Menu { title, .. } => vec![(DocumentLabel::Title, title)],
            Self::Message { text, .. } => vec![(DocumentLabel::Message, text)],
            Self::OptionItem { label, .. } => vec![(DocumentLabel::OptionLabel, label)],
            Self::Carousel { title, .. } => vec![(DocumentLabel::Title, title)],
            Self::Card { title, body, .. } => vec![
                (DocumentLabel::CardTitle, title),
                (DocumentLabel::CardBody, body),
            ],
        }
    }
}

/// One string per language variant, all optional
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocalizedText {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub en: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bn: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub banglish: Option<String>,
}

impl LocalizedText {
    /// Iterate over present, non-blank strings with their variant
    pub fn iter(&self) -> impl Iterator<Item = (LanguageVariant, &str)> {
        [
            (LanguageVariant::English, self.en.as_deref()),
            (LanguageVariant::Bengali, self.bn.as_deref()),
            (LanguageVariant::Banglish, self.banglish.as_deref()),
        ]
        .into_iter()
        .filter_map(|(variant, text)| {
            text.map(str::trim)
                .filter(|t| !t.is_empty())
                .map(|t| (variant, t))
        })
    }

    /// True when no variant carries text
    pub fn is_empty(&self) -> bool {
        self.iter().next().is_none()
    }
}

/// Keyword lists per language variant
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeywordSet {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub en: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub bn: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub banglish: Vec<String>,
}

impl KeywordSet {
    /// All keywords across variants, in variant-then-source order
    pub fn iter_all(&self) -> impl Iterator<Item = &str> {
        self.en
            .iter()
            .chain(self.bn.iter())
            .chain(self.banglish.iter())
            .map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.en.is_empty() && self.bn.is_empty() && self.banglish.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_tagged_node() {
        let yaml = r#"
kind: menu
id: root
title:
  en: "Main menu"
  bn: "মূল মেনু"
children:
  - kind: option
    id: internet
    label:
      en: "Internet packages"
      banglish: "Internet package"
    keywords:
      en: ["internet package"]
      bn: ["ইন্টারনেট প্যাকেজ"]
      banglish: ["net pack"]
    trigger: flow_internet_packages
"#;
        let node: CatalogNode = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(node.id(), "root");
        assert_eq!(node.kind(), "menu");
        assert_eq!(node.children().len(), 1);

        let child = &node.children()[0];
        assert_eq!(child.kind(), "option");
        assert_eq!(child.trigger(), Some("flow_internet_packages"));
        assert_eq!(child.keywords().iter_all().count(), 3);
    }

    #[test]
    fn test_unknown_kind_is_rejected() {
        let yaml = "kind: widget\nid: x\n";
        assert!(serde_yaml::from_str::<CatalogNode>(yaml).is_err());
    }

    #[test]
    fn test_localized_text_skips_blank_variants() {
        let text = LocalizedText {
            en: Some("Balance".to_string()),
            bn: Some("   ".to_string()),
            banglish: None,
        };
        let present: Vec<_> = text.iter().collect();
        assert_eq!(present, vec![(LanguageVariant::English, "Balance")]);
        assert!(!text.is_empty());
    }

    #[test]
    fn test_card_contributes_title_and_body() {
        let yaml = r#"
kind: card
id: pack_7d
title:
  en: "7 day pack"
body:
  en: "2 GB for 7 days"
"#;
        let node: CatalogNode = serde_yaml::from_str(yaml).unwrap();
        let labels: Vec<_> = node.texts().into_iter().map(|(l, _)| l).collect();
        assert_eq!(labels, vec![DocumentLabel::CardTitle, DocumentLabel::CardBody]);
    }
}
