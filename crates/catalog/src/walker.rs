//! Catalog tree walker
//!
//! Depth-first traversal of the catalog tree producing the two derived
//! outputs: the flat document corpus and the trigger records. The
//! source is a tree, but a malformed file could link a node back to an
//! ancestor, so traversal carries a visited-id guard and treats a
//! revisit as a load error rather than looping.

use std::collections::{HashMap, HashSet};

use catalog_agent_core::Document;

use crate::node::CatalogNode;
use crate::normalize::normalize;
use crate::{LoadError, ValidationWarning};

/// One flow trigger with its matchable keywords
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TriggerRecord {
    /// Opaque workflow identifier, unique within one generation
    pub trigger_id: String,
    /// Normalized, deduplicated keywords, union across all variants
    /// and all nodes declaring this trigger, in first-seen order
    pub keywords: Vec<String>,
    /// Node that first declared this trigger
    pub node_id: String,
}

/// Everything one walk extracts from a catalog tree
#[derive(Debug, Default)]
pub struct WalkOutput {
    pub documents: Vec<Document>,
    pub triggers: Vec<TriggerRecord>,
    pub warnings: Vec<ValidationWarning>,
}

/// Walk the tree, extracting documents and trigger records
///
/// Children are visited in source order; output ordering is
/// deterministic. Duplicate trigger identifiers merge their keyword
/// sets (the same flow may be reachable from several menu paths).
pub fn walk(root: &CatalogNode) -> Result<WalkOutput, LoadError> {
    let mut out = WalkOutput::default();
    let mut visited = HashSet::new();
    let mut trigger_slots: HashMap<String, usize> = HashMap::new();

    walk_node(root, &mut visited, &mut trigger_slots, &mut out)?;
    Ok(out)
}

fn walk_node(
    node: &CatalogNode,
    visited: &mut HashSet<String>,
    trigger_slots: &mut HashMap<String, usize>,
    out: &mut WalkOutput,
) -> Result<(), LoadError> {
    if !visited.insert(node.id().to_string()) {
        return Err(LoadError::Cycle {
            node_id: node.id().to_string(),
        });
    }

    for (label, localized) in node.texts() {
        for (variant, content) in localized.iter() {
            out.documents
                .push(Document::new(node.id(), content, label, variant));
        }
    }

    if let Some(trigger_id) = node.trigger() {
        collect_trigger(node, trigger_id, trigger_slots, out);
    }

    for child in node.children() {
        walk_node(child, visited, trigger_slots, out)?;
    }

    Ok(())
}

fn collect_trigger(
    node: &CatalogNode,
    trigger_id: &str,
    trigger_slots: &mut HashMap<String, usize>,
    out: &mut WalkOutput,
) {
    let keywords: Vec<String> = node
        .keywords()
        .iter_all()
        .map(normalize)
        .filter(|k| !k.is_empty())
        .collect();

    if keywords.is_empty() {
        out.warnings.push(ValidationWarning::TriggerWithoutKeywords {
            trigger_id: trigger_id.to_string(),
            node_id: node.id().to_string(),
        });
    }

    match trigger_slots.get(trigger_id) {
        Some(&slot) => {
            // Same flow declared elsewhere in the tree: union the keywords
            let record = &mut out.triggers[slot];
            for keyword in keywords {
                if !record.keywords.contains(&keyword) {
                    record.keywords.push(keyword);
                }
            }
        }
        None => {
            let mut deduped = Vec::with_capacity(keywords.len());
            for keyword in keywords {
                if !deduped.contains(&keyword) {
                    deduped.push(keyword);
                }
            }
            trigger_slots.insert(trigger_id.to_string(), out.triggers.len());
            out.triggers.push(TriggerRecord {
                trigger_id: trigger_id.to_string(),
                keywords: deduped,
                node_id: node.id().to_string(),
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use catalog_agent_core::{DocumentLabel, LanguageVariant};

    fn parse(yaml: &str) -> CatalogNode {
        serde_yaml::from_str(yaml).unwrap()
    }

    #[test]
    fn test_extracts_documents_in_source_order() {
        let root = parse(
            r#"
kind: menu
id: root
title:
  en: "Main menu"
  bn: "মূল মেনু"
children:
  - kind: message
    id: welcome
    text:
      en: "Welcome to our service"
  - kind: option
    id: balance_opt
    label:
      en: "Check balance"
"#,
        );

        let out = walk(&root).unwrap();
        let contents: Vec<&str> = out.documents.iter().map(|d| d.content.as_str()).collect();
        assert_eq!(
            contents,
            vec!["Main menu", "মূল মেনু", "Welcome to our service", "Check balance"]
        );
        assert_eq!(out.documents[0].label, DocumentLabel::Title);
        assert_eq!(out.documents[1].variant, LanguageVariant::Bengali);
        assert_eq!(out.documents[2].node_id, "welcome");
    }

    #[test]
    fn test_empty_text_fields_produce_no_documents() {
        let root = parse(
            r#"
kind: message
id: empty_msg
text:
  en: "   "
"#,
        );
        let out = walk(&root).unwrap();
        assert!(out.documents.is_empty());
    }

    #[test]
    fn test_trigger_keywords_are_normalized() {
        let root = parse(
            r#"
kind: option
id: recharge_opt
label:
  en: "Recharge"
keywords:
  en: ["  Recharge Now! ", "top up"]
  banglish: ["recharge korbo"]
trigger: flow_recharge
"#,
        );
        let out = walk(&root).unwrap();
        assert_eq!(out.triggers.len(), 1);
        let record = &out.triggers[0];
        assert_eq!(record.trigger_id, "flow_recharge");
        assert_eq!(record.keywords, vec!["recharge now", "top up", "recharge korbo"]);
        assert!(out.warnings.is_empty());
    }

    #[test]
    fn test_duplicate_trigger_ids_merge_keyword_union() {
        let root = parse(
            r#"
kind: menu
id: root
children:
  - kind: option
    id: offers_a
    label:
      en: "Offers"
    keywords:
      en: ["offer"]
    trigger: flow_offers
  - kind: option
    id: offers_b
    label:
      en: "Deals"
    keywords:
      en: ["offer", "deal"]
      bn: ["অফার"]
    trigger: flow_offers
"#,
        );
        let out = walk(&root).unwrap();
        assert_eq!(out.triggers.len(), 1);
        let record = &out.triggers[0];
        assert_eq!(record.keywords, vec!["offer", "deal", "অফার"]);
        assert_eq!(record.node_id, "offers_a");
    }

    #[test]
    fn test_trigger_without_keywords_warns_but_loads() {
        let root = parse(
            r#"
kind: option
id: orphan
label:
  en: "Mystery"
trigger: flow_orphan
"#,
        );
        let out = walk(&root).unwrap();
        assert_eq!(out.triggers.len(), 1);
        assert!(out.triggers[0].keywords.is_empty());
        assert_eq!(
            out.warnings,
            vec![ValidationWarning::TriggerWithoutKeywords {
                trigger_id: "flow_orphan".to_string(),
                node_id: "orphan".to_string(),
            }]
        );
    }

    #[test]
    fn test_duplicate_node_id_is_a_cycle_error() {
        let root = parse(
            r#"
kind: menu
id: root
children:
  - kind: message
    id: root
    text:
      en: "self reference"
"#,
        );
        let err = walk(&root).unwrap_err();
        assert!(matches!(err, LoadError::Cycle { node_id } if node_id == "root"));
    }
}
