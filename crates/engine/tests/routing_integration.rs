//! End-to-end routing over a realistic multilingual catalog
//!
//! Exercises the full path: parse catalog file, build a generation,
//! route queries in all three language variants, reload.

use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;

use catalog_agent_catalog::{normalize, CatalogService};
use catalog_agent_core::{
    Document, DocumentLabel, LanguageVariant, NoAnswerReason, Result, Retriever, RoutingResult,
    ScoredDocument,
};
use catalog_agent_engine::{EngineConfig, RoutingEngine};

const CATALOG_YAML: &str = r#"
kind: menu
id: root
title:
  en: "Main menu"
  bn: "মূল মেনু"
  banglish: "Main menu"
children:
  - kind: menu
    id: internet_menu
    title:
      en: "Internet packages"
      bn: "ইন্টারনেট প্যাকেজ"
    keywords:
      en: ["internet package", "data pack"]
      bn: ["ইন্টারনেট প্যাকেজ"]
      banglish: ["net pack", "internet package kinbo"]
    trigger: flow_internet_packages
    children:
      - kind: carousel
        id: internet_offers
        title:
          en: "Popular packs"
        children:
          - kind: card
            id: pack_7d
            title:
              en: "7 day pack"
            body:
              en: "2 GB for 7 days at 49 taka"
          - kind: card
            id: pack_30d
            title:
              en: "30 day pack"
            body:
              en: "10 GB for 30 days at 199 taka"
  - kind: option
    id: balance_opt
    label:
      en: "Check balance"
      bn: "ব্যালেন্স দেখুন"
      banglish: "Balance dekhun"
    keywords:
      en: ["balance", "account balance"]
      bn: ["ব্যালেন্স"]
      banglish: ["balance dekho", "balance koto"]
    trigger: flow_balance
  - kind: option
    id: recharge_opt
    label:
      en: "Recharge"
    keywords:
      en: ["recharge", "top up"]
      banglish: ["recharge korbo"]
    trigger: flow_recharge
  - kind: option
    id: recharge_shortcut
    label:
      en: "Quick recharge"
    keywords:
      en: ["quick recharge"]
    trigger: flow_recharge
  - kind: message
    id: care_hours
    text:
      en: "Customer care is open from 9am to 9pm every day"
      bn: "কাস্টমার কেয়ার প্রতিদিন সকাল ৯টা থেকে রাত ৯টা পর্যন্ত খোলা"
"#;

struct EchoRetriever {
    calls: AtomicUsize,
}

impl EchoRetriever {
    fn new() -> Arc<Self> {
        Arc::new(Self {
            calls: AtomicUsize::new(0),
        })
    }
}

#[async_trait]
impl Retriever for EchoRetriever {
    async fn index(&self, _documents: &[Document]) -> Result<()> {
        Ok(())
    }

    async fn query(&self, _text: &str, _top_k: usize) -> Result<Vec<ScoredDocument>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(vec![ScoredDocument::new(
            Document::new(
                "care_hours",
                "Customer care is open from 9am to 9pm every day",
                DocumentLabel::Message,
                LanguageVariant::English,
            ),
            0.8,
        )])
    }

    fn name(&self) -> &str {
        "echo"
    }
}

fn write_catalog(content: &str) -> (tempfile::TempDir, PathBuf) {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("catalog.yaml");
    std::fs::write(&path, content).unwrap();
    (dir, path)
}

struct TestSetup {
    engine: RoutingEngine,
    catalog: Arc<CatalogService>,
    retriever: Arc<EchoRetriever>,
    /// Keeps the catalog file alive for reload tests
    _dir: tempfile::TempDir,
}

fn build_engine() -> TestSetup {
    let (dir, path) = write_catalog(CATALOG_YAML);
    let catalog = Arc::new(CatalogService::load(&path).unwrap());
    let retriever = EchoRetriever::new();
    let engine = RoutingEngine::new(catalog.clone(), EngineConfig::default())
        .with_retriever(retriever.clone());
    TestSetup {
        engine,
        catalog,
        retriever,
        _dir: dir,
    }
}

#[tokio::test]
async fn routes_all_three_language_variants_to_the_same_flow() {
    let setup = build_engine();

    for query in [
        "I want to check my balance",
        "আমার ব্যালেন্স কত?",
        "balance dekho please",
    ] {
        let result = setup.engine.route(query).await;
        assert_eq!(result.trigger_id(), Some("flow_balance"), "query: {query}");
    }
}

#[tokio::test]
async fn every_keyworded_trigger_is_reachable() {
    let setup = build_engine();
    let generation = setup.catalog.current();

    for record in generation
        .triggers
        .iter()
        .filter(|r| !r.keywords.is_empty())
    {
        let reachable = {
            let mut hit = false;
            for keyword in &record.keywords {
                let result = setup.engine.route(keyword).await;
                if result.trigger_id() == Some(record.trigger_id.as_str()) {
                    hit = true;
                    break;
                }
            }
            hit
        };
        assert!(reachable, "trigger {} unreachable", record.trigger_id);
    }
}

#[tokio::test]
async fn duplicate_trigger_ids_share_one_record_with_merged_keywords() {
    let setup = build_engine();
    let generation = setup.catalog.current();

    let recharge: Vec<_> = generation
        .triggers
        .iter()
        .filter(|r| r.trigger_id == "flow_recharge")
        .collect();
    assert_eq!(recharge.len(), 1);

    let keywords = &recharge[0].keywords;
    assert!(keywords.contains(&normalize("recharge")));
    assert!(keywords.contains(&normalize("quick recharge")));
    assert!(keywords.contains(&normalize("recharge korbo")));
}

#[tokio::test]
async fn unmatched_query_falls_back_to_retrieval_and_never_triggers() {
    let setup = build_engine();

    let result = setup.engine.route("what is your refund policy").await;
    assert!(
        matches!(result, RoutingResult::Retrieved { .. }),
        "expected retrieval fallback, got {result:?}"
    );
    assert_eq!(setup.retriever.calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn empty_queries_resolve_without_touching_the_retriever() {
    let setup = build_engine();

    for query in ["", "   ", "\t\n", "?!."] {
        let result = setup.engine.route(query).await;
        assert_eq!(
            result,
            RoutingResult::no_answer(NoAnswerReason::EmptyQuery),
            "query: {query:?}"
        );
    }
    assert_eq!(setup.retriever.calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn carousel_cards_are_extracted_into_the_corpus() {
    let setup = build_engine();
    let generation = setup.catalog.current();

    let card_bodies: Vec<_> = generation
        .documents
        .iter()
        .filter(|d| d.label == DocumentLabel::CardBody)
        .collect();
    assert_eq!(card_bodies.len(), 2);
    assert!(card_bodies.iter().any(|d| d.node_id == "pack_7d"));
}

#[tokio::test]
async fn failed_reload_keeps_routing_unchanged() {
    let setup = build_engine();

    let before = setup.engine.route("balance dekho").await;
    assert_eq!(before.trigger_id(), Some("flow_balance"));

    std::fs::write(setup.catalog.path(), "kind: [not valid").unwrap();
    assert!(setup.catalog.reload().is_err());

    let after = setup.engine.route("balance dekho").await;
    assert_eq!(after, before);
}

#[tokio::test]
async fn successful_reload_swaps_routing_atomically() {
    let setup = build_engine();

    let replacement = r#"
kind: menu
id: root
title:
  en: "Main menu"
children:
  - kind: option
    id: esim_opt
    label:
      en: "eSIM activation"
    keywords:
      en: ["esim"]
    trigger: flow_esim
"#;
    std::fs::write(setup.catalog.path(), replacement).unwrap();
    setup.catalog.reload().unwrap();

    let result = setup.engine.route("how do I get an esim").await;
    assert_eq!(result.trigger_id(), Some("flow_esim"));

    // The old trigger keywords are gone from the new generation
    let old = setup.engine.route("balance dekho").await;
    assert!(old.trigger_id().is_none());
}
