//! Trigger index
//!
//! Maps normalized keywords to trigger identifiers. Built once per
//! catalog generation, read-only afterwards, safe to share across
//! concurrent lookups. Matching is substring containment: catalog
//! keywords are short phrases and user queries are informal, so
//! token-exact matching would miss most real messages.

use std::collections::HashMap;

use crate::normalize::normalize;
use crate::walker::TriggerRecord;

#[derive(Debug)]
struct KeywordEntry {
    keyword: String,
    /// Chars, not bytes, so Bengali keywords compete fairly with Latin
    /// ones in the longest-match tie-break
    keyword_chars: usize,
    /// (trigger id, trigger insertion rank), in insertion order
    triggers: Vec<(String, usize)>,
}

/// Keyword-to-trigger lookup structure
#[derive(Debug)]
pub struct TriggerIndex {
    entries: Vec<KeywordEntry>,
    trigger_count: usize,
}

impl TriggerIndex {
    /// Build the index from walked trigger records
    ///
    /// Record order fixes the tie-break rank of each trigger; keywords
    /// are assumed already normalized by the walker, but normalization
    /// is idempotent so re-normalizing here costs nothing and keeps the
    /// index safe against hand-built records.
    pub fn build(records: &[TriggerRecord]) -> Self {
        let mut entries: Vec<KeywordEntry> = Vec::new();
        let mut slot_by_keyword: HashMap<String, usize> = HashMap::new();
        let mut rank_by_trigger: HashMap<&str, usize> = HashMap::new();
        let mut next_rank = 0usize;

        for record in records {
            let rank = *rank_by_trigger.entry(&record.trigger_id).or_insert_with(|| {
                let r = next_rank;
                next_rank += 1;
                r
            });

            for keyword in &record.keywords {
                let keyword = normalize(keyword);
                if keyword.is_empty() {
                    continue;
                }

                let slot = match slot_by_keyword.get(&keyword) {
                    Some(&slot) => slot,
                    None => {
                        slot_by_keyword.insert(keyword.clone(), entries.len());
                        entries.push(KeywordEntry {
                            keyword_chars: keyword.chars().count(),
                            keyword,
                            triggers: Vec::new(),
                        });
                        entries.len() - 1
                    }
                };

                let entry = &mut entries[slot];
                if !entry.triggers.iter().any(|(id, _)| id == &record.trigger_id) {
                    entry.triggers.push((record.trigger_id.clone(), rank));
                }
            }
        }

        Self {
            entries,
            trigger_count: next_rank,
        }
    }

    /// All triggers matching the query, best first
    ///
    /// Ordered by the tie-break rule: longest matching keyword first
    /// (more specific phrase wins), then first-inserted trigger. A
    /// trigger matching through several keywords appears once, at its
    /// best position. Empty or whitespace-only queries match nothing.
    pub fn lookup(&self, query: &str) -> Vec<&str> {
        let normalized = normalize(query);
        if normalized.is_empty() {
            return Vec::new();
        }

        // (keyword chars desc, insertion rank asc)
        let mut candidates: Vec<(usize, usize, &str)> = Vec::new();
        for entry in &self.entries {
            if normalized.contains(&entry.keyword) {
                for (trigger_id, rank) in &entry.triggers {
                    candidates.push((entry.keyword_chars, *rank, trigger_id.as_str()));
                }
            }
        }

        candidates.sort_by(|a, b| b.0.cmp(&a.0).then(a.1.cmp(&b.1)));

        let mut seen = Vec::new();
        for (_, _, trigger_id) in candidates {
            if !seen.contains(&trigger_id) {
                seen.push(trigger_id);
            }
        }
        seen
    }

    /// The single winning trigger for the query, if any matched
    pub fn best_match(&self, query: &str) -> Option<&str> {
        self.lookup(query).into_iter().next()
    }

    /// Number of distinct triggers in the index
    pub fn trigger_count(&self) -> usize {
        self.trigger_count
    }

    /// Number of distinct keywords in the index
    pub fn keyword_count(&self) -> usize {
        self.entries.len()
    }
}
