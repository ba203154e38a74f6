//! Keyword lookup behind the chatbot.
//!
//! Input is lowercased and trimmed, then matched exactly against the keyword
//! table. Without an exact hit, every keyword contained in the input is a
//! candidate, as is every keyword ending in "can" when the input mentions
//! "cans". Candidates are ranked by match kind (direct containment first),
//! then keyword length, then declaration order, so overlapping keywords such
//! as "soda can" and "can" always resolve the same way.

use std::{cmp::Reverse, collections::HashMap};

use knowledge::{normalize_keyword, KnowledgeBase};
use shared::domain::RecyclingEntry;
use tracing::debug;

pub const FALLBACK_REPLY: &str = "I'm not sure. Try another item!";

const PLURAL_STEM: &str = "can";
const PLURAL_FORM: &str = "cans";

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum MatchKind {
    PluralAlias,
    Contained,
}

#[derive(Debug, Clone)]
pub struct LookupResponder {
    entries: Vec<RecyclingEntry>,
    exact: HashMap<String, usize>,
}

impl LookupResponder {
    /// Keywords are normalized; empty keywords are skipped and the first
    /// declaration of a repeated keyword wins.
    pub fn new(entries: impl IntoIterator<Item = RecyclingEntry>) -> Self {
        let mut kept = Vec::new();
        let mut exact = HashMap::new();
        for entry in entries {
            let keyword = normalize_keyword(&entry.keyword);
            if keyword.is_empty() || exact.contains_key(&keyword) {
                continue;
            }
            exact.insert(keyword.clone(), kept.len());
            kept.push(RecyclingEntry::new(keyword, entry.instruction));
        }

        Self {
            entries: kept,
            exact,
        }
    }

    pub fn from_knowledge(knowledge: &KnowledgeBase) -> Self {
        Self::new(knowledge.entries().iter().cloned())
    }

    pub fn respond(&self, input: &str) -> &str {
        self.lookup(input)
            .map(|entry| entry.instruction.as_str())
            .unwrap_or(FALLBACK_REPLY)
    }

    /// The entry `respond` would answer with, if any.
    pub fn lookup(&self, input: &str) -> Option<&RecyclingEntry> {
        let cleaned = normalize_keyword(input);
        if cleaned.is_empty() {
            return None;
        }

        if let Some(&index) = self.exact.get(&cleaned) {
            debug!(keyword = %self.entries[index].keyword, "exact keyword match");
            return Some(&self.entries[index]);
        }

        let mentions_plural = cleaned.contains(PLURAL_FORM);
        let best = self
            .entries
            .iter()
            .enumerate()
            .filter_map(|(index, entry)| {
                if cleaned.contains(entry.keyword.as_str()) {
                    Some((index, MatchKind::Contained, entry))
                } else if mentions_plural && entry.keyword.ends_with(PLURAL_STEM) {
                    Some((index, MatchKind::PluralAlias, entry))
                } else {
                    None
                }
            })
            .max_by_key(|(index, kind, entry)| {
                (*kind, entry.keyword.chars().count(), Reverse(*index))
            })
            .map(|(_, kind, entry)| {
                debug!(keyword = %entry.keyword, ?kind, "keyword match");
                entry
            });

        if best.is_none() {
            debug!(input = %cleaned, "no keyword matched");
        }
        best
    }

    /// Keywords containing the typed text, in declared order.
    pub fn suggestions(&self, input: &str) -> Vec<&str> {
        let cleaned = normalize_keyword(input);
        if cleaned.is_empty() {
            return Vec::new();
        }

        self.entries
            .iter()
            .map(|entry| entry.keyword.as_str())
            .filter(|keyword| keyword.contains(cleaned.as_str()))
            .collect()
    }

    pub fn entries(&self) -> &[RecyclingEntry] {
        &self.entries
    }
}

#[cfg(test)]
#[path = "tests/responder_tests.rs"]
mod tests;
