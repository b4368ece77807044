//! Mistake ledger: per-term, per-section error counters
//!
//! Counters exist only while the matching word entry exists (plus the zero
//! counter pre-seeded when a word is added). The ledger never initiates
//! vocabulary deletions; the cascade hooks below are driven by the
//! vocabulary operations on [`crate::Library`].

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Counters keyed by term, then section id.
///
/// Serializes as `{ "<term>": { "<sectionId>": <count> } }`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MistakeLedger {
    records: BTreeMap<String, BTreeMap<String, u32>>,
}

impl MistakeLedger {
    /// Increment the counter for `(term, section)`, creating it at 1 if absent.
    pub fn record(&mut self, term: &str, section: &str) {
        let counter = self
            .records
            .entry(term.to_string())
            .or_default()
            .entry(section.to_string())
            .or_insert(0);
        *counter += 1;
    }

    /// Ensure a zero counter exists for `(term, section)`. Existing counts
    /// are left untouched.
    pub fn seed(&mut self, term: &str, section: &str) {
        self.records
            .entry(term.to_string())
            .or_default()
            .entry(section.to_string())
            .or_insert(0);
    }

    /// Read-only snapshot of all counters.
    pub fn snapshot(&self) -> &BTreeMap<String, BTreeMap<String, u32>> {
        &self.records
    }

    /// Clear all records unconditionally.
    pub fn reset(&mut self) {
        self.records.clear();
    }

    /// Cascade hook: drop every counter recorded under `section`, pruning
    /// terms whose counter set becomes empty.
    pub fn remove_section(&mut self, section: &str) {
        for counters in self.records.values_mut() {
            counters.remove(section);
        }
        self.records.retain(|_, counters| !counters.is_empty());
    }

    /// Cascade hook: drop the counter for `(term, section)`, pruning the term
    /// if no section references it anymore.
    pub fn remove_word(&mut self, term: &str, section: &str) {
        if let Some(counters) = self.records.get_mut(term) {
            counters.remove(section);
            if counters.is_empty() {
                self.records.remove(term);
            }
        }
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
