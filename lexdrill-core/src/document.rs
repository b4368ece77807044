//! Persisted document aggregate
//!
//! The whole service state is one JSON document, read and replaced as a unit
//! by the persistence gateway. The JSON field names are the on-disk contract;
//! documents written by older builds (missing fields) deserialize through the
//! serde defaults.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::mistakes::MistakeLedger;
use crate::vocab::VocabularyStore;

/// Whole-document aggregate: vocabulary, mistakes, and rating state.
///
/// Vocabulary and ledger mutations that must stay consistent go through the
/// methods here so both collections are always updated from one call site.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Library {
    #[serde(default)]
    pub vocab: VocabularyStore,
    #[serde(default)]
    pub mistakes: MistakeLedger,
    #[serde(default, rename = "ratingHistory")]
    pub rating_history: Vec<RatingEvent>,
    #[serde(default, rename = "userData")]
    pub user_data: UserData,
}

/// One historical rating observation. Appended by a future rating rule;
/// carried round-trip so existing documents keep their history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RatingEvent {
    pub rating: i64,
    pub at: DateTime<Utc>,
}

/// Per-user rating state. No update rule is defined for `current_rating`
/// and `k_factor`; only `test_count` is written, on each rated session start.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserData {
    #[serde(default)]
    pub current_rating: i64,
    #[serde(default = "default_k_factor")]
    pub k_factor: i64,
    #[serde(default)]
    pub test_count: u64,
}

fn default_k_factor() -> i64 {
    64
}

impl Default for UserData {
    fn default() -> Self {
        Self {
            current_rating: 0,
            k_factor: default_k_factor(),
            test_count: 0,
        }
    }
}

impl Library {
    /// Create a section. Idempotent; fails on a blank id.
    pub fn create_section(&mut self, id: &str) -> Result<()> {
        self.vocab.create_section(id)
    }

    /// Delete a section and everything that references it: all its word
    /// entries, and every mistake counter recorded under its id. Idempotent.
    pub fn delete_section(&mut self, id: &str) {
        self.vocab.delete_section(id);
        self.mistakes.remove_section(id);
    }

    /// Add a word to a section (creating the section if needed) and pre-seed
    /// a zero mistake counter for it. Last write wins on the translation.
    pub fn add_word(&mut self, section: &str, term: &str, translation: &str) -> Result<()> {
        self.vocab.add_word(section, term, translation)?;
        self.mistakes.seed(term, section);
        Ok(())
    }

    /// Delete a word and its mistake counter. Idempotent.
    pub fn delete_word(&mut self, section: &str, term: &str) {
        self.vocab.delete_word(section, term);
        self.mistakes.remove_word(term, section);
    }

    /// Increment the mistake counter for `(term, section)`.
    pub fn record_mistake(&mut self, term: &str, section: &str) {
        self.mistakes.record(term, section);
    }

    /// Note that a rated session was started.
    pub fn record_rated_session(&mut self) {
        self.user_data.test_count += 1;
    }
}
