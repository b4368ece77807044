//! Vocabulary store: named sections of translation pairs
//!
//! Sections are keyed by a user-supplied id, words by their native-language
//! term (unique per section). Ordering is the sorted key order of the
//! underlying maps, so listings are deterministic across runs.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::session::QuizItem;

/// All sections and their word entries.
///
/// Serializes as `{ "<sectionId>": { "<term>": "<translation>" } }`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VocabularyStore {
    sections: BTreeMap<String, Section>,
}

/// Word entries of one section, keyed by term.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Section {
    words: BTreeMap<String, String>,
}

/// One row of the section listing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SectionSummary {
    pub id: String,
    pub count: usize,
}

impl Section {
    /// Word count of this section.
    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

impl VocabularyStore {
    /// List all sections with their word counts, sorted by id.
    pub fn list_sections(&self) -> Vec<SectionSummary> {
        self.sections
            .iter()
            .map(|(id, section)| SectionSummary {
                id: id.clone(),
                count: section.len(),
            })
            .collect()
    }

    /// Create an empty section. Creating an existing section is a no-op, so
    /// client retries stay safe.
    pub fn create_section(&mut self, id: &str) -> Result<()> {
        if id.trim().is_empty() {
            return Err(Error::InvalidArgument("section id must not be empty".into()));
        }
        self.sections.entry(id.to_string()).or_default();
        Ok(())
    }

    /// Remove a section and all its word entries. Idempotent.
    ///
    /// Ledger cascade is handled by [`crate::Library::delete_section`]; call
    /// that instead when mistake counters exist.
    pub fn delete_section(&mut self, id: &str) {
        self.sections.remove(id);
    }

    /// Insert a translation pair, creating the section implicitly.
    /// An existing term's translation is overwritten (last write wins).
    pub fn add_word(&mut self, section: &str, term: &str, translation: &str) -> Result<()> {
        if section.trim().is_empty() || term.trim().is_empty() || translation.trim().is_empty() {
            return Err(Error::InvalidArgument(
                "section, term and translation must all be non-empty".into(),
            ));
        }
        self.sections
            .entry(section.to_string())
            .or_default()
            .words
            .insert(term.to_string(), translation.to_string());
        Ok(())
    }

    /// Remove a word entry if present. Idempotent.
    pub fn delete_word(&mut self, section: &str, term: &str) {
        if let Some(sec) = self.sections.get_mut(section) {
            sec.words.remove(term);
        }
    }

    /// Term → translation mapping of a section; empty if the section is absent.
    pub fn list_words(&self, section: &str) -> BTreeMap<String, String> {
        self.sections
            .get(section)
            .map(|sec| sec.words.clone())
            .unwrap_or_default()
    }

    /// Whether the section exists.
    pub fn contains_section(&self, id: &str) -> bool {
        self.sections.contains_key(id)
    }

    /// Gather the `(term, translation, section)` triples of the requested
    /// sections, in request order. Unknown section ids contribute nothing.
    /// The triples are owned copies, so an in-flight session is immune to
    /// later store edits.
    pub fn gather(&self, section_ids: &[String]) -> Vec<QuizItem> {
        let mut items = Vec::new();
        for id in section_ids {
            if let Some(section) = self.sections.get(id) {
                for (term, translation) in &section.words {
                    items.push(QuizItem {
                        term: term.clone(),
                        translation: translation.clone(),
                        section: id.clone(),
                    });
                }
            }
        }
        items
    }
}
