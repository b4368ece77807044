//! # LexDrill Core Library
//!
//! Domain model for the vocabulary drill service:
//! - Vocabulary store (sections of translation pairs)
//! - Mistake ledger (per-term, per-section error counters)
//! - Quiz session engine (question sequencing, attempts, hints, scoring)
//! - Persisted document aggregate and error taxonomy

pub mod document;
pub mod error;
pub mod mistakes;
pub mod session;
pub mod vocab;

pub use document::Library;
pub use error::{Error, Result};
pub use mistakes::MistakeLedger;
pub use session::SessionEngine;
pub use vocab::VocabularyStore;
