//! Quiz session engine
//!
//! A session consumes a snapshot of vocabulary entries, shuffles them, and
//! walks the caller through one question at a time: answer attempts are
//! counted per question, a hint is revealed from the second failed attempt,
//! skipping becomes available from the third, and every question resolved on
//! a later-than-first attempt lands on the review list. Sessions are
//! ephemeral and never persisted.

use rand::Rng;
use serde::Serialize;

use crate::error::{Error, Result};
use crate::vocab::VocabularyStore;

/// Session size at which a session counts as rated (graded). Informational:
/// no scoring rule depends on it.
pub const RATED_THRESHOLD: usize = 100;

/// One quiz entry: an owned copy of a word entry plus its section of origin.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QuizItem {
    pub term: String,
    pub translation: String,
    pub section: String,
}

/// View of the currently presented question.
#[derive(Debug, Clone, Serialize)]
pub struct Question {
    /// The native-language term to translate.
    pub prompt: String,
    /// Zero-based position in the shuffled sequence.
    pub index: usize,
    pub total: usize,
    /// Attempts already spent on this question.
    pub attempts: u32,
    /// First half of the translation, revealed from the second failed attempt.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
    /// Whether skipping is offered (from the third failed attempt).
    pub can_skip: bool,
}

/// End-of-session summary.
#[derive(Debug, Clone, Serialize)]
pub struct Summary {
    pub correct: usize,
    pub wrong: usize,
    pub skipped: usize,
    /// round(correct / (correct + wrong + skipped) * 100); 0 when no
    /// questions were resolved.
    pub accuracy: u8,
    pub review: Vec<ReviewEntry>,
}

/// A question that needs review: anything not answered on the first attempt.
#[derive(Debug, Clone, Serialize)]
pub struct ReviewEntry {
    pub term: String,
    pub translation: String,
}

/// Terminal mistake to be recorded in the ledger by the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MistakeReport {
    pub term: String,
    pub section: String,
}

/// Where the session moved after a resolved question.
#[derive(Debug, Clone)]
pub enum Progress {
    Next(Question),
    Finished(Summary),
}

/// Result of one answer submission.
#[derive(Debug, Clone)]
pub enum AnswerOutcome {
    /// Matched; the session advanced. `mistake` is set when the match took
    /// more than one attempt and must be recorded in the ledger.
    Correct {
        attempts: u32,
        mistake: Option<MistakeReport>,
        progress: Progress,
    },
    /// Did not match; the same question stays current.
    Incorrect { question: Question },
}

/// Stateful quiz controller. `Active` until the sequence is exhausted or the
/// caller ends the session, then `Completed`; mutation after completion is a
/// contract violation.
#[derive(Debug)]
pub struct SessionEngine {
    items: Vec<QuizItem>,
    index: usize,
    attempts: u32,
    correct: usize,
    wrong: usize,
    skipped: usize,
    review: Vec<QuizItem>,
    rated: bool,
    completed: bool,
}

impl SessionEngine {
    /// Start a session over the given sections, shuffled with the thread RNG.
    pub fn start(store: &VocabularyStore, section_ids: &[String]) -> Result<Self> {
        Self::start_with_rng(store, section_ids, &mut rand::thread_rng())
    }

    /// Start a session with a caller-supplied RNG (deterministic in tests).
    pub fn start_with_rng<R: Rng>(
        store: &VocabularyStore,
        section_ids: &[String],
        rng: &mut R,
    ) -> Result<Self> {
        if section_ids.is_empty() {
            return Err(Error::EmptySelection("no sections chosen".into()));
        }
        let items = store.gather(section_ids);
        if items.is_empty() {
            return Err(Error::EmptySelection(
                "selected sections contain no words".into(),
            ));
        }
        Ok(Self::from_items(items, rng))
    }

    fn from_items<R: Rng>(mut items: Vec<QuizItem>, rng: &mut R) -> Self {
        // Fisher–Yates, last-to-first, inclusive upper bound on the pick:
        // every permutation equally likely.
        for i in (1..items.len()).rev() {
            let j = rng.gen_range(0..=i);
            items.swap(i, j);
        }
        let rated = items.len() >= RATED_THRESHOLD;
        Self {
            items,
            index: 0,
            attempts: 0,
            correct: 0,
            wrong: 0,
            skipped: 0,
            review: Vec::new(),
            rated,
            completed: false,
        }
    }

    /// Whether this session meets the rated (graded) size threshold.
    pub fn rated(&self) -> bool {
        self.rated
    }

    pub fn total(&self) -> usize {
        self.items.len()
    }

    pub fn is_completed(&self) -> bool {
        self.completed
    }

    /// The shuffled sequence, e.g. for the word-list start contract.
    pub fn items(&self) -> &[QuizItem] {
        &self.items
    }

    /// Current question view; `None` once completed.
    pub fn question(&self) -> Option<Question> {
        (!self.completed).then(|| self.current_question())
    }

    /// View of the question at the current index. Callers must have checked
    /// that the session is still active.
    fn current_question(&self) -> Question {
        let item = &self.items[self.index];
        Question {
            prompt: item.term.clone(),
            index: self.index,
            total: self.items.len(),
            attempts: self.attempts,
            hint: (self.attempts >= 2).then(|| hint_for(&item.translation)),
            can_skip: self.attempts >= 3,
        }
    }

    /// Submit one answer attempt for the current question.
    ///
    /// An input that trims to empty is rejected without consuming an attempt.
    /// Matching is case-insensitive on the full translation string.
    pub fn submit_answer(&mut self, raw: &str) -> Result<AnswerOutcome> {
        if self.completed {
            return Err(Error::InvalidState("session already completed".into()));
        }
        let input = raw.trim();
        if input.is_empty() {
            return Err(Error::InvalidArgument("answer must not be empty".into()));
        }

        self.attempts += 1;
        let item = self.items[self.index].clone();

        if input.to_lowercase() == item.translation.trim().to_lowercase() {
            let attempts = self.attempts;
            let mistake = if attempts == 1 {
                self.correct += 1;
                None
            } else {
                self.wrong += 1;
                self.review.push(item.clone());
                Some(MistakeReport {
                    term: item.term,
                    section: item.section,
                })
            };
            let progress = self.advance();
            Ok(AnswerOutcome::Correct {
                attempts,
                mistake,
                progress,
            })
        } else {
            // Question stays current; the refreshed view carries the
            // escalated hint and skip availability.
            Ok(AnswerOutcome::Incorrect {
                question: self.current_question(),
            })
        }
    }

    /// Skip the current question: counts as skipped, lands on the review
    /// list, and the session advances.
    pub fn skip(&mut self) -> Result<Progress> {
        if self.completed {
            return Err(Error::InvalidState("session already completed".into()));
        }
        let item = self.items[self.index].clone();
        self.skipped += 1;
        self.review.push(item);
        Ok(self.advance())
    }

    /// End the session now and return the summary.
    pub fn end(&mut self) -> Summary {
        self.completed = true;
        self.summary()
    }

    /// Summary of the tallies so far.
    pub fn summary(&self) -> Summary {
        let total = self.correct + self.wrong + self.skipped;
        let accuracy = if total == 0 {
            0
        } else {
            (self.correct as f64 / total as f64 * 100.0).round() as u8
        };
        Summary {
            correct: self.correct,
            wrong: self.wrong,
            skipped: self.skipped,
            accuracy,
            review: self
                .review
                .iter()
                .map(|item| ReviewEntry {
                    term: item.term.clone(),
                    translation: item.translation.clone(),
                })
                .collect(),
        }
    }

    fn advance(&mut self) -> Progress {
        self.index += 1;
        self.attempts = 0;
        if self.index >= self.items.len() {
            self.completed = true;
            Progress::Finished(self.summary())
        } else {
            Progress::Next(self.current_question())
        }
    }
}

/// First half of the translation's characters, rounded up.
fn hint_for(translation: &str) -> String {
    let count = translation.chars().count();
    translation.chars().take(count.div_ceil(2)).collect()
}
