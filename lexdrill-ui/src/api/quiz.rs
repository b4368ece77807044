//! Quiz endpoints
//!
//! Two ways to run a test: the legacy word-list contract (`/start-test`
//! hands the shuffled words to the client, which drives itself and reports
//! mistakes through POST /mistakes), and the server-driven session surface
//! (`/session/*`), where the engine lives behind an opaque token and the
//! ledger is updated as answers resolve.

use axum::extract::{Path, State};
use axum::Json;
use lexdrill_core::session::{AnswerOutcome, Progress, Question, Summary};
use lexdrill_core::{Error, SessionEngine};
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use super::ApiResult;
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct StartRequest {
    #[serde(default)]
    pub sections: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub struct AnswerRequest {
    #[serde(default)]
    pub answer: String,
}

/// Legacy start contract: the shuffled word list itself.
#[derive(Debug, Serialize)]
pub struct StartTestResponse {
    /// `[term, translation, section]` triples in quiz order
    pub words: Vec<(String, String, String)>,
    pub rated: bool,
}

#[derive(Debug, Serialize)]
pub struct StartSessionResponse {
    pub token: Uuid,
    pub total: usize,
    pub rated: bool,
    pub question: Question,
}

/// One step of a server-driven session: either the session moved on (next
/// question or summary) or the same question is re-presented.
#[derive(Debug, Serialize)]
pub struct TurnResponse {
    pub correct: bool,
    pub attempts: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub question: Option<Question>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<Summary>,
    pub done: bool,
}

#[derive(Debug, Serialize)]
pub struct SkipResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub question: Option<Question>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<Summary>,
    pub done: bool,
}

/// POST /start-test - gather, shuffle, and hand the words to the client
pub async fn start_test(
    State(state): State<AppState>,
    Json(req): Json<StartRequest>,
) -> ApiResult<Json<StartTestResponse>> {
    let engine = state
        .store
        .read(|lib| SessionEngine::start(&lib.vocab, &req.sections))
        .await?;
    let rated = engine.rated();
    if rated {
        state
            .store
            .mutate(|lib| {
                lib.record_rated_session();
                Ok(())
            })
            .await?;
    }
    info!(sections = req.sections.len(), words = engine.total(), rated, "test started");
    Ok(Json(StartTestResponse {
        words: engine
            .items()
            .iter()
            .map(|i| (i.term.clone(), i.translation.clone(), i.section.clone()))
            .collect(),
        rated,
    }))
}

/// POST /session/start - start a server-driven session behind a token
pub async fn start_session(
    State(state): State<AppState>,
    Json(req): Json<StartRequest>,
) -> ApiResult<Json<StartSessionResponse>> {
    let engine = state
        .store
        .read(|lib| SessionEngine::start(&lib.vocab, &req.sections))
        .await?;
    let total = engine.total();
    let rated = engine.rated();
    let question = engine
        .question()
        .ok_or_else(|| Error::InvalidState("fresh session has no question".into()))?;
    if rated {
        state
            .store
            .mutate(|lib| {
                lib.record_rated_session();
                Ok(())
            })
            .await?;
    }
    let token = state.sessions.insert(engine).await;
    info!(%token, total, rated, "quiz session started");
    Ok(Json(StartSessionResponse {
        token,
        total,
        rated,
        question,
    }))
}

/// GET /session/{token} - current question of a live session
pub async fn get_session(
    State(state): State<AppState>,
    Path(token): Path<Uuid>,
) -> ApiResult<Json<Question>> {
    let question = state
        .sessions
        .with(token, |engine| {
            engine
                .question()
                .ok_or_else(|| Error::InvalidState("session already completed".into()))
        })
        .await?;
    Ok(Json(question))
}

/// POST /session/{token}/answer - submit one answer attempt
pub async fn submit_answer(
    State(state): State<AppState>,
    Path(token): Path<Uuid>,
    Json(req): Json<AnswerRequest>,
) -> ApiResult<Json<TurnResponse>> {
    let outcome = state
        .sessions
        .with(token, |engine| engine.submit_answer(&req.answer))
        .await?;

    let response = match outcome {
        AnswerOutcome::Correct {
            attempts,
            mistake,
            progress,
        } => {
            // A match past the first attempt is a terminal mistake; it goes
            // into the ledger (and to disk) before the caller sees success.
            if let Some(report) = mistake {
                state
                    .store
                    .mutate(|lib| {
                        lib.record_mistake(&report.term, &report.section);
                        Ok(())
                    })
                    .await?;
            }
            match progress {
                Progress::Next(question) => TurnResponse {
                    correct: true,
                    attempts,
                    question: Some(question),
                    summary: None,
                    done: false,
                },
                Progress::Finished(summary) => TurnResponse {
                    correct: true,
                    attempts,
                    question: None,
                    summary: Some(summary),
                    done: true,
                },
            }
        }
        AnswerOutcome::Incorrect { question } => TurnResponse {
            correct: false,
            attempts: question.attempts,
            question: Some(question),
            summary: None,
            done: false,
        },
    };
    Ok(Json(response))
}

/// POST /session/{token}/skip - skip the current question
pub async fn skip(
    State(state): State<AppState>,
    Path(token): Path<Uuid>,
) -> ApiResult<Json<SkipResponse>> {
    let progress = state
        .sessions
        .with(token, |engine| engine.skip())
        .await?;
    let response = match progress {
        Progress::Next(question) => SkipResponse {
            question: Some(question),
            summary: None,
            done: false,
        },
        Progress::Finished(summary) => SkipResponse {
            question: None,
            summary: Some(summary),
            done: true,
        },
    };
    Ok(Json(response))
}

/// POST /session/{token}/end - end the session now and take the summary
pub async fn end_session(
    State(state): State<AppState>,
    Path(token): Path<Uuid>,
) -> ApiResult<Json<Summary>> {
    let mut engine = state.sessions.remove(token).await?;
    let summary = engine.end();
    info!(%token, accuracy = summary.accuracy, "quiz session ended");
    Ok(Json(summary))
}
