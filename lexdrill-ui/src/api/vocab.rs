//! Word entry endpoints
//!
//! The wire keys `chinese`/`english` are the original client contract for
//! term and translation; they map onto the store's term/translation pair.

use std::collections::BTreeMap;

use axum::extract::{Path, State};
use axum::Json;
use serde::Deserialize;
use tracing::info;

use super::{ApiResult, OkResponse};
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct AddWordRequest {
    #[serde(default)]
    pub section: String,
    #[serde(default)]
    pub chinese: String,
    #[serde(default)]
    pub english: String,
}

#[derive(Debug, Deserialize)]
pub struct DeleteWordRequest {
    #[serde(default)]
    pub section: String,
    #[serde(default)]
    pub chinese: String,
}

/// GET /vocab/{section} - term → translation mapping (empty if absent)
pub async fn list_words(
    State(state): State<AppState>,
    Path(section): Path<String>,
) -> Json<BTreeMap<String, String>> {
    let words = state.store.read(|lib| lib.vocab.list_words(&section)).await;
    Json(words)
}

/// POST /vocab - add a translation pair (creates the section implicitly,
/// overwrites an existing term's translation, pre-seeds its mistake counter)
pub async fn add_word(
    State(state): State<AppState>,
    Json(req): Json<AddWordRequest>,
) -> ApiResult<Json<OkResponse>> {
    state
        .store
        .mutate(|lib| lib.add_word(&req.section, &req.chinese, &req.english))
        .await?;
    info!(section = %req.section, term = %req.chinese, "word added");
    Ok(Json(OkResponse::new()))
}

/// DELETE /vocab - remove a word and its mistake counter (idempotent)
pub async fn delete_word(
    State(state): State<AppState>,
    Json(req): Json<DeleteWordRequest>,
) -> ApiResult<Json<OkResponse>> {
    state
        .store
        .mutate(|lib| {
            lib.delete_word(&req.section, &req.chinese);
            Ok(())
        })
        .await?;
    info!(section = %req.section, term = %req.chinese, "word deleted");
    Ok(Json(OkResponse::new()))
}
