//! Section management endpoints
//!
//! All request fields default to empty strings so a missing field and an
//! empty field both surface as the same 400 validation error.

use axum::extract::State;
use axum::Json;
use lexdrill_core::vocab::SectionSummary;
use serde::Deserialize;
use tracing::info;

use super::{ApiResult, OkResponse};
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct SectionRequest {
    #[serde(default)]
    pub section: String,
}

/// GET /sections - list all sections with word counts
pub async fn list_sections(State(state): State<AppState>) -> Json<Vec<SectionSummary>> {
    let sections = state.store.read(|lib| lib.vocab.list_sections()).await;
    Json(sections)
}

/// POST /sections - create a section (idempotent)
pub async fn create_section(
    State(state): State<AppState>,
    Json(req): Json<SectionRequest>,
) -> ApiResult<Json<OkResponse>> {
    state
        .store
        .mutate(|lib| lib.create_section(&req.section))
        .await?;
    info!(section = %req.section, "section created");
    Ok(Json(OkResponse::new()))
}

/// DELETE /sections - delete a section and cascade its mistake counters
pub async fn delete_section(
    State(state): State<AppState>,
    Json(req): Json<SectionRequest>,
) -> ApiResult<Json<OkResponse>> {
    state
        .store
        .mutate(|lib| {
            lib.delete_section(&req.section);
            Ok(())
        })
        .await?;
    info!(section = %req.section, "section deleted");
    Ok(Json(OkResponse::new()))
}
