//! Mistake ledger endpoints

use std::collections::BTreeMap;

use axum::extract::State;
use axum::Json;
use serde::Deserialize;
use tracing::info;

use super::{ApiResult, OkResponse};
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct MistakeRequest {
    #[serde(default)]
    pub chinese: String,
    #[serde(default)]
    pub section: String,
}

/// GET /mistakes - full ledger snapshot
pub async fn get_mistakes(
    State(state): State<AppState>,
) -> Json<BTreeMap<String, BTreeMap<String, u32>>> {
    let snapshot = state.store.read(|lib| lib.mistakes.snapshot().clone()).await;
    Json(snapshot)
}

/// POST /mistakes - increment the counter for (term, section)
pub async fn record_mistake(
    State(state): State<AppState>,
    Json(req): Json<MistakeRequest>,
) -> ApiResult<Json<OkResponse>> {
    state
        .store
        .mutate(|lib| {
            lib.record_mistake(&req.chinese, &req.section);
            Ok(())
        })
        .await?;
    Ok(Json(OkResponse::new()))
}

/// POST /mistakes/reset - clear the whole ledger
pub async fn reset_mistakes(State(state): State<AppState>) -> ApiResult<Json<OkResponse>> {
    state
        .store
        .mutate(|lib| {
            lib.mistakes.reset();
            Ok(())
        })
        .await?;
    info!("mistake ledger reset");
    Ok(Json(OkResponse::new()))
}
