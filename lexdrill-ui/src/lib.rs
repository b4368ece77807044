//! lexdrill-ui library - HTTP server for the vocabulary drill service
//!
//! Exposes the vocabulary/mistake CRUD surface, the legacy word-list test
//! start, and the token-addressed quiz session endpoints over JSON.

use std::sync::Arc;

use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

pub mod api;
pub mod config;
pub mod sessions;
pub mod store;

use sessions::SessionRegistry;
use store::DocumentStore;

/// Application state shared across HTTP handlers
#[derive(Clone)]
pub struct AppState {
    /// Persistence gateway over the whole vocabulary document
    pub store: Arc<DocumentStore>,
    /// Live quiz sessions, one engine per token
    pub sessions: Arc<SessionRegistry>,
}

impl AppState {
    /// Create new application state
    pub fn new(store: DocumentStore, sessions: SessionRegistry) -> Self {
        Self {
            store: Arc::new(store),
            sessions: Arc::new(sessions),
        }
    }
}

/// Build application router
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route(
            "/sections",
            get(api::sections::list_sections)
                .post(api::sections::create_section)
                .delete(api::sections::delete_section),
        )
        .route("/vocab/:section", get(api::vocab::list_words))
        .route(
            "/vocab",
            post(api::vocab::add_word).delete(api::vocab::delete_word),
        )
        .route(
            "/mistakes",
            get(api::mistakes::get_mistakes).post(api::mistakes::record_mistake),
        )
        .route("/mistakes/reset", post(api::mistakes::reset_mistakes))
        .route("/start-test", post(api::quiz::start_test))
        .route("/session/start", post(api::quiz::start_session))
        .route("/session/:token", get(api::quiz::get_session))
        .route("/session/:token/answer", post(api::quiz::submit_answer))
        .route("/session/:token/skip", post(api::quiz::skip))
        .route("/session/:token/end", post(api::quiz::end_session))
        .merge(api::health::health_routes())
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
