//! lexdrill-ui - Vocabulary drill HTTP server
//!
//! Serves the vocabulary/mistake JSON API and the quiz session engine over
//! a single persisted JSON document.

use anyhow::Result;
use clap::Parser;
use tracing::info;

use lexdrill_ui::config::{Cli, Config};
use lexdrill_ui::sessions::SessionRegistry;
use lexdrill_ui::store::DocumentStore;
use lexdrill_ui::{build_router, AppState};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    info!("Starting LexDrill server (lexdrill-ui) v{}", env!("CARGO_PKG_VERSION"));

    let cli = Cli::parse();
    let config = Config::resolve(&cli)?;
    config.ensure_data_dir()?;

    let document_path = config.document_path();
    info!("Document path: {}", document_path.display());

    let store = DocumentStore::open(document_path)?;
    let sessions = SessionRegistry::new(config.session_timeout);

    let state = AppState::new(store, sessions);
    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind(("127.0.0.1", config.port)).await?;
    info!("lexdrill-ui listening on http://127.0.0.1:{}", config.port);
    info!("Health check: http://127.0.0.1:{}/health", config.port);

    axum::serve(listener, app).await?;

    Ok(())
}
