mod config;
mod db;
mod errors;
mod guidance;
mod journal;
mod llm_client;
mod routes;
mod state;

use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::db::create_pool;
use crate::guidance::corpus::VerseCorpus;
use crate::guidance::history::SessionStore;
use crate::llm_client::{LlmClient, TextGenerator, UnconfiguredGenerator};
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!(
                "{}={}",
                env!("CARGO_PKG_NAME").replace('-', "_"),
                &config.rust_log
            ))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Mindful API v{}", env!("CARGO_PKG_VERSION"));

    // Initialize SQLite (applies migrations)
    let db = create_pool(&config.database_url).await?;

    // Initialize generative-text backend
    let generator: Arc<dyn TextGenerator> = match &config.anthropic_api_key {
        Some(key) => {
            let llm = LlmClient::new(key.clone())?;
            info!("LLM client initialized (model: {})", llm_client::MODEL);
            Arc::new(llm)
        }
        None => {
            warn!("ANTHROPIC_API_KEY not set; guidance requests will fail");
            Arc::new(UnconfiguredGenerator)
        }
    };

    let corpus = Arc::new(VerseCorpus::load_or_empty(&config.verse_corpus_path));

    let state = AppState {
        db,
        generator,
        corpus,
        sessions: Arc::new(SessionStore::default()),
    };

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
