mod config;
mod errors;
mod interview;
mod language;
mod llm_client;
mod models;
mod routes;
mod state;
mod transcription;

#[cfg(test)]
mod test_support;

use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::language::KeywordLanguageClassifier;
use crate::llm_client::LlmClient;
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails fast on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_CRATE_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Copilot API v{}", env!("CARGO_PKG_VERSION"));

    // Initialize LLM client
    let llm = LlmClient::new(
        config.openai_api_key.clone(),
        &config.openai_base_url,
        Duration::from_secs(config.upstream_connect_timeout_secs),
    )?;
    info!(
        "LLM client initialized (model: {}, transcription: {})",
        llm_client::MODEL,
        llm_client::TRANSCRIPTION_MODEL
    );

    // Keyword classifier by default; LANGUAGE_AUX_BONUS enables the English auxiliary-verb bonus
    let classifier = Arc::new(KeywordLanguageClassifier::new(config.language_aux_bonus));
    info!(
        "Language classifier: keyword (auxiliary bonus: {})",
        config.language_aux_bonus
    );
    info!("Default résumé loaded ({} chars)", config.resume.chars().count());

    // Build app state
    let state = AppState {
        llm,
        config: config.clone(),
        classifier,
    };

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
