use axum::{extract::State, Json};
use serde::Serialize;

use crate::llm_client::{MODEL, TRANSCRIPTION_MODEL};
use crate::state::AppState;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    pub status: &'static str,
    pub service: &'static str,
    pub version: &'static str,
    pub chat_model: &'static str,
    pub transcription_model: &'static str,
    /// Characters of résumé text the persona prompt is built from.
    pub resume_chars: usize,
}

/// GET /health
pub async fn health_handler(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        service: env!("CARGO_PKG_NAME"),
        version: env!("CARGO_PKG_VERSION"),
        chat_model: MODEL,
        transcription_model: TRANSCRIPTION_MODEL,
        resume_chars: state.config.resume.chars().count(),
    })
}
