pub mod health;

use axum::{extract::DefaultBodyLimit, routing::get, Router};

use crate::interview::handlers as interview;
use crate::state::AppState;
use crate::transcription::handlers as transcription;

pub fn build_router(state: AppState) -> Router {
    // Recorded audio arrives base64-encoded in the JSON body.
    let body_limit = state.config.body_limit_bytes;

    Router::new()
        .route("/health", get(health::health_handler))
        .route(
            "/api/interview",
            get(interview::handle_interview_info).post(interview::handle_interview),
        )
        .route(
            "/api/transcribe",
            get(transcription::handle_transcribe_info).post(transcription::handle_transcribe),
        )
        .layer(DefaultBodyLimit::max(body_limit))
        .with_state(state)
}
