//! Axum route handlers for the Interview API.

use axum::{
    extract::{rejection::JsonRejection, State},
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;
use crate::interview::messages::build_messages;
use crate::interview::prompts::build_persona_prompt;
use crate::interview::relay;
use crate::language::{deserialize_optional_tag, resolve_language, LanguageTag};
use crate::models::conversation::Turn;
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InterviewRequest {
    pub question: Option<String>,
    pub cv_data: Option<String>,
    /// Blank or absent means detect from the question.
    #[serde(default, deserialize_with = "deserialize_optional_tag")]
    pub language: Option<LanguageTag>,
    pub conversation_history: Option<Vec<Turn>>,
    /// Defaults to streaming. Callers that parse a single JSON body send `false`.
    pub stream: Option<bool>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InterviewResponse {
    pub success: bool,
    pub answer: String,
    pub detected_language: LanguageTag,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/interview
///
/// Drafts a first-person answer to `question` grounded in the résumé.
/// Streams SSE relay events unless `stream` is false, in which case a single
/// JSON payload is returned.
pub async fn handle_interview(
    State(state): State<AppState>,
    payload: Result<Json<InterviewRequest>, JsonRejection>,
) -> Result<Response, AppError> {
    let Json(request) = payload?;
    let question = request
        .question
        .as_deref()
        .map(str::trim)
        .filter(|q| !q.is_empty())
        .ok_or_else(|| AppError::MissingInput("question".to_string()))?;

    let request_id = Uuid::new_v4();
    let streaming = request.stream.unwrap_or(true);
    let language = resolve_language(request.language, question, state.classifier.as_ref());

    let resume = request
        .cv_data
        .as_deref()
        .filter(|cv| !cv.trim().is_empty())
        .unwrap_or(state.config.resume.as_ref());

    let history = request.conversation_history.as_deref().unwrap_or_default();
    let messages = build_messages(build_persona_prompt(resume, language), history, question);

    info!(
        %request_id,
        %language,
        streaming,
        messages = messages.len(),
        "Relaying interview question"
    );

    if streaming {
        let upstream = state
            .llm
            .complete_stream(&messages)
            .await
            .map_err(|e| AppError::Llm(format!("Streaming completion failed: {e}")))?;

        return Ok(relay::spawn_sse(upstream, language, request_id).into_response());
    }

    let answer = state
        .llm
        .complete(&messages)
        .await
        .map_err(|e| AppError::Llm(format!("Completion failed: {e}")))?;

    info!(%request_id, chars = answer.chars().count(), "Interview answer ready");

    Ok(Json(InterviewResponse {
        success: true,
        answer,
        detected_language: language,
    })
    .into_response())
}

/// GET /api/interview
pub async fn handle_interview_info() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "message": "Interview assistant API with streaming answers",
        "features": [
            "Real-time streaming over server-sent events",
            "Automatic language detection (PT/EN)",
            "Answers in the question's language",
            "STAR method for behavioral questions"
        ]
    }))
}
