//! Axum route handlers for the Transcription API.

use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;
use crate::language::LanguageTag;
use crate::state::AppState;
use crate::transcription::audio::{decode_audio, AudioFormat, SUPPORTED_FORMATS};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TranscribeRequest {
    pub audio_base64: Option<String>,
    pub mime_type: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TranscribeResponse {
    pub success: bool,
    pub text: String,
    pub detected_language: LanguageTag,
}

/// POST /api/transcribe
///
/// Forwards recorded audio to the speech-to-text service and guesses the
/// language of the transcript.
pub async fn handle_transcribe(
    State(state): State<AppState>,
    payload: Result<Json<TranscribeRequest>, JsonRejection>,
) -> Result<Json<TranscribeResponse>, AppError> {
    let Json(request) = payload?;
    let encoded = request
        .audio_base64
        .as_deref()
        .filter(|a| !a.trim().is_empty())
        .ok_or_else(|| AppError::MissingInput("audioBase64".to_string()))?;

    let request_id = Uuid::new_v4();
    let format = AudioFormat::from_mime(request.mime_type.as_deref());
    let upload = decode_audio(encoded, format)?;

    info!(
        %request_id,
        bytes = upload.bytes.len(),
        format = format.extension(),
        "Relaying audio for transcription"
    );

    let text = state
        .llm
        .transcribe(upload, &state.config.transcription_language)
        .await
        .map_err(|e| AppError::Llm(format!("Transcription failed: {e}")))?;

    let text = text.trim();
    if text.is_empty() {
        return Err(AppError::EmptyTranscription);
    }

    let detected_language = state.classifier.classify(text);
    info!(%request_id, %detected_language, "Transcription ready");

    Ok(Json(TranscribeResponse {
        success: true,
        text: text.to_string(),
        detected_language,
    }))
}

/// GET /api/transcribe
pub async fn handle_transcribe_info() -> Json<Value> {
    let formats: Vec<&str> = SUPPORTED_FORMATS.iter().map(|f| f.extension()).collect();
    Json(json!({
        "status": "ok",
        "message": "Transcription API backed by a hosted speech-to-text service",
        "supportedFormats": formats
    }))
}
