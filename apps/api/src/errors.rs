use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Missing input: {0}")]
    MissingInput(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid request body: {0}")]
    InvalidBody(#[from] JsonRejection),

    #[error("Transcription produced no text")]
    EmptyTranscription,

    #[error("LLM error: {0}")]
    Llm(String),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::MissingInput(_) | AppError::Validation(_) | AppError::EmptyTranscription => {
                StatusCode::BAD_REQUEST
            }
            // 400 for syntax, 415 for content type, 422 for shape.
            AppError::InvalidBody(rejection) => rejection.status(),
            AppError::Llm(_) | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (code, message) = match &self {
            AppError::MissingInput(field) => ("MISSING_INPUT", format!("{field} is required")),
            AppError::Validation(msg) => ("VALIDATION_ERROR", msg.clone()),
            AppError::InvalidBody(rejection) => ("INVALID_BODY", rejection.body_text()),
            AppError::EmptyTranscription => (
                "EMPTY_TRANSCRIPTION",
                "Could not transcribe the audio".to_string(),
            ),
            AppError::Llm(msg) => {
                // Upstream detail stays in the logs.
                tracing::error!("LLM error: {msg}");
                ("UPSTREAM_ERROR", "The AI service returned an error".to_string())
            }
            AppError::Internal(e) => {
                tracing::error!("Internal error: {e:?}");
                ("INTERNAL_ERROR", e.to_string())
            }
        };

        let body = Json(json!({
            "error": message,
            "code": code
        }));

        (self.status(), body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn body_json(err: AppError) -> (StatusCode, serde_json::Value) {
        let response = err.into_response();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_missing_input_is_bad_request() {
        let (status, body) = body_json(AppError::MissingInput("question".into())).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "question is required");
        assert_eq!(body["code"], "MISSING_INPUT");
    }

    #[tokio::test]
    async fn test_llm_error_hides_upstream_detail() {
        let (status, body) =
            body_json(AppError::Llm("status 401: invalid api key sk-123".into())).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(!body["error"].as_str().unwrap().contains("sk-123"));
        assert_eq!(body["code"], "UPSTREAM_ERROR");
    }

    #[tokio::test]
    async fn test_json_rejection_keeps_status() {
        use axum::extract::FromRequest;

        let request = axum::http::Request::post("/")
            .header("content-type", "application/json")
            .body(axum::body::Body::from("{oops"))
            .unwrap();
        let rejection = Json::<serde_json::Value>::from_request(request, &())
            .await
            .unwrap_err();

        let (status, body) = body_json(AppError::from(rejection)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["code"], "INVALID_BODY");
        assert!(body["error"].as_str().unwrap().contains("JSON"));
    }

    #[tokio::test]
    async fn test_internal_error_surfaces_message() {
        let (status, body) = body_json(AppError::Internal(anyhow::anyhow!("disk on fire"))).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"], "disk on fire");
    }
}
