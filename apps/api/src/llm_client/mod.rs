//! LLM Client: the single point of entry for all upstream AI calls.
//!
//! ARCHITECTURAL RULE: No other module may call the completion or transcription
//! APIs directly. All upstream interactions MUST go through this module.
//!
//! Model, token cap and temperature are hardcoded to prevent drift.

use std::time::Duration;

use bytes::Bytes;
use futures::stream::{BoxStream, StreamExt};
use reqwest::{multipart, Client, RequestBuilder, Response};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

use crate::models::chat::ChatMessage;

pub mod prompts;

/// The chat model used for all interview answers.
pub const MODEL: &str = "gpt-4o-mini";
pub const TRANSCRIPTION_MODEL: &str = "whisper-1";
const MAX_TOKENS: u32 = 600;
const TEMPERATURE: f32 = 0.7;

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("LLM returned empty content")]
    EmptyContent,
}

#[derive(Debug, Serialize)]
struct CompletionRequest<'a> {
    model: &'a str,
    messages: &'a [ChatMessage],
    max_tokens: u32,
    temperature: f32,
    stream: bool,
}

#[derive(Debug, Deserialize)]
struct CompletionResponse {
    choices: Vec<CompletionChoice>,
    usage: Option<Usage>,
}

#[derive(Debug, Deserialize)]
struct CompletionChoice {
    message: CompletionMessage,
}

#[derive(Debug, Deserialize)]
struct CompletionMessage {
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Usage {
    prompt_tokens: u32,
    completion_tokens: u32,
}

#[derive(Debug, Deserialize)]
struct TranscriptionResponse {
    #[serde(default)]
    text: String,
}

#[derive(Debug, Deserialize)]
struct ApiError {
    error: ApiErrorBody,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    message: String,
}

/// A file to be transcribed.
#[derive(Debug, Clone)]
pub struct AudioUpload {
    pub bytes: Vec<u8>,
    pub file_name: &'static str,
    pub mime_type: &'static str,
}

/// The single LLM client used by both relays.
/// Wraps an OpenAI-compatible API (chat completions + audio transcriptions).
#[derive(Clone)]
pub struct LlmClient {
    client: Client,
    api_key: String,
    base_url: String,
}

impl LlmClient {
    /// Only the connect phase is bounded: a read timeout would cut off long
    /// streamed answers.
    pub fn new(api_key: String, base_url: &str, connect_timeout: Duration) -> Result<Self, LlmError> {
        let client = Client::builder().connect_timeout(connect_timeout).build()?;
        Ok(Self {
            client,
            api_key,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path)
    }

    /// Sends the request and turns any non-2xx status into `LlmError::Api`,
    /// preferring the upstream's structured error message when present.
    async fn send(&self, request: RequestBuilder) -> Result<Response, LlmError> {
        let response = request.bearer_auth(&self.api_key).send().await?;
        let status = response.status();

        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        warn!("Upstream API returned {}: {}", status, body);
        let message = serde_json::from_str::<ApiError>(&body)
            .map(|e| e.error.message)
            .unwrap_or(body);

        Err(LlmError::Api {
            status: status.as_u16(),
            message,
        })
    }

    /// Requests a full (non-streamed) completion and returns the answer text.
    pub async fn complete(&self, messages: &[ChatMessage]) -> Result<String, LlmError> {
        let body = CompletionRequest {
            model: MODEL,
            messages,
            max_tokens: MAX_TOKENS,
            temperature: TEMPERATURE,
            stream: false,
        };

        let response = self
            .send(self.client.post(self.endpoint("chat/completions")).json(&body))
            .await?;
        let completion: CompletionResponse = response.json().await?;

        if let Some(usage) = &completion.usage {
            debug!(
                "Completion succeeded: prompt_tokens={}, completion_tokens={}",
                usage.prompt_tokens, usage.completion_tokens
            );
        }

        completion
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .filter(|text| !text.trim().is_empty())
            .ok_or(LlmError::EmptyContent)
    }

    /// Requests a streamed completion. The status is checked before returning;
    /// the body is handed back as raw SSE bytes for the relay to decode.
    /// Dropping the stream aborts the upstream request.
    pub async fn complete_stream(
        &self,
        messages: &[ChatMessage],
    ) -> Result<BoxStream<'static, reqwest::Result<Bytes>>, LlmError> {
        let body = CompletionRequest {
            model: MODEL,
            messages,
            max_tokens: MAX_TOKENS,
            temperature: TEMPERATURE,
            stream: true,
        };

        let response = self
            .send(self.client.post(self.endpoint("chat/completions")).json(&body))
            .await?;

        Ok(response.bytes_stream().boxed())
    }

    /// Transcribes an audio file. `language` is a source-language hint.
    pub async fn transcribe(&self, audio: AudioUpload, language: &str) -> Result<String, LlmError> {
        let size = audio.bytes.len();
        let part = multipart::Part::bytes(audio.bytes)
            .file_name(audio.file_name)
            .mime_str(audio.mime_type)?;

        let form = multipart::Form::new()
            .part("file", part)
            .text("model", TRANSCRIPTION_MODEL)
            .text("language", language.to_string());

        let response = self
            .send(
                self.client
                    .post(self.endpoint("audio/transcriptions"))
                    .multipart(form),
            )
            .await?;

        let transcription: TranscriptionResponse = response.json().await?;
        debug!(
            "Transcription succeeded: audio_bytes={}, chars={}",
            size,
            transcription.text.chars().count()
        );

        Ok(transcription.text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::spawn_upstream;
    use axum::{routing::post, Json, Router};
    use serde_json::{json, Value};

    fn client_for(base_url: &str) -> LlmClient {
        LlmClient::new("sk-test".into(), base_url, Duration::from_secs(5)).unwrap()
    }

    #[tokio::test]
    async fn test_complete_returns_first_choice() {
        let router = Router::new().route(
            "/chat/completions",
            post(|Json(body): Json<Value>| async move {
                assert_eq!(body["model"], MODEL);
                assert_eq!(body["max_tokens"], 600);
                assert_eq!(body["stream"], false);
                Json(json!({
                    "choices": [{"message": {"role": "assistant", "content": "Eu liderei..."}}],
                    "usage": {"prompt_tokens": 10, "completion_tokens": 3}
                }))
            }),
        );
        let base = spawn_upstream(router).await;

        let answer = client_for(&base)
            .complete(&[ChatMessage::user("Qual?")])
            .await
            .unwrap();
        assert_eq!(answer, "Eu liderei...");
    }

    #[tokio::test]
    async fn test_complete_maps_error_body() {
        let router = Router::new().route(
            "/chat/completions",
            post(|| async {
                (
                    axum::http::StatusCode::UNAUTHORIZED,
                    Json(json!({"error": {"message": "Incorrect API key"}})),
                )
            }),
        );
        let base = spawn_upstream(router).await;

        let err = client_for(&base)
            .complete(&[ChatMessage::user("hi")])
            .await
            .unwrap_err();
        match err {
            LlmError::Api { status, message } => {
                assert_eq!(status, 401);
                assert_eq!(message, "Incorrect API key");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_complete_empty_content() {
        let router = Router::new().route(
            "/chat/completions",
            post(|| async { Json(json!({"choices": []})) }),
        );
        let base = spawn_upstream(router).await;

        let err = client_for(&base)
            .complete(&[ChatMessage::user("hi")])
            .await
            .unwrap_err();
        assert!(matches!(err, LlmError::EmptyContent));
    }

    #[tokio::test]
    async fn test_complete_stream_yields_raw_body() {
        let router = Router::new().route(
            "/chat/completions",
            post(|| async { "data: [DONE]\n\n" }),
        );
        let base = spawn_upstream(router).await;

        let mut stream = client_for(&base)
            .complete_stream(&[ChatMessage::user("hi")])
            .await
            .unwrap();
        let mut body = Vec::new();
        while let Some(chunk) = stream.next().await {
            body.extend_from_slice(&chunk.unwrap());
        }
        assert_eq!(body, b"data: [DONE]\n\n");
    }

    #[tokio::test]
    async fn test_transcribe_returns_text() {
        let router = Router::new().route(
            "/audio/transcriptions",
            post(|| async { Json(json!({"text": "Fale sobre você"})) }),
        );
        let base = spawn_upstream(router).await;

        let audio = AudioUpload {
            bytes: vec![1, 2, 3],
            file_name: "audio.webm",
            mime_type: "audio/webm",
        };
        let text = client_for(&base).transcribe(audio, "pt").await.unwrap();
        assert_eq!(text, "Fale sobre você");
    }
}
