//! Streaming relay: republishes the upstream completion stream as our own
//! server-sent events.
//!
//! Event order on the client channel:
//! 1. `language` (always first)
//! 2. `text` per non-empty upstream delta, in arrival order
//! 3. `done` once, only if the upstream finished cleanly
//!    or `error` once on a transport failure
//!
//! The relay runs in its own task. When the client goes away the channel
//! closes, the task returns and dropping the upstream body aborts the request.

use std::convert::Infallible;

use axum::response::sse::{Event, KeepAlive, Sse};
use bytes::Bytes;
use futures::stream::{self, BoxStream, Stream, StreamExt};
use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::language::LanguageTag;

const CHANNEL_CAPACITY: usize = 64;
const DONE_SENTINEL: &str = "[DONE]";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum RelayEvent {
    Language { language: LanguageTag },
    Text { content: String },
    Done,
    Error { error: String },
}

impl RelayEvent {
    fn into_event(self) -> Event {
        Event::default().data(serde_json::to_string(&self).unwrap_or_default())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RelayOutcome {
    Completed,
    Failed,
    Disconnected,
}

// ────────────────────────────────────────────────────────────────────────────
// Upstream decoding
// ────────────────────────────────────────────────────────────────────────────

/// Splits the upstream byte stream into `data:` payloads. Lines may arrive
/// split across network chunks, so partial lines are kept until completed.
#[derive(Debug, Default)]
pub struct SseLineDecoder {
    buffer: Vec<u8>,
}

impl SseLineDecoder {
    pub fn push(&mut self, chunk: &[u8]) -> Vec<String> {
        self.buffer.extend_from_slice(chunk);

        let mut payloads = Vec::new();
        while let Some(pos) = self.buffer.iter().position(|&b| b == b'\n') {
            let line: Vec<u8> = self.buffer.drain(..=pos).collect();
            if let Some(payload) = data_payload(&line) {
                payloads.push(payload);
            }
        }
        payloads
    }

    /// Flushes a final line that was not newline-terminated.
    pub fn finish(&mut self) -> Option<String> {
        let line = std::mem::take(&mut self.buffer);
        data_payload(&line)
    }
}

fn data_payload(line: &[u8]) -> Option<String> {
    let line = String::from_utf8_lossy(line);
    let line = line.trim_end_matches(|c: char| c == '\n' || c == '\r');
    line.strip_prefix("data:")
        .map(|data| data.strip_prefix(' ').unwrap_or(data).to_string())
}

#[derive(Debug, Deserialize)]
struct StreamChunk {
    #[serde(default)]
    choices: Vec<StreamChoice>,
}

#[derive(Debug, Deserialize)]
struct StreamChoice {
    #[serde(default)]
    delta: Delta,
}

#[derive(Debug, Default, Deserialize)]
struct Delta {
    content: Option<String>,
}

#[derive(Debug, PartialEq, Eq)]
pub enum Fragment {
    Content(String),
    Finished,
    Skip,
}

/// Decodes one `data:` payload. Malformed payloads are skipped, not fatal.
pub fn decode_payload(payload: &str) -> Fragment {
    if payload.trim() == DONE_SENTINEL {
        return Fragment::Finished;
    }

    match serde_json::from_str::<StreamChunk>(payload) {
        Ok(chunk) => chunk
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.delta.content)
            .filter(|content| !content.is_empty())
            .map(Fragment::Content)
            .unwrap_or(Fragment::Skip),
        Err(e) => {
            debug!("Skipping undecodable stream fragment: {e}");
            Fragment::Skip
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Pump
// ────────────────────────────────────────────────────────────────────────────

enum Step {
    Continue,
    Finished,
    Disconnected,
}

async fn forward(payload: &str, tx: &mpsc::Sender<RelayEvent>) -> Step {
    match decode_payload(payload) {
        Fragment::Content(content) => match tx.send(RelayEvent::Text { content }).await {
            Ok(()) => Step::Continue,
            Err(_) => Step::Disconnected,
        },
        Fragment::Finished => Step::Finished,
        Fragment::Skip => Step::Continue,
    }
}

async fn complete(tx: &mpsc::Sender<RelayEvent>) -> RelayOutcome {
    match tx.send(RelayEvent::Done).await {
        Ok(()) => RelayOutcome::Completed,
        Err(_) => RelayOutcome::Disconnected,
    }
}

/// Reads the upstream stream to the end (or until the client disconnects),
/// pushing derived events into `tx`.
pub async fn pump<S, E>(
    mut upstream: S,
    language: LanguageTag,
    tx: mpsc::Sender<RelayEvent>,
) -> RelayOutcome
where
    S: Stream<Item = Result<Bytes, E>> + Unpin,
    E: std::fmt::Display,
{
    if tx.send(RelayEvent::Language { language }).await.is_err() {
        return RelayOutcome::Disconnected;
    }

    let mut decoder = SseLineDecoder::default();

    loop {
        let next = tokio::select! {
            _ = tx.closed() => return RelayOutcome::Disconnected,
            next = upstream.next() => next,
        };

        match next {
            Some(Ok(chunk)) => {
                for payload in decoder.push(&chunk) {
                    match forward(&payload, &tx).await {
                        Step::Continue => {}
                        Step::Finished => return complete(&tx).await,
                        Step::Disconnected => return RelayOutcome::Disconnected,
                    }
                }
            }
            Some(Err(e)) => {
                warn!("Upstream stream failed: {e}");
                let _ = tx
                    .send(RelayEvent::Error {
                        error: e.to_string(),
                    })
                    .await;
                return RelayOutcome::Failed;
            }
            None => {
                if let Some(payload) = decoder.finish() {
                    if let Step::Disconnected = forward(&payload, &tx).await {
                        return RelayOutcome::Disconnected;
                    }
                }
                return complete(&tx).await;
            }
        }
    }
}

/// Spawns the pump and exposes its channel as an SSE response.
pub fn spawn_sse(
    upstream: BoxStream<'static, reqwest::Result<Bytes>>,
    language: LanguageTag,
    request_id: Uuid,
) -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    let (tx, rx) = mpsc::channel(CHANNEL_CAPACITY);

    tokio::spawn(async move {
        let outcome = pump(upstream, language, tx).await;
        info!(%request_id, ?outcome, "Interview stream finished");
    });

    let events = stream::unfold(rx, |mut rx| async move {
        rx.recv().await.map(|event| (Ok(event.into_event()), rx))
    });

    Sse::new(events).keep_alive(KeepAlive::default())
}
