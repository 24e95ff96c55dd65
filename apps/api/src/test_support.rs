//! Helpers for handler tests: a throwaway upstream server and a state that
//! points at it.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use axum::Router;

use crate::config::Config;
use crate::interview::resume::DEFAULT_RESUME;
use crate::language::KeywordLanguageClassifier;
use crate::llm_client::LlmClient;
use crate::state::AppState;

/// Serves `router` on an ephemeral local port and returns its base URL.
pub async fn spawn_upstream(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{addr}")
}

pub fn test_config(base_url: &str) -> Config {
    Config {
        openai_api_key: "sk-test".to_string(),
        openai_base_url: base_url.to_string(),
        port: 0,
        rust_log: "debug".to_string(),
        resume: Arc::from(DEFAULT_RESUME),
        transcription_language: "pt".to_string(),
        language_aux_bonus: false,
        upstream_connect_timeout_secs: 5,
        body_limit_bytes: 1024 * 1024,
    }
}

pub fn test_state(base_url: &str) -> AppState {
    let config = test_config(base_url);
    AppState {
        llm: LlmClient::new(
            config.openai_api_key.clone(),
            &config.openai_base_url,
            Duration::from_secs(config.upstream_connect_timeout_secs),
        )
        .unwrap(),
        config,
        classifier: Arc::new(KeywordLanguageClassifier::default()),
    }
}

/// Upstream that counts requests and answers every route with `200 {}`.
pub async fn spawn_counting_upstream() -> (String, Arc<AtomicUsize>) {
    let hits = Arc::new(AtomicUsize::new(0));
    let counter = hits.clone();
    let router = Router::new().fallback(move || {
        let counter = counter.clone();
        async move {
            counter.fetch_add(1, Ordering::SeqCst);
            axum::Json(serde_json::json!({}))
        }
    });
    (spawn_upstream(router).await, hits)
}
