use std::sync::Arc;

use crate::config::Config;
use crate::language::LanguageClassifier;
use crate::llm_client::LlmClient;

/// Shared application state injected into all route handlers via Axum extractors.
/// Everything here is immutable after startup.
#[derive(Clone)]
pub struct AppState {
    pub llm: LlmClient,
    pub config: Config,
    /// Pluggable language classifier shared by the interview and transcription relays.
    /// Default: KeywordLanguageClassifier.
    pub classifier: Arc<dyn LanguageClassifier>,
}
