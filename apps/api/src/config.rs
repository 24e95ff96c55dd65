use std::sync::Arc;

use anyhow::{Context, Result};

use crate::interview::resume::DEFAULT_RESUME;

const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";

/// Application configuration loaded from environment variables.
/// Fails at startup if required variables are missing or malformed.
#[derive(Debug, Clone)]
pub struct Config {
    pub openai_api_key: String,
    pub openai_base_url: String,
    pub port: u16,
    pub rust_log: String,
    /// Default résumé for requests that do not send their own `cvData`.
    pub resume: Arc<str>,
    /// Source-language hint forwarded to the speech-to-text service.
    pub transcription_language: String,
    pub language_aux_bonus: bool,
    pub upstream_connect_timeout_secs: u64,
    pub body_limit_bytes: usize,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let resume = match std::env::var("RESUME_PATH") {
            Ok(path) => load_resume(&path)?,
            Err(_) => Arc::from(DEFAULT_RESUME),
        };

        Ok(Config {
            openai_api_key: require_env("OPENAI_API_KEY")?,
            openai_base_url: std::env::var("OPENAI_BASE_URL")
                .unwrap_or_else(|_| DEFAULT_BASE_URL.to_string()),
            port: parse_env("PORT", 8080)?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
            resume,
            transcription_language: std::env::var("TRANSCRIPTION_LANGUAGE")
                .unwrap_or_else(|_| "pt".to_string()),
            language_aux_bonus: parse_env("LANGUAGE_AUX_BONUS", false)?,
            upstream_connect_timeout_secs: parse_env("UPSTREAM_CONNECT_TIMEOUT_SECS", 10)?,
            body_limit_bytes: parse_env("BODY_LIMIT_BYTES", 25 * 1024 * 1024)?,
        })
    }
}

/// Reads a résumé override from disk. An empty file is rejected so a typo in
/// the path never silently produces a prompt with no facts in it.
pub fn load_resume(path: &str) -> Result<Arc<str>> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read résumé file '{path}'"))?;
    if text.trim().is_empty() {
        anyhow::bail!("Résumé file '{path}' is empty");
    }
    Ok(Arc::from(text.as_str()))
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}

fn parse_env<T>(key: &str, default: T) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match std::env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse::<T>()
            .with_context(|| format!("{key} has an invalid value '{raw}'")),
        Err(_) => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_load_resume_reads_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "JANE DOE - Backend Engineer").unwrap();
        let resume = load_resume(file.path().to_str().unwrap()).unwrap();
        assert!(resume.starts_with("JANE DOE"));
    }

    #[test]
    fn test_load_resume_rejects_blank_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "   ").unwrap();
        assert!(load_resume(file.path().to_str().unwrap()).is_err());
    }

    #[test]
    fn test_load_resume_missing_file() {
        let err = load_resume("/definitely/not/here.txt").unwrap_err();
        assert!(err.to_string().contains("/definitely/not/here.txt"));
    }

    #[test]
    fn test_parse_env_default_when_unset() {
        let port: u16 = parse_env("COPILOT_TEST_UNSET_PORT", 8080).unwrap();
        assert_eq!(port, 8080);
    }
}
