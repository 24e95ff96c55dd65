//! Language detection: pluggable, trait-based classifier that guesses whether
//! a question was asked in Portuguese or English.
//!
//! Default: `KeywordLanguageClassifier` (keyword hits + diacritic bonus).
//! `AppState` holds an `Arc<dyn LanguageClassifier>` shared by the interview
//! and transcription relays.

use std::fmt;
use std::str::FromStr;

use serde::{de, Deserialize, Deserializer, Serialize};

pub mod keyword;

pub use keyword::KeywordLanguageClassifier;

/// Response language. `Auto` means "undetermined": the model mirrors the
/// language of the question.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LanguageTag {
    Pt,
    En,
    #[default]
    Auto,
}

impl LanguageTag {
    pub fn as_str(&self) -> &'static str {
        match self {
            LanguageTag::Pt => "pt",
            LanguageTag::En => "en",
            LanguageTag::Auto => "auto",
        }
    }
}

impl fmt::Display for LanguageTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LanguageTag {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pt" => Ok(LanguageTag::Pt),
            "en" => Ok(LanguageTag::En),
            "auto" => Ok(LanguageTag::Auto),
            other => Err(format!("unknown language '{other}', expected pt, en or auto")),
        }
    }
}

/// Reads an optional language tag where `null` and blank strings both mean
/// "not given".
pub fn deserialize_optional_tag<'de, D>(deserializer: D) -> Result<Option<LanguageTag>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    match raw.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(tag) => tag.parse().map(Some).map_err(de::Error::custom),
    }
}

/// The language classifier trait. Implement this to swap in a real classifier
/// without touching the relays.
pub trait LanguageClassifier: Send + Sync {
    fn classify(&self, text: &str) -> LanguageTag;
}

/// Resolves the language for a request: an explicit `pt`/`en` wins, anything
/// else falls back to classifying the question.
pub fn resolve_language(
    requested: Option<LanguageTag>,
    question: &str,
    classifier: &dyn LanguageClassifier,
) -> LanguageTag {
    match requested {
        Some(tag @ (LanguageTag::Pt | LanguageTag::En)) => tag,
        Some(LanguageTag::Auto) | None => classifier.classify(question),
    }
}
