use serde::{Deserialize, Serialize};

/// A prior question/answer pair supplied by the client. Either side may be
/// blank: the web client sends its user and assistant bubbles as separate
/// half-filled turns.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Turn {
    #[serde(default)]
    pub question: String,
    #[serde(default)]
    pub answer: String,
}
