// Transcription relay: base64 audio in, transcript plus guessed language out.
// Speech-to-text goes through llm_client; language guessing reuses the shared
// classifier from AppState.

pub mod audio;
pub mod handlers;
