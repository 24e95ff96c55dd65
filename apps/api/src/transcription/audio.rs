use base64::{
    alphabet,
    engine::{DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig},
    Engine as _,
};

use crate::errors::AppError;
use crate::llm_client::AudioUpload;

/// Container formats accepted by the speech-to-text service.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum AudioFormat {
    #[default]
    Webm,
    Mp3,
    Wav,
    M4a,
    Ogg,
}

pub const SUPPORTED_FORMATS: &[AudioFormat] = &[
    AudioFormat::Webm,
    AudioFormat::Mp3,
    AudioFormat::Wav,
    AudioFormat::M4a,
    AudioFormat::Ogg,
];

impl AudioFormat {
    /// Maps a browser-reported MIME type (codec parameters allowed, e.g.
    /// `audio/webm;codecs=opus`). Unknown or absent types fall back to webm,
    /// which is what `MediaRecorder` produces by default.
    pub fn from_mime(mime: Option<&str>) -> Self {
        let essence = mime
            .and_then(|m| m.split(';').next())
            .map(|m| m.trim().to_ascii_lowercase())
            .unwrap_or_default();

        match essence.as_str() {
            "audio/mpeg" | "audio/mp3" => AudioFormat::Mp3,
            "audio/wav" | "audio/x-wav" | "audio/wave" => AudioFormat::Wav,
            "audio/mp4" | "audio/m4a" | "audio/x-m4a" => AudioFormat::M4a,
            "audio/ogg" => AudioFormat::Ogg,
            _ => AudioFormat::Webm,
        }
    }

    pub fn extension(&self) -> &'static str {
        match self {
            AudioFormat::Webm => "webm",
            AudioFormat::Mp3 => "mp3",
            AudioFormat::Wav => "wav",
            AudioFormat::M4a => "m4a",
            AudioFormat::Ogg => "ogg",
        }
    }

    pub fn file_name(&self) -> &'static str {
        match self {
            AudioFormat::Webm => "audio.webm",
            AudioFormat::Mp3 => "audio.mp3",
            AudioFormat::Wav => "audio.wav",
            AudioFormat::M4a => "audio.m4a",
            AudioFormat::Ogg => "audio.ogg",
        }
    }

    pub fn mime_type(&self) -> &'static str {
        match self {
            AudioFormat::Webm => "audio/webm",
            AudioFormat::Mp3 => "audio/mpeg",
            AudioFormat::Wav => "audio/wav",
            AudioFormat::M4a => "audio/mp4",
            AudioFormat::Ogg => "audio/ogg",
        }
    }
}

const LENIENT_CONFIG: GeneralPurposeConfig =
    GeneralPurposeConfig::new().with_decode_padding_mode(DecodePaddingMode::Indifferent);

const LENIENT_STANDARD: GeneralPurpose = GeneralPurpose::new(&alphabet::STANDARD, LENIENT_CONFIG);
const LENIENT_URL_SAFE: GeneralPurpose = GeneralPurpose::new(&alphabet::URL_SAFE, LENIENT_CONFIG);

/// Decodes the base64 payload into an upload for the speech-to-text service.
///
/// Accepts a `data:<mime>;base64,` prefix as produced by `FileReader`, line
/// breaks (MIME-style wrapping), missing padding and the URL-safe alphabet.
pub fn decode_audio(encoded: &str, format: AudioFormat) -> Result<AudioUpload, AppError> {
    let encoded = encoded.trim();
    let encoded = match encoded.split_once(";base64,") {
        Some((prefix, data)) if prefix.starts_with("data:") => data,
        _ => encoded,
    };
    let compact: String = encoded
        .chars()
        .filter(|c| !c.is_ascii_whitespace())
        .collect();

    let bytes = LENIENT_STANDARD
        .decode(&compact)
        .or_else(|_| LENIENT_URL_SAFE.decode(&compact))
        .map_err(|e| AppError::Validation(format!("audioBase64 is not valid base64: {e}")))?;

    if bytes.is_empty() {
        return Err(AppError::Validation("audioBase64 decoded to no data".to_string()));
    }

    Ok(AudioUpload {
        bytes,
        file_name: format.file_name(),
        mime_type: format.mime_type(),
    })
}
