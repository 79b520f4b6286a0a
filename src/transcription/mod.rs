use serde::{Deserialize, Serialize};

use crate::error::{ParleyError, Result};

pub mod deepgram;
pub mod normalize;
pub mod whisperx;

/// A contiguous span of speech attributed to one speaker
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Utterance {
    pub speaker: String,
    pub text: String,
}

impl Utterance {
    pub fn new(speaker: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            speaker: speaker.into(),
            text: text.into(),
        }
    }
}

/// A single transcribed word tagged with the speaker it belongs to
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WordSegment {
    pub word: String,
    pub speaker: String,
}

impl WordSegment {
    pub fn new(word: impl Into<String>, speaker: impl Into<String>) -> Self {
        Self {
            word: word.into(),
            speaker: speaker.into(),
        }
    }
}

/// Speech backend selection, from the `api_type` upload field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TranscriptionBackend {
    Deepgram,
    WhisperX,
}

impl TranscriptionBackend {
    /// Parse the `api_type` field. Anything outside the two known backends
    /// is rejected up front rather than falling through with no transcript.
    pub fn parse(api_type: &str) -> Result<Self> {
        match api_type {
            "deepgram" => Ok(Self::Deepgram),
            "whisperx" => Ok(Self::WhisperX),
            other => Err(ParleyError::InvalidApiType(other.to_string())),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Deepgram => "deepgram",
            Self::WhisperX => "whisperx",
        }
    }
}

/// Guess the audio content type from the uploaded filename extension.
/// Backends accept raw bytes; the header only helps container detection.
pub fn audio_content_type(filename: &str) -> &'static str {
    let ext = filename
        .rsplit('.')
        .next()
        .map(|e| e.to_ascii_lowercase())
        .unwrap_or_default();

    match ext.as_str() {
        "mp3" => "audio/mpeg",
        "ogg" => "audio/ogg",
        "flac" => "audio/flac",
        "m4a" | "mp4" => "audio/mp4",
        "webm" => "audio/webm",
        _ => "audio/wav",
    }
}
