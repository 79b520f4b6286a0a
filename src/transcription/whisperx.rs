//! Client for a WhisperX serving endpoint.
//!
//! The endpoint runs transcription, alignment, and speaker assignment and
//! returns aligned segments whose words carry speaker labels. It is treated
//! as an opaque service; no inference happens here.

use serde::Deserialize;

use crate::config::settings::TranscriptionConfig;
use crate::error::{ParleyError, Result};
use crate::transcription::WordSegment;

#[derive(Debug, Deserialize)]
struct WhisperXResponse {
    segments: Vec<WhisperXSegment>,
}

#[derive(Debug, Deserialize)]
struct WhisperXSegment {
    speaker: Option<String>,
    #[serde(default)]
    words: Vec<WhisperXWord>,
}

#[derive(Debug, Deserialize)]
struct WhisperXWord {
    word: String,
    speaker: Option<String>,
}

pub struct WhisperXClient {
    base_url: String,
    min_speakers: u32,
    max_speakers: u32,
    batch_size: u32,
    client: reqwest::Client,
}

impl WhisperXClient {
    pub fn new(base_url: impl Into<String>, config: &TranscriptionConfig) -> Self {
        Self {
            base_url: base_url.into(),
            min_speakers: config.min_speakers,
            max_speakers: config.max_speakers,
            batch_size: config.batch_size,
            client: reqwest::Client::new(),
        }
    }

    /// Transcribe and diarize audio, returning speaker-tagged words in
    /// segment order.
    pub async fn transcribe(&self, audio_data: Vec<u8>, filename: &str) -> Result<Vec<WordSegment>> {
        let file_part = reqwest::multipart::Part::bytes(audio_data)
            .file_name(filename.to_string())
            .mime_str(crate::transcription::audio_content_type(filename))
            .map_err(|e| ParleyError::Transcription(format!("Invalid audio mime type: {}", e)))?;

        let form = reqwest::multipart::Form::new()
            .part("file", file_part)
            .text("min_speakers", self.min_speakers.to_string())
            .text("max_speakers", self.max_speakers.to_string())
            .text("batch_size", self.batch_size.to_string());

        let response = self
            .client
            .post(format!("{}/transcribe", self.base_url))
            .multipart(form)
            .send()
            .await
            .map_err(|e| ParleyError::Transcription(format!("WhisperX request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(ParleyError::Transcription(format!(
                "WhisperX error {}: {}",
                status, body
            )));
        }

        let parsed: WhisperXResponse = response.json().await.map_err(|e| {
            ParleyError::Transcription(format!("Failed to parse WhisperX response: {}", e))
        })?;

        Ok(flatten_words(parsed))
    }
}

/// Flatten aligned segments into word order. A word without its own speaker
/// label inherits the segment's label.
fn flatten_words(response: WhisperXResponse) -> Vec<WordSegment> {
    let mut words = Vec::new();

    for segment in response.segments {
        let segment_speaker = segment.speaker;
        for word in segment.words {
            let speaker = word
                .speaker
                .or_else(|| segment_speaker.clone())
                .unwrap_or_else(|| "UNKNOWN".to_string());
            words.push(WordSegment {
                word: word.word.trim().to_string(),
                speaker,
            });
        }
    }

    words
}
