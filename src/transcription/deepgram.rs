use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use serde::Deserialize;

use crate::error::{ParleyError, Result};
use crate::transcription::Utterance;

const DEEPGRAM_API_URL: &str = "https://api.deepgram.com";

#[derive(Debug, Deserialize)]
struct DeepgramResponse {
    results: DeepgramResults,
}

#[derive(Debug, Deserialize)]
struct DeepgramResults {
    utterances: Option<Vec<DeepgramUtterance>>,
}

#[derive(Debug, Deserialize)]
struct DeepgramUtterance {
    speaker: Option<u32>,
    transcript: String,
}

/// Diarized transcription result. The raw response body is kept so the
/// server can persist it for diagnostics.
#[derive(Debug)]
pub struct DeepgramTranscript {
    pub utterances: Vec<Utterance>,
    pub raw_json: String,
}

/// Deepgram prerecorded-audio client. Credentials are handed in at
/// construction instead of read from process-global state.
pub struct DeepgramClient {
    api_key: String,
    model: String,
    base_url: String,
    client: reqwest::Client,
}

impl DeepgramClient {
    pub fn new(api_key: impl Into<String>, model: impl Into<String>) -> Self {
        Self::with_base_url(api_key, model, DEEPGRAM_API_URL)
    }

    pub fn with_base_url(
        api_key: impl Into<String>,
        model: impl Into<String>,
        base_url: impl Into<String>,
    ) -> Self {
        Self {
            api_key: api_key.into(),
            model: model.into(),
            base_url: base_url.into(),
            client: reqwest::Client::new(),
        }
    }

    fn listen_url(&self) -> String {
        format!(
            "{}/v1/listen?model={}&smart_format=true&diarize=true&punctuate=true&utterances=true",
            self.base_url, self.model
        )
    }

    /// Transcribe audio bytes with diarization enabled
    pub async fn transcribe(
        &self,
        audio_data: &[u8],
        content_type: &str,
    ) -> Result<DeepgramTranscript> {
        let mut headers = HeaderMap::new();
        headers.insert(
            AUTHORIZATION,
            HeaderValue::from_str(&format!("Token {}", self.api_key))
                .map_err(|e| ParleyError::Api(format!("Invalid API key format: {}", e)))?,
        );
        headers.insert(
            CONTENT_TYPE,
            HeaderValue::from_str(content_type)
                .map_err(|e| ParleyError::Api(format!("Invalid content type: {}", e)))?,
        );

        let response = self
            .client
            .post(self.listen_url())
            .headers(headers)
            .body(audio_data.to_vec())
            .send()
            .await
            .map_err(|e| ParleyError::Transcription(format!("Deepgram request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(ParleyError::Transcription(format!(
                "Deepgram error {}: {}",
                status, body
            )));
        }

        let raw_json = response.text().await.map_err(|e| {
            ParleyError::Transcription(format!("Failed to read Deepgram response: {}", e))
        })?;

        let utterances = parse_utterances(&raw_json)?;

        Ok(DeepgramTranscript {
            utterances,
            raw_json,
        })
    }
}

fn parse_utterances(raw_json: &str) -> Result<Vec<Utterance>> {
    let parsed: DeepgramResponse = serde_json::from_str(raw_json).map_err(|e| {
        ParleyError::Transcription(format!("Failed to parse Deepgram response: {}", e))
    })?;

    Ok(parsed
        .results
        .utterances
        .unwrap_or_default()
        .into_iter()
        .map(|u| Utterance {
            speaker: u.speaker.unwrap_or(0).to_string(),
            text: u.transcript,
        })
        .collect())
}
