use std::fs;
use std::sync::Arc;
use std::time::Instant;

use axum::extract::{Multipart, State};
use axum::http::StatusCode;
use axum::response::{Html, Json};
use serde::Serialize;

use crate::error::{ParleyError, Result};
use crate::llm;
use crate::server::{error_status, pages, upload, AppState};
use crate::transcription::deepgram::DeepgramClient;
use crate::transcription::whisperx::WhisperXClient;
use crate::transcription::{audio_content_type, normalize, TranscriptionBackend};

/// Deepgram's raw response is persisted here, inside the upload directory,
/// overwritten on every audio request.
const DIAGNOSTICS_FILE: &str = "response.json";

/// Result of one upload: the canonical conversation text and the
/// per-speaker insights derived from it.
#[derive(Debug, Serialize)]
pub struct Analysis {
    pub conversation_text: String,
    pub insights: Vec<String>,
}

/// What to do with an upload, decided from `(file_type, api_type)`.
/// Unknown values fail here, before any backend is touched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum AnalysisMode {
    Text,
    Audio(TranscriptionBackend),
}

impl AnalysisMode {
    fn parse(file_type: &str, api_type: Option<&str>) -> Result<Self> {
        match file_type {
            "text" => Ok(Self::Text),
            "audio" => {
                let api_type = api_type.ok_or(ParleyError::MissingParameter("api_type"))?;
                Ok(Self::Audio(TranscriptionBackend::parse(api_type)?))
            }
            other => Err(ParleyError::InvalidFileType(other.to_string())),
        }
    }
}

/// Fields collected from the multipart upload
#[derive(Default)]
struct UploadForm {
    file: Option<(String, Vec<u8>)>,
    file_type: Option<String>,
    api_type: Option<String>,
}

async fn read_form(mut multipart: Multipart) -> Result<UploadForm> {
    let mut form = UploadForm::default();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ParleyError::Upload(e.to_string()))?
    {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "file" => {
                let filename = field.file_name().unwrap_or("upload").to_string();
                let data = field
                    .bytes()
                    .await
                    .map_err(|e| ParleyError::Upload(e.to_string()))?;
                form.file = Some((filename, data.to_vec()));
            }
            "file_type" => {
                form.file_type = Some(
                    field
                        .text()
                        .await
                        .map_err(|e| ParleyError::Upload(e.to_string()))?,
                );
            }
            "api_type" => {
                form.api_type = Some(
                    field
                        .text()
                        .await
                        .map_err(|e| ParleyError::Upload(e.to_string()))?,
                );
            }
            _ => {}
        }
    }

    Ok(form)
}

/// Run the full pipeline for one upload: validate, save the file, build the
/// conversation text (raw for text uploads, normalized transcript for
/// audio), then generate insights.
async fn analyze(state: &AppState, form: UploadForm) -> Result<Analysis> {
    let (filename, data) = form.file.ok_or(ParleyError::MissingParameter("file"))?;
    let file_type = form
        .file_type
        .ok_or(ParleyError::MissingParameter("file_type"))?;
    let mode = AnalysisMode::parse(&file_type, form.api_type.as_deref())?;

    let upload_dir = &state.config.server.upload_dir;
    let saved_path = upload::save_upload(upload_dir, &filename, &data)?;

    let conversation_text = match mode {
        AnalysisMode::Text => {
            let bytes = fs::read(&saved_path)?;
            String::from_utf8(bytes).map_err(|_| ParleyError::NotUtf8)?
        }
        AnalysisMode::Audio(backend) => {
            tracing::info!(backend = backend.as_str(), file = %filename, "Transcribing upload");
            let started = Instant::now();

            let text = match backend {
                TranscriptionBackend::Deepgram => {
                    let cfg = &state.config.transcription;
                    let api_key = cfg.deepgram_api_key.as_deref().ok_or_else(|| {
                        ParleyError::Config("Deepgram API key not configured".to_string())
                    })?;

                    let client = match &cfg.deepgram_url {
                        Some(url) => {
                            DeepgramClient::with_base_url(api_key, &cfg.deepgram_model, url)
                        }
                        None => DeepgramClient::new(api_key, &cfg.deepgram_model),
                    };

                    let transcript =
                        client.transcribe(&data, audio_content_type(&filename)).await?;
                    fs::write(upload_dir.join(DIAGNOSTICS_FILE), &transcript.raw_json)?;

                    normalize::from_utterances(&transcript.utterances)
                }
                TranscriptionBackend::WhisperX => {
                    let cfg = &state.config.transcription;
                    let base_url = cfg.whisperx_url.as_deref().ok_or_else(|| {
                        ParleyError::Config("WhisperX endpoint not configured".to_string())
                    })?;

                    let client = WhisperXClient::new(base_url, cfg);
                    let words = client.transcribe(data, &filename).await?;

                    normalize::from_word_segments(&words)
                }
            };

            tracing::debug!(elapsed_ms = started.elapsed().as_millis() as u64, "Transcription done");
            text
        }
    };

    let insights = llm::generate_insights(&state.config.llm, &conversation_text)
        .await
        .map_err(|e| ParleyError::Llm(e.to_string()))?;

    Ok(Analysis {
        conversation_text,
        insights,
    })
}

/// `GET /` - bare upload page
pub async fn index_page() -> Html<String> {
    Html(pages::render(None, None))
}

/// `POST /` - run the pipeline and render the result into the page.
/// Failures render as a user-facing message instead of an undefined result.
pub async fn index_upload(
    State(state): State<Arc<AppState>>,
    multipart: Multipart,
) -> (StatusCode, Html<String>) {
    let outcome = match read_form(multipart).await {
        Ok(form) => analyze(&state, form).await,
        Err(e) => Err(e),
    };

    match outcome {
        Ok(analysis) => (StatusCode::OK, Html(pages::render(Some(&analysis), None))),
        Err(e) => {
            let status = error_status(&e);
            (status, Html(pages::render(None, Some(&e.to_string()))))
        }
    }
}

/// `GET /api` - there is nothing to fetch; reply as if the upload were
/// missing, matching the POST validation
pub async fn api_usage() -> ParleyError {
    ParleyError::MissingParameter("file")
}

/// `POST /api` - run the pipeline and return
/// `{"conversation_text": ..., "insights": [...]}` or `{"error": ...}`
pub async fn api_upload(
    State(state): State<Arc<AppState>>,
    multipart: Multipart,
) -> Result<Json<Analysis>> {
    let form = read_form(multipart).await?;
    let analysis = analyze(&state, form).await?;
    Ok(Json(analysis))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mode_parse_text_ignores_api_type() {
        assert_eq!(
            AnalysisMode::parse("text", None).unwrap(),
            AnalysisMode::Text
        );
        assert_eq!(
            AnalysisMode::parse("text", Some("whisperx")).unwrap(),
            AnalysisMode::Text
        );
    }

    #[test]
    fn test_mode_parse_audio_backends() {
        assert_eq!(
            AnalysisMode::parse("audio", Some("deepgram")).unwrap(),
            AnalysisMode::Audio(TranscriptionBackend::Deepgram)
        );
        assert_eq!(
            AnalysisMode::parse("audio", Some("whisperx")).unwrap(),
            AnalysisMode::Audio(TranscriptionBackend::WhisperX)
        );
    }

    #[test]
    fn test_mode_parse_rejects_unknown_values() {
        assert!(matches!(
            AnalysisMode::parse("video", None),
            Err(ParleyError::InvalidFileType(_))
        ));
        assert!(matches!(
            AnalysisMode::parse("audio", Some("assemblyai")),
            Err(ParleyError::InvalidApiType(_))
        ));
        assert!(matches!(
            AnalysisMode::parse("audio", None),
            Err(ParleyError::MissingParameter("api_type"))
        ));
    }
}
