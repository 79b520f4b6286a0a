use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Main configuration struct
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParleyConfig {
    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub transcription: TranscriptionConfig,

    #[serde(default)]
    pub llm: LlmConfig,
}

impl Default for ParleyConfig {
    fn default() -> Self {
        Self {
            server: ServerConfig::default(),
            transcription: TranscriptionConfig::default(),
            llm: LlmConfig::default(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Bind address
    #[serde(default = "default_host")]
    pub host: String,
    /// Bind port
    #[serde(default = "default_port")]
    pub port: u16,
    /// Directory where uploaded files are written (not cleaned up)
    #[serde(default = "default_upload_dir")]
    pub upload_dir: PathBuf,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            upload_dir: default_upload_dir(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TranscriptionConfig {
    pub deepgram_api_key: Option<String>,
    /// Deepgram model for prerecorded transcription
    #[serde(default = "default_deepgram_model")]
    pub deepgram_model: String,
    /// Base URL override for the Deepgram API (tests, proxies)
    pub deepgram_url: Option<String>,
    /// Base URL of a WhisperX serving endpoint
    pub whisperx_url: Option<String>,
    /// Speaker bounds passed to the diarizer
    #[serde(default = "default_min_speakers")]
    pub min_speakers: u32,
    #[serde(default = "default_max_speakers")]
    pub max_speakers: u32,
    /// Batch size for WhisperX inference
    #[serde(default = "default_batch_size")]
    pub batch_size: u32,
}

impl Default for TranscriptionConfig {
    fn default() -> Self {
        Self {
            deepgram_api_key: None,
            deepgram_model: default_deepgram_model(),
            deepgram_url: None,
            whisperx_url: None,
            min_speakers: default_min_speakers(),
            max_speakers: default_max_speakers(),
            batch_size: default_batch_size(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmConfig {
    /// OpenAI API key for insight generation
    pub openai_api_key: Option<String>,
    /// OpenAI model to use
    #[serde(default = "default_openai_model")]
    pub openai_model: String,
    /// Base URL override (OpenAI-compatible endpoints, tests)
    pub openai_base_url: Option<String>,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            openai_api_key: None,
            openai_model: default_openai_model(),
            openai_base_url: None,
        }
    }
}

impl LlmConfig {
    pub fn effective_base_url(&self) -> &str {
        self.openai_base_url
            .as_deref()
            .unwrap_or(crate::llm::openai::OPENAI_API_URL)
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    5001
}

fn default_upload_dir() -> PathBuf {
    PathBuf::from("uploads")
}

fn default_deepgram_model() -> String {
    "nova-2".to_string()
}

fn default_min_speakers() -> u32 {
    2
}

fn default_max_speakers() -> u32 {
    4
}

fn default_batch_size() -> u32 {
    4
}

fn default_openai_model() -> String {
    "gpt-3.5-turbo".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_creates() {
        let config = ParleyConfig::default();
        assert_eq!(config.server.port, 5001);
        assert_eq!(config.transcription.deepgram_model, "nova-2");
        assert_eq!(config.llm.openai_model, "gpt-3.5-turbo");
    }

    #[test]
    fn test_server_config_defaults() {
        let server = ServerConfig::default();
        assert_eq!(server.host, "0.0.0.0");
        assert_eq!(server.upload_dir, PathBuf::from("uploads"));
    }

    #[test]
    fn test_transcription_config_defaults() {
        let trans = TranscriptionConfig::default();
        assert!(trans.deepgram_api_key.is_none());
        assert!(trans.whisperx_url.is_none());
        assert_eq!(trans.min_speakers, 2);
        assert_eq!(trans.max_speakers, 4);
        assert_eq!(trans.batch_size, 4);
    }

    #[test]
    fn test_llm_base_url_override() {
        let mut llm = LlmConfig::default();
        assert_eq!(llm.effective_base_url(), "https://api.openai.com/v1");

        llm.openai_base_url = Some("http://127.0.0.1:9000/v1".to_string());
        assert_eq!(llm.effective_base_url(), "http://127.0.0.1:9000/v1");
    }
}
