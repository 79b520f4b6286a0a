use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ParleyError {
    #[error("Missing required parameter: {0}")]
    MissingParameter(&'static str),

    #[error("Invalid file_type: {0}")]
    InvalidFileType(String),

    #[error("Invalid api_type: {0}")]
    InvalidApiType(String),

    #[error("Uploaded file is not valid UTF-8 text")]
    NotUtf8,

    #[error("Upload error: {0}")]
    Upload(String),

    #[error("Transcription error: {0}")]
    Transcription(String),

    #[error("LLM error: {0}")]
    Llm(String),

    #[error("Config error: {0}")]
    Config(String),

    #[error("Config file not found: {0}")]
    ConfigNotFound(PathBuf),

    #[error("API error: {0}")]
    Api(String),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("TOML serialize error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl ParleyError {
    /// True when the request itself is at fault, as opposed to a backend
    /// or the service. The HTTP layer maps these to 400.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            Self::MissingParameter(_)
                | Self::InvalidFileType(_)
                | Self::InvalidApiType(_)
                | Self::NotUtf8
        )
    }
}

pub type Result<T> = std::result::Result<T, ParleyError>;
