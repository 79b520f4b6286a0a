use crate::config::settings::ParleyConfig;
use crate::error::{ParleyError, Result};
use directories::ProjectDirs;
use std::fs;
use std::path::{Path, PathBuf};

/// Get XDG-compliant config directory
pub fn config_dir() -> Result<PathBuf> {
    ProjectDirs::from("", "", "parley")
        .map(|dirs| dirs.config_dir().to_path_buf())
        .ok_or_else(|| ParleyError::Config("Could not determine config directory".to_string()))
}

/// Get config file path
pub fn config_path() -> Result<PathBuf> {
    Ok(config_dir()?.join("config.toml"))
}

/// Load config from the default location, creating a default file if not exists
pub fn load_config() -> Result<ParleyConfig> {
    let path = config_path()?;

    if !path.exists() {
        let config = ParleyConfig::default();
        save_config(&config)?;
        return Ok(config);
    }

    read_config(&path)
}

/// Load config from an explicit path
pub fn load_config_from(path: &Path) -> Result<ParleyConfig> {
    if !path.exists() {
        return Err(ParleyError::ConfigNotFound(path.to_path_buf()));
    }
    read_config(path)
}

fn read_config(path: &Path) -> Result<ParleyConfig> {
    let content = fs::read_to_string(path)?;
    let config: ParleyConfig = toml::from_str(&content)?;
    Ok(config)
}

/// Save config to the default location
pub fn save_config(config: &ParleyConfig) -> Result<()> {
    let path = config_path()?;

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    let content = toml::to_string_pretty(config)?;
    fs::write(&path, content)?;
    Ok(())
}

/// Environment variables override file values so credentials never have to
/// live on disk.
pub fn apply_env_overrides(config: &mut ParleyConfig) {
    if let Ok(key) = std::env::var("PARLEY_DEEPGRAM_API_KEY") {
        config.transcription.deepgram_api_key = Some(key);
    }
    if let Ok(url) = std::env::var("PARLEY_WHISPERX_URL") {
        config.transcription.whisperx_url = Some(url);
    }
    if let Ok(key) = std::env::var("PARLEY_OPENAI_API_KEY") {
        config.llm.openai_api_key = Some(key);
    }
    if let Ok(model) = std::env::var("PARLEY_OPENAI_MODEL") {
        config.llm.openai_model = model;
    }
    if let Ok(dir) = std::env::var("PARLEY_UPLOAD_DIR") {
        config.server.upload_dir = PathBuf::from(dir);
    }
}
