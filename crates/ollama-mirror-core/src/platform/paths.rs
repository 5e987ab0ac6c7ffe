//! Platform-specific default directories.

use crate::error::{MirrorError, Result};
use std::path::PathBuf;

fn home_dir() -> Result<PathBuf> {
    dirs::home_dir().ok_or_else(|| MirrorError::Config {
        message: "Could not determine home directory".to_string(),
    })
}

/// Get the default Ollama models directory.
///
/// # Platform Behavior
/// - **Linux/macOS**: `~/.ollama/models`
/// - **Windows**: `%USERPROFILE%\.ollama\models`
pub fn default_ollama_dir() -> Result<PathBuf> {
    Ok(home_dir()?.join(".ollama").join("models"))
}

/// Get the default LM Studio models directory.
///
/// LM Studio keeps downloaded models under `~/.cache/lm-studio/models` on
/// every platform it ships for.
pub fn default_lmstudio_dir() -> Result<PathBuf> {
    Ok(home_dir()?.join(".cache").join("lm-studio").join("models"))
}
