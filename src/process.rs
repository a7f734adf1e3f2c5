use crate::error::{GeminiError, Result};
use std::path::PathBuf;
use which::which;

/// Find the Gemini CLI executable.
///
/// First checks the GEMINI_PATH environment variable. If set, uses that
/// path (with tilde expansion). Otherwise, searches PATH for 'gemini'.
pub async fn find_gemini_in_path() -> Result<PathBuf> {
    if let Ok(path_str) = std::env::var("GEMINI_PATH") {
        let path = expand_tilde(&path_str);
        if path.exists() {
            return Ok(path);
        } else {
            return Err(GeminiError::GeminiNotFoundAtPath { path });
        }
    }

    // Fall back to searching PATH
    tokio::task::spawn_blocking(|| which("gemini").map_err(|_| GeminiError::GeminiNotFound))
        .await
        .map_err(|_| GeminiError::GeminiNotFound)?
}

pub fn expand_tilde(path: &str) -> PathBuf {
    if let Some(stripped) = path.strip_prefix("~/")
        && let Some(home) = dirs::home_dir()
    {
        return home.join(stripped);
    }
    PathBuf::from(path)
}
