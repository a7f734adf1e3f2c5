use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum GeminiError {
    #[error("gemini CLI not found in PATH")]
    GeminiNotFound,

    #[error("gemini CLI not found at path: {path}")]
    GeminiNotFoundAtPath { path: PathBuf },

    #[error("Invalid configuration: {message}")]
    InvalidConfiguration { message: String },

    #[error("failed to run gemini CLI: {source}")]
    SpawnError {
        command: String,
        #[source]
        source: std::io::Error,
    },

    #[error("gemini CLI timed out after {secs}s")]
    Timeout { secs: u64 },

    #[error("gemini CLI exited with code {code}: {stderr}")]
    ProcessFailed { code: i32, stderr: String },
}

pub type Result<T> = std::result::Result<T, GeminiError>;
