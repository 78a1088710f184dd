//! Error types for the fetcher module.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while running the external downloader.
#[derive(Debug, Error)]
pub enum FetchError {
    /// Downloader binary not found.
    #[error("Downloader not found at path: {path}")]
    BinaryNotFound { path: PathBuf },

    /// The downloader ran and exited unsuccessfully.
    #[error("Download failed: {reason}")]
    ProcessFailed {
        reason: String,
        stderr: Option<String>,
    },

    /// The downloader exceeded the configured time limit and was killed.
    #[error("Download timed out after {timeout_secs} seconds")]
    Timeout { timeout_secs: u64 },

    /// I/O error while spawning or waiting on the process.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl FetchError {
    /// Creates a new process failed error with captured stderr.
    pub fn process_failed(reason: impl Into<String>, stderr: Option<String>) -> Self {
        Self::ProcessFailed {
            reason: reason.into(),
            stderr,
        }
    }

    /// Diagnostic text for the caller: captured stderr when there is any,
    /// otherwise the error message itself.
    pub fn diagnostics(&self) -> String {
        match self {
            Self::ProcessFailed {
                stderr: Some(stderr),
                ..
            } if !stderr.trim().is_empty() => stderr.clone(),
            other => other.to_string(),
        }
    }
}
