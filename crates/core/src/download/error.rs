//! Error types for the download orchestrator.

use thiserror::Error;

/// Why a download request did not produce a stream.
#[derive(Debug, Error)]
pub enum DownloadError {
    /// The request was rejected before anything ran.
    #[error("Invalid video URL")]
    InvalidInput { reason: String },

    /// The downloader ran and failed.
    #[error("Download failed")]
    DownloadFailed { details: String },

    /// The downloader reported success but no matching file exists.
    #[error("Downloaded file not found")]
    ArtifactNotFound { prefix: String },

    /// Scanning the downloads directory or opening the artifact failed.
    #[error("Failed to read downloaded file")]
    Io(#[from] std::io::Error),
}

impl DownloadError {
    /// Stable label for logs and metrics.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::InvalidInput { .. } => "invalid_input",
            Self::DownloadFailed { .. } => "download_failed",
            Self::ArtifactNotFound { .. } => "artifact_not_found",
            Self::Io(_) => "io_error",
        }
    }

    /// Extra text shown to the caller alongside the error message.
    pub fn details(&self) -> Option<String> {
        match self {
            Self::InvalidInput { reason } => Some(reason.clone()),
            Self::DownloadFailed { details } => Some(details.clone()),
            Self::ArtifactNotFound { .. } => None,
            Self::Io(e) => Some(e.to_string()),
        }
    }

    /// True for errors caused by the caller rather than the server.
    pub fn is_client_error(&self) -> bool {
        matches!(self, Self::InvalidInput { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kinds_and_details() {
        let err = DownloadError::InvalidInput {
            reason: "URL must contain one of: youtube.com".to_string(),
        };
        assert_eq!(err.kind(), "invalid_input");
        assert!(err.is_client_error());
        assert_eq!(err.to_string(), "Invalid video URL");

        let err = DownloadError::DownloadFailed {
            details: "ERROR: private video".to_string(),
        };
        assert_eq!(err.kind(), "download_failed");
        assert!(!err.is_client_error());
        assert_eq!(err.details().as_deref(), Some("ERROR: private video"));

        let err = DownloadError::ArtifactNotFound {
            prefix: "video_1-a_".to_string(),
        };
        assert_eq!(err.kind(), "artifact_not_found");
        assert!(err.details().is_none());
    }
}
