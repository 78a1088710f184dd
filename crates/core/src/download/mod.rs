//! Request-scoped download lifecycle.
//!
//! One inbound request runs the downloader once, finds the file it wrote by
//! filename prefix, streams that file back and deletes it a fixed delay after
//! the stream ends.
//!
//! Files are named `video_{key}_{title}.{ext}` where `key` is a
//! [`CorrelationKey`]. The downloads directory is shared by all requests; the
//! prefix is the only thing keeping them apart.

mod artifact;
mod cleanup;
mod error;
mod orchestrator;
mod quality;
mod request;
mod stream;

pub use artifact::{content_disposition, find_artifact, Artifact, FALLBACK_CONTENT_TYPE};
pub use cleanup::CleanupScheduler;
pub use error::DownloadError;
pub use orchestrator::{ArtifactDownload, DownloadOrchestrator};
pub use quality::Quality;
pub use request::{is_allowed_url, CorrelationKey, DownloadRequest};
pub use stream::ArtifactStream;
