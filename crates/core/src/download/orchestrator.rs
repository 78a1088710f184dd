use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;
use tracing::{error, info, warn};

use super::artifact::find_artifact;
use super::cleanup::CleanupScheduler;
use super::error::DownloadError;
use super::request::{is_allowed_url, CorrelationKey, DownloadRequest};
use super::stream::ArtifactStream;
use crate::config::DownloadsConfig;
use crate::fetcher::{FetchJob, MediaFetcher};
use crate::metrics::{DOWNLOADS_TOTAL, FETCH_DURATION};

/// A located artifact, ready to be sent to the caller.
#[derive(Debug)]
pub struct ArtifactDownload {
    /// Caller-facing filename (correlation prefix stripped).
    pub file_name: String,
    pub content_type: String,
    pub content_disposition: String,
    pub size_bytes: u64,
    /// File contents. Deletion is scheduled when this stream ends or is dropped.
    pub stream: ArtifactStream,
}

/// Runs the download, locate, stream, delete lifecycle for single requests.
pub struct DownloadOrchestrator {
    fetcher: Arc<dyn MediaFetcher>,
    downloads_dir: PathBuf,
    allowed_hosts: Vec<String>,
    cleanup: CleanupScheduler,
}

impl DownloadOrchestrator {
    pub fn new(config: &DownloadsConfig, fetcher: Arc<dyn MediaFetcher>) -> Self {
        Self {
            fetcher,
            downloads_dir: config.dir.clone(),
            allowed_hosts: config.allowed_hosts.clone(),
            cleanup: CleanupScheduler::new(config.cleanup_delay()),
        }
    }

    pub fn downloads_dir(&self) -> &Path {
        &self.downloads_dir
    }

    pub fn cleanup(&self) -> &CleanupScheduler {
        &self.cleanup
    }

    pub fn fetcher_name(&self) -> &str {
        self.fetcher.name()
    }

    /// Creates the downloads directory if it does not exist yet.
    pub async fn ensure_downloads_dir(&self) -> std::io::Result<()> {
        tokio::fs::create_dir_all(&self.downloads_dir).await
    }

    /// Rejects URLs that do not mention an allowed host.
    pub fn validate_url(&self, url: &str) -> Result<(), DownloadError> {
        if is_allowed_url(url, &self.allowed_hosts) {
            Ok(())
        } else {
            Err(DownloadError::InvalidInput {
                reason: format!("URL must contain one of: {}", self.allowed_hosts.join(", ")),
            })
        }
    }

    /// Downloads the requested video and returns a stream over the result.
    pub async fn handle_download(
        &self,
        request: DownloadRequest,
    ) -> Result<ArtifactDownload, DownloadError> {
        let result = self.run(request).await;
        let label = match &result {
            Ok(_) => "success",
            Err(e) => e.kind(),
        };
        DOWNLOADS_TOTAL.with_label_values(&[label]).inc();
        result
    }

    async fn run(&self, request: DownloadRequest) -> Result<ArtifactDownload, DownloadError> {
        let quality = request.quality();
        info!(url = %request.url, quality = %quality, "Download request");

        self.validate_url(&request.url)?;

        let key = CorrelationKey::generate();
        let job = FetchJob {
            url: request.url,
            format_selector: quality.format_selector().to_string(),
            output_template: key.output_template(&self.downloads_dir),
        };

        let start = Instant::now();
        let fetched = self.fetcher.fetch(job).await;
        let elapsed = start.elapsed().as_secs_f64();

        match fetched {
            Ok(output) => {
                FETCH_DURATION.with_label_values(&["success"]).observe(elapsed);
                info!(key = %key, duration_ms = output.duration_ms, "Download completed");
            }
            Err(e) => {
                FETCH_DURATION.with_label_values(&["failed"]).observe(elapsed);
                // Partial files the downloader may have left are not removed here
                let details = e.diagnostics();
                error!(key = %key, error = %e, stderr = %details, "Download error");
                return Err(DownloadError::DownloadFailed { details });
            }
        }

        let prefix = key.file_prefix();
        let artifact = find_artifact(&self.downloads_dir, &prefix)
            .await?
            .ok_or_else(|| {
                warn!(prefix = %prefix, dir = %self.downloads_dir.display(), "No file matched prefix");
                DownloadError::ArtifactNotFound {
                    prefix: prefix.clone(),
                }
            })?;

        info!(
            path = %artifact.path.display(),
            size_bytes = artifact.size_bytes,
            "Serving downloaded file"
        );

        let file = tokio::fs::File::open(&artifact.path).await?;
        Ok(ArtifactDownload {
            content_type: artifact.content_type(),
            content_disposition: artifact.content_disposition(),
            size_bytes: artifact.size_bytes,
            stream: ArtifactStream::new(file, artifact.path.clone(), self.cleanup.clone()),
            file_name: artifact.display_name,
        })
    }
}
