//! yt-dlp based fetcher implementation.

use async_trait::async_trait;
use std::process::Stdio;
use std::time::Instant;
use tokio::process::Command;
use tokio::time::{timeout, Duration};
use tracing::{debug, info, warn};

use super::error::FetchError;
use super::traits::MediaFetcher;
use super::types::{FetchJob, FetchOutput};
use crate::config::FetcherConfig;

/// Runs yt-dlp as a child process, one invocation per job.
pub struct YtDlpFetcher {
    config: FetcherConfig,
}

impl YtDlpFetcher {
    /// Creates a new fetcher with the given configuration.
    pub fn new(config: FetcherConfig) -> Self {
        Self { config }
    }

    /// Creates a fetcher with default configuration.
    pub fn with_defaults() -> Self {
        Self::new(FetcherConfig::default())
    }

    /// Builds the yt-dlp argument vector for a job.
    fn build_args(&self, job: &FetchJob) -> Vec<String> {
        let mut args = vec![
            "-f".to_string(),
            job.format_selector.clone(),
            "--no-playlist".to_string(),
            "-o".to_string(),
            job.output_template.clone(),
        ];
        args.extend(self.config.extra_args.iter().cloned());
        // "--" keeps a URL starting with '-' from being read as an option
        args.push("--".to_string());
        args.push(job.url.clone());
        args
    }

    fn spawn_error(&self, e: std::io::Error) -> FetchError {
        if e.kind() == std::io::ErrorKind::NotFound {
            FetchError::BinaryNotFound {
                path: self.config.binary_path.clone(),
            }
        } else {
            FetchError::Io(e)
        }
    }
}

#[async_trait]
impl MediaFetcher for YtDlpFetcher {
    fn name(&self) -> &str {
        "yt-dlp"
    }

    async fn fetch(&self, job: FetchJob) -> Result<FetchOutput, FetchError> {
        let args = self.build_args(&job);
        info!(
            binary = %self.config.binary_path.display(),
            args = ?args,
            "Executing downloader"
        );

        let start = Instant::now();
        let mut command = Command::new(&self.config.binary_path);
        command
            .args(&args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);

        let output = match self.config.timeout_secs {
            Some(secs) => match timeout(Duration::from_secs(secs), command.output()).await {
                Ok(result) => result,
                Err(_) => {
                    // Dropping the output future kills the child
                    warn!(url = %job.url, timeout_secs = secs, "Downloader timed out");
                    return Err(FetchError::Timeout { timeout_secs: secs });
                }
            },
            None => command.output().await,
        }
        .map_err(|e| self.spawn_error(e))?;

        let stdout = String::from_utf8_lossy(&output.stdout).to_string();
        let stderr = String::from_utf8_lossy(&output.stderr).to_string();

        if !output.status.success() {
            return Err(FetchError::process_failed(
                format!("yt-dlp exited with code: {:?}", output.status.code()),
                if stderr.is_empty() { None } else { Some(stderr) },
            ));
        }

        debug!(stdout = %stdout, "Downloader finished");

        Ok(FetchOutput {
            stdout,
            duration_ms: start.elapsed().as_millis() as u64,
        })
    }

    async fn validate(&self) -> Result<(), FetchError> {
        let output = Command::new(&self.config.binary_path)
            .arg("--version")
            .output()
            .await
            .map_err(|e| self.spawn_error(e))?;

        if !output.status.success() {
            return Err(FetchError::process_failed(
                "yt-dlp --version failed",
                Some(String::from_utf8_lossy(&output.stderr).to_string()),
            ));
        }

        info!(
            version = %String::from_utf8_lossy(&output.stdout).trim(),
            "Downloader available"
        );
        Ok(())
    }
}
