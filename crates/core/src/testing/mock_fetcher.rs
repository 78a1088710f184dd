//! Mock fetcher for testing.

use async_trait::async_trait;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::SystemTime;
use tokio::sync::RwLock;

use crate::fetcher::{FetchError, FetchJob, FetchOutput, MediaFetcher};

/// A file the mock "downloads" into the job's output template.
#[derive(Debug, Clone)]
pub struct MockOutput {
    /// Substituted for `%(title)s`.
    pub title: String,
    /// Substituted for `%(ext)s`.
    pub ext: String,
    pub contents: Vec<u8>,
    /// Modification time to stamp on the file; left alone when unset.
    pub modified: Option<SystemTime>,
}

impl MockOutput {
    pub fn new(title: &str, ext: &str, contents: Vec<u8>) -> Self {
        Self {
            title: title.to_string(),
            ext: ext.to_string(),
            contents,
            modified: None,
        }
    }

    pub fn modified_at(mut self, modified: SystemTime) -> Self {
        self.modified = Some(modified);
        self
    }

    /// Path this output lands at for a given yt-dlp template.
    pub fn render(&self, template: &str) -> PathBuf {
        PathBuf::from(
            template
                .replace("%(title)s", &self.title)
                .replace("%(ext)s", &self.ext),
        )
    }

    async fn write(&self, template: &str) -> std::io::Result<PathBuf> {
        let path = self.render(template);
        tokio::fs::write(&path, &self.contents).await?;
        if let Some(modified) = self.modified {
            let file = std::fs::File::options().write(true).open(&path)?;
            file.set_modified(modified)?;
        }
        Ok(path)
    }
}

/// Mock implementation of the MediaFetcher trait.
///
/// Provides controllable behavior for testing:
/// - Track fetch jobs for assertions
/// - Write configurable files where yt-dlp would have
/// - Simulate failure, optionally leaving a partial file behind
///
/// # Example
///
/// ```rust,ignore
/// use tubedrop_core::testing::{MockFetcher, MockOutput};
///
/// let fetcher = MockFetcher::new();
/// fetcher.set_outputs(vec![MockOutput::new("Clip", "mp4", b"bytes".to_vec())]).await;
///
/// // ... run a download through the orchestrator ...
///
/// let jobs = fetcher.recorded_jobs().await;
/// assert_eq!(jobs.len(), 1);
/// ```
#[derive(Debug, Default)]
pub struct MockFetcher {
    /// Recorded jobs.
    jobs: Arc<RwLock<Vec<FetchJob>>>,
    /// Files written on every successful fetch.
    outputs: Arc<RwLock<Vec<MockOutput>>>,
    /// File written before failing, to mimic an interrupted download.
    partial_output: Arc<RwLock<Option<MockOutput>>>,
    /// If set, the next fetch will fail with this error.
    next_error: Arc<RwLock<Option<FetchError>>>,
    /// Whether validate() reports the tool as missing.
    unavailable: Arc<RwLock<bool>>,
}

impl MockFetcher {
    /// Create a new mock fetcher that succeeds without writing anything.
    pub fn new() -> Self {
        Self::default()
    }

    /// Get all recorded jobs.
    pub async fn recorded_jobs(&self) -> Vec<FetchJob> {
        self.jobs.read().await.clone()
    }

    /// Get the number of fetches performed.
    pub async fn fetch_count(&self) -> usize {
        self.jobs.read().await.len()
    }

    /// Set the files written on each successful fetch.
    pub async fn set_outputs(&self, outputs: Vec<MockOutput>) {
        *self.outputs.write().await = outputs;
    }

    /// Set a file to write when a fetch fails.
    pub async fn set_partial_output(&self, output: Option<MockOutput>) {
        *self.partial_output.write().await = output;
    }

    /// Configure the next fetch to fail with the given error.
    pub async fn set_next_error(&self, error: FetchError) {
        *self.next_error.write().await = Some(error);
    }

    /// Make validate() fail as if the binary were missing.
    pub async fn set_unavailable(&self, unavailable: bool) {
        *self.unavailable.write().await = unavailable;
    }
}

#[async_trait]
impl MediaFetcher for MockFetcher {
    fn name(&self) -> &str {
        "mock"
    }

    async fn fetch(&self, job: FetchJob) -> Result<FetchOutput, FetchError> {
        self.jobs.write().await.push(job.clone());

        if let Some(error) = self.next_error.write().await.take() {
            if let Some(partial) = self.partial_output.read().await.as_ref() {
                partial.write(&job.output_template).await?;
            }
            return Err(error);
        }

        let mut lines = Vec::new();
        for output in self.outputs.read().await.iter() {
            let path = output.write(&job.output_template).await?;
            lines.push(format!("[download] Destination: {}", path.display()));
        }

        Ok(FetchOutput {
            stdout: lines.join("\n"),
            duration_ms: 0,
        })
    }

    async fn validate(&self) -> Result<(), FetchError> {
        if *self.unavailable.read().await {
            return Err(FetchError::BinaryNotFound {
                path: PathBuf::from("mock-yt-dlp"),
            });
        }
        Ok(())
    }
}
