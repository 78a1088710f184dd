use bytes::Bytes;
use futures::Stream;
use std::io;
use std::path::PathBuf;
use std::pin::Pin;
use std::task::{Context, Poll};
use tokio::fs::File;
use tokio_util::io::ReaderStream;

use super::cleanup::CleanupScheduler;
use crate::metrics::BYTES_STREAMED;

/// Byte stream over an artifact that schedules its deletion once the stream
/// is done with it.
///
/// "Done" is the first of: end of file, a read error, or the stream being
/// dropped (client went away). Deletion is scheduled exactly once.
pub struct ArtifactStream {
    inner: ReaderStream<File>,
    pending_cleanup: Option<(PathBuf, CleanupScheduler)>,
}

impl ArtifactStream {
    pub fn new(file: File, path: PathBuf, cleanup: CleanupScheduler) -> Self {
        Self {
            inner: ReaderStream::new(file),
            pending_cleanup: Some((path, cleanup)),
        }
    }

    fn finish(&mut self) {
        if let Some((path, cleanup)) = self.pending_cleanup.take() {
            cleanup.schedule(path);
        }
    }
}

impl Stream for ArtifactStream {
    type Item = io::Result<Bytes>;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        let this = self.get_mut();
        let poll = Pin::new(&mut this.inner).poll_next(cx);
        match &poll {
            Poll::Ready(Some(Ok(chunk))) => BYTES_STREAMED.inc_by(chunk.len() as u64),
            Poll::Ready(Some(Err(_))) | Poll::Ready(None) => this.finish(),
            Poll::Pending => {}
        }
        poll
    }
}

impl Drop for ArtifactStream {
    fn drop(&mut self) {
        self.finish();
    }
}

impl std::fmt::Debug for ArtifactStream {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ArtifactStream")
            .field("cleanup_pending", &self.pending_cleanup.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::StreamExt;
    use std::time::Duration;
    use tempfile::TempDir;

    async fn open(dir: &TempDir, contents: &[u8]) -> (PathBuf, File) {
        let path = dir.path().join("video_9-ff_clip.mp4");
        std::fs::write(&path, contents).unwrap();
        let file = File::open(&path).await.unwrap();
        (path, file)
    }

    #[tokio::test]
    async fn test_streams_bytes_then_schedules_cleanup() {
        let dir = TempDir::new().unwrap();
        let contents: Vec<u8> = (0..200_000u32).map(|i| (i % 251) as u8).collect();
        let (path, file) = open(&dir, &contents).await;
        let cleanup = CleanupScheduler::new(Duration::from_millis(10));

        let mut stream = ArtifactStream::new(file, path.clone(), cleanup.clone());
        let mut received = Vec::new();
        while let Some(chunk) = stream.next().await {
            received.extend_from_slice(&chunk.unwrap());
        }
        assert_eq!(received, contents);
        assert_eq!(cleanup.pending(), 1);

        // Dropping after completion must not schedule a second deletion
        drop(stream);
        assert_eq!(cleanup.pending(), 1);

        cleanup.wait_idle().await;
        assert!(!path.exists());
    }

    #[tokio::test]
    async fn test_drop_midway_still_schedules_cleanup() {
        let dir = TempDir::new().unwrap();
        let contents = vec![7u8; 100_000];
        let (path, file) = open(&dir, &contents).await;
        let cleanup = CleanupScheduler::new(Duration::from_millis(10));

        let mut stream = ArtifactStream::new(file, path.clone(), cleanup.clone());
        let first = stream.next().await.unwrap().unwrap();
        assert!(!first.is_empty());
        assert_eq!(cleanup.pending(), 0);

        drop(stream);
        assert_eq!(cleanup.pending(), 1);

        cleanup.wait_idle().await;
        assert!(!path.exists());
    }
}
