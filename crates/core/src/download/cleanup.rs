use std::path::PathBuf;
use std::time::Duration;
use tokio::runtime::Handle;
use tokio_util::task::TaskTracker;
use tracing::{error, info, warn};

use crate::metrics::CLEANUPS_TOTAL;

/// Deletes served artifacts a fixed delay after their stream ends.
///
/// Deletions run as detached tasks; they are tracked so callers can wait for
/// the outstanding ones (tests, graceful shutdown). Failures are logged only.
#[derive(Debug, Clone)]
pub struct CleanupScheduler {
    delay: Duration,
    tracker: TaskTracker,
}

impl CleanupScheduler {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            tracker: TaskTracker::new(),
        }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Number of deletions scheduled but not yet finished.
    pub fn pending(&self) -> usize {
        self.tracker.len()
    }

    /// Schedules deletion of `path` after the configured delay.
    pub fn schedule(&self, path: PathBuf) {
        let Ok(handle) = Handle::try_current() else {
            warn!(path = %path.display(), "No runtime to schedule cleanup on, leaving file");
            return;
        };

        let delay = self.delay;
        self.tracker.spawn_on(
            async move {
                tokio::time::sleep(delay).await;
                match tokio::fs::remove_file(&path).await {
                    Ok(()) => {
                        CLEANUPS_TOTAL.with_label_values(&["deleted"]).inc();
                        info!(path = %path.display(), "File cleaned up");
                    }
                    Err(e) => {
                        CLEANUPS_TOTAL.with_label_values(&["failed"]).inc();
                        error!(path = %path.display(), error = %e, "Error deleting file");
                    }
                }
            },
            &handle,
        );
    }

    /// Waits until every deletion scheduled so far has run. New deletions may
    /// still be scheduled afterwards.
    pub async fn wait_idle(&self) {
        self.tracker.close();
        self.tracker.wait().await;
        self.tracker.reopen();
    }

    /// Waits for outstanding deletions before shutdown.
    pub async fn shutdown(&self) {
        self.tracker.close();
        self.tracker.wait().await;
    }
}
