//! Testing utilities and mock implementations for E2E tests.
//!
//! This module provides a mock implementation of the downloader trait,
//! allowing end-to-end testing without yt-dlp or network access.
//!
//! # Example
//!
//! ```rust,ignore
//! use tubedrop_core::testing::{MockFetcher, MockOutput};
//!
//! let fetcher = Arc::new(MockFetcher::new());
//! fetcher.set_outputs(vec![MockOutput::new("Clip", "mp4", b"bytes".to_vec())]).await;
//!
//! let orchestrator = DownloadOrchestrator::new(&config.downloads, fetcher.clone());
//! ```

mod mock_fetcher;

pub use mock_fetcher::{MockFetcher, MockOutput};

/// Test fixtures and helper functions.
pub mod fixtures {
    use crate::config::{Config, DownloadsConfig, ServerConfig};
    use std::path::Path;

    /// A config rooted in `root`: downloads in `root/downloads`, static files
    /// in `root/public`, short cleanup delay.
    pub fn config_in(root: &Path, cleanup_delay_ms: u64) -> Config {
        Config {
            server: ServerConfig {
                static_dir: root.join("public"),
                ..Default::default()
            },
            downloads: DownloadsConfig {
                dir: root.join("downloads"),
                cleanup_delay_ms,
                ..Default::default()
            },
            ..Default::default()
        }
    }

    /// A stand-in for a small mp4 payload.
    pub fn video_bytes(len: usize) -> Vec<u8> {
        (0..len).map(|i| (i * 31 % 256) as u8).collect()
    }
}
