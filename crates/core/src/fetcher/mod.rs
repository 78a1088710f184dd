//! Fetcher module for pulling remote videos onto local disk.
//!
//! The `MediaFetcher` trait is the seam between the download orchestrator and
//! the external downloader. `YtDlpFetcher` shells out to yt-dlp; tests use
//! `testing::MockFetcher` instead.
//!
//! # Example
//!
//! ```ignore
//! use tubedrop_core::fetcher::{FetchJob, MediaFetcher, YtDlpFetcher};
//!
//! let fetcher = YtDlpFetcher::with_defaults();
//! fetcher.validate().await?;
//!
//! let output = fetcher
//!     .fetch(FetchJob {
//!         url: "https://www.youtube.com/watch?v=dQw4w9WgXcQ".to_string(),
//!         format_selector: "best[ext=mp4]".to_string(),
//!         output_template: "downloads/video_1_%(title)s.%(ext)s".to_string(),
//!     })
//!     .await?;
//! println!("took {} ms", output.duration_ms);
//! ```

mod error;
mod traits;
mod types;
mod ytdlp;

pub use error::FetchError;
pub use traits::MediaFetcher;
pub use types::{FetchJob, FetchOutput};
pub use ytdlp::YtDlpFetcher;
