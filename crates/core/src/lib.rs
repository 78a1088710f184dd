pub mod config;
pub mod download;
pub mod fetcher;
pub mod metrics;
pub mod testing;

pub use config::{
    load_config, load_config_from_str, load_default_config, validate_config, Config, ConfigError,
    DownloadsConfig, FetcherConfig, ServerConfig,
};
pub use download::{
    ArtifactDownload, DownloadError, DownloadOrchestrator, DownloadRequest, Quality,
};
pub use fetcher::{FetchError, FetchJob, FetchOutput, MediaFetcher, YtDlpFetcher};
