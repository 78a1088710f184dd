//! Types for the fetcher module.

/// A single invocation of the external downloader.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchJob {
    /// Source page URL.
    pub url: String,
    /// yt-dlp `-f` expression.
    pub format_selector: String,
    /// yt-dlp `-o` template, including `%(title)s` and `%(ext)s` placeholders.
    pub output_template: String,
}

/// What the downloader reported on success.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FetchOutput {
    pub stdout: String,
    pub duration_ms: u64,
}
