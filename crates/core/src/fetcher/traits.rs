//! Trait definitions for the fetcher module.

use async_trait::async_trait;

use super::error::FetchError;
use super::types::{FetchJob, FetchOutput};

/// Something that can fetch a remote video into a local file.
///
/// Implementations write their output wherever `job.output_template` points;
/// callers locate the result themselves.
#[async_trait]
pub trait MediaFetcher: Send + Sync {
    /// Returns the name of this fetcher implementation.
    fn name(&self) -> &str;

    /// Runs one download to completion.
    async fn fetch(&self, job: FetchJob) -> Result<FetchOutput, FetchError>;

    /// Validates that the fetcher is properly configured and ready.
    async fn validate(&self) -> Result<(), FetchError>;
}
