//! Prometheus metrics for core components.
//!
//! This module provides metrics for:
//! - Download outcomes and downloader run time
//! - Artifact cleanup
//! - Bytes streamed to callers
//!
//! The server registers these into its registry alongside the HTTP metrics.

use once_cell::sync::Lazy;
use prometheus::{HistogramOpts, HistogramVec, IntCounter, IntCounterVec, Opts};

// =============================================================================
// Download Metrics
// =============================================================================

/// Download requests by outcome.
pub static DOWNLOADS_TOTAL: Lazy<IntCounterVec> = Lazy::new(|| {
    IntCounterVec::new(
        Opts::new("tubedrop_downloads_total", "Total download requests"),
        &["result"], // "success", "invalid_input", "download_failed", "artifact_not_found", "io_error"
    )
    .unwrap()
});

/// Downloader run time in seconds.
pub static FETCH_DURATION: Lazy<HistogramVec> = Lazy::new(|| {
    HistogramVec::new(
        HistogramOpts::new(
            "tubedrop_fetch_duration_seconds",
            "Duration of the external downloader run",
        )
        .buckets(vec![1.0, 2.5, 5.0, 10.0, 30.0, 60.0, 120.0, 300.0, 600.0]),
        &["result"],
    )
    .unwrap()
});

/// Bytes of artifact data handed to the HTTP layer.
pub static BYTES_STREAMED: Lazy<IntCounter> = Lazy::new(|| {
    IntCounter::new(
        "tubedrop_bytes_streamed_total",
        "Total artifact bytes streamed to callers",
    )
    .unwrap()
});

// =============================================================================
// Cleanup Metrics
// =============================================================================

/// Artifact deletions by outcome.
pub static CLEANUPS_TOTAL: Lazy<IntCounterVec> = Lazy::new(|| {
    IntCounterVec::new(
        Opts::new("tubedrop_cleanups_total", "Total artifact deletions"),
        &["result"], // "deleted", "failed"
    )
    .unwrap()
});

/// Registers every core metric into `registry`.
pub fn register(registry: &prometheus::Registry) -> prometheus::Result<()> {
    registry.register(Box::new(DOWNLOADS_TOTAL.clone()))?;
    registry.register(Box::new(FETCH_DURATION.clone()))?;
    registry.register(Box::new(BYTES_STREAMED.clone()))?;
    registry.register(Box::new(CLEANUPS_TOTAL.clone()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_into_fresh_registry() {
        let registry = prometheus::Registry::new();
        register(&registry).unwrap();
        DOWNLOADS_TOTAL.with_label_values(&["success"]).inc();
        let names: Vec<String> = registry
            .gather()
            .iter()
            .map(|f| f.get_name().to_string())
            .collect();
        assert!(names.contains(&"tubedrop_downloads_total".to_string()));
    }

    #[test]
    fn test_double_register_fails() {
        let registry = prometheus::Registry::new();
        register(&registry).unwrap();
        assert!(register(&registry).is_err());
    }
}
