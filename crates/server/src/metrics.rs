//! Prometheus metrics for observability.
//!
//! HTTP request metrics live here; download and cleanup metrics come from
//! `tubedrop_core::metrics` and are registered into the same registry.

use once_cell::sync::Lazy;
use prometheus::{
    self, Encoder, HistogramOpts, HistogramVec, IntCounterVec, IntGauge, Opts, Registry,
    TextEncoder,
};

/// Global metrics registry.
pub static REGISTRY: Lazy<Registry> = Lazy::new(|| {
    let registry = Registry::new();
    register_metrics(&registry);
    registry
});

// =============================================================================
// HTTP Request Metrics
// =============================================================================

/// HTTP request duration in seconds.
pub static HTTP_REQUEST_DURATION: Lazy<HistogramVec> = Lazy::new(|| {
    HistogramVec::new(
        HistogramOpts::new(
            "tubedrop_http_request_duration_seconds",
            "HTTP request duration in seconds",
        )
        .buckets(vec![
            0.001, 0.005, 0.01, 0.05, 0.1, 0.5, 1.0, 5.0, 10.0, 30.0, 60.0, 300.0,
        ]),
        &["method", "path", "status"],
    )
    .unwrap()
});

/// HTTP requests total count.
pub static HTTP_REQUESTS_TOTAL: Lazy<IntCounterVec> = Lazy::new(|| {
    IntCounterVec::new(
        Opts::new("tubedrop_http_requests_total", "Total HTTP requests"),
        &["method", "path", "status"],
    )
    .unwrap()
});

/// HTTP requests currently in flight.
pub static HTTP_REQUESTS_IN_FLIGHT: Lazy<IntGauge> = Lazy::new(|| {
    IntGauge::new(
        "tubedrop_http_requests_in_flight",
        "Number of HTTP requests currently being processed",
    )
    .unwrap()
});

fn register_metrics(registry: &Registry) {
    registry
        .register(Box::new(HTTP_REQUEST_DURATION.clone()))
        .unwrap();
    registry
        .register(Box::new(HTTP_REQUESTS_TOTAL.clone()))
        .unwrap();
    registry
        .register(Box::new(HTTP_REQUESTS_IN_FLIGHT.clone()))
        .unwrap();
    tubedrop_core::metrics::register(registry).unwrap();
}

/// Encode all metrics in Prometheus text format.
pub fn encode_metrics() -> String {
    let encoder = TextEncoder::new();
    let metric_families = REGISTRY.gather();
    let mut buffer = Vec::new();
    encoder.encode(&metric_families, &mut buffer).unwrap();
    String::from_utf8(buffer).unwrap()
}

/// Maps a request path to a low-cardinality label.
///
/// API routes keep their path; everything served from the static directory
/// collapses into one label.
pub fn normalize_path(path: &str) -> String {
    match path {
        "/api/download" | "/api/health" | "/metrics" => path.to_string(),
        p if p.starts_with("/api/") => "/api/{unknown}".to_string(),
        _ => "/{static}".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_path() {
        assert_eq!(normalize_path("/api/download"), "/api/download");
        assert_eq!(normalize_path("/api/health"), "/api/health");
        assert_eq!(normalize_path("/metrics"), "/metrics");
        assert_eq!(normalize_path("/api/nope/123"), "/api/{unknown}");
        assert_eq!(normalize_path("/"), "/{static}");
        assert_eq!(normalize_path("/css/site.css"), "/{static}");
    }

    #[test]
    fn test_encode_includes_core_metrics() {
        tubedrop_core::metrics::DOWNLOADS_TOTAL
            .with_label_values(&["success"])
            .inc_by(0);
        HTTP_REQUESTS_TOTAL
            .with_label_values(&["GET", "/api/health", "200"])
            .inc();
        let text = encode_metrics();
        assert!(text.contains("tubedrop_http_requests_total"));
        assert!(text.contains("tubedrop_downloads_total"));
    }
}
