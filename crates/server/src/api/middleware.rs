//! Metrics middleware for all routes.

use axum::{body::Body, http::Request, middleware::Next, response::Response};
use prometheus::IntGauge;
use std::time::Instant;

use crate::metrics::{
    normalize_path, HTTP_REQUESTS_IN_FLIGHT, HTTP_REQUESTS_TOTAL, HTTP_REQUEST_DURATION,
};

/// Holds one unit of an in-flight gauge, released on drop.
///
/// The handler future can be dropped mid-await when the client disconnects,
/// so the decrement cannot sit after the `.await`.
struct InFlightGuard(IntGauge);

impl InFlightGuard {
    fn new(gauge: &IntGauge) -> Self {
        gauge.inc();
        Self(gauge.clone())
    }
}

impl Drop for InFlightGuard {
    fn drop(&mut self) {
        self.0.dec();
    }
}

/// Metrics middleware that tracks HTTP request duration and counts.
///
/// This middleware records:
/// - Request duration (histogram)
/// - Request count (counter)
/// - Requests in flight (gauge)
///
/// Duration covers time to response headers; streamed bodies keep flowing
/// after it is recorded.
pub async fn metrics_middleware(request: Request<Body>, next: Next) -> Response {
    let start = Instant::now();
    let method = request.method().to_string();
    let path = normalize_path(request.uri().path());

    let in_flight = InFlightGuard::new(&HTTP_REQUESTS_IN_FLIGHT);
    let response = next.run(request).await;
    drop(in_flight);

    let duration = start.elapsed().as_secs_f64();
    let status = response.status().as_u16().to_string();

    HTTP_REQUEST_DURATION
        .with_label_values(&[&method, &path, &status])
        .observe(duration);
    HTTP_REQUESTS_TOTAL
        .with_label_values(&[&method, &path, &status])
        .inc();

    response
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn gauge() -> IntGauge {
        IntGauge::new("test_in_flight", "test gauge").unwrap()
    }

    #[test]
    fn test_guard_counts_while_alive() {
        let gauge = gauge();
        let first = InFlightGuard::new(&gauge);
        let second = InFlightGuard::new(&gauge);
        assert_eq!(gauge.get(), 2);
        drop(first);
        assert_eq!(gauge.get(), 1);
        drop(second);
        assert_eq!(gauge.get(), 0);
    }

    #[tokio::test]
    async fn test_guard_released_when_request_future_is_dropped() {
        let gauge = gauge();
        let request = {
            let gauge = gauge.clone();
            async move {
                let _in_flight = InFlightGuard::new(&gauge);
                std::future::pending::<()>().await;
            }
        };

        // Stands in for a client that disconnects during a long download
        let result = tokio::time::timeout(Duration::from_millis(20), request).await;
        assert!(result.is_err());
        assert_eq!(gauge.get(), 0);
    }
}
