//! Common test utilities for E2E testing with mocks.
//!
//! This module provides a test fixture that creates an in-process router
//! with a mock downloader injected, enabling end-to-end testing without
//! yt-dlp or network access.

#![allow(dead_code)]

use std::path::PathBuf;
use std::sync::Arc;

use axum::body::Body;
use axum::http::{HeaderMap, Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::Value;
use tempfile::TempDir;
use tower::ServiceExt;

use tubedrop_core::testing::MockFetcher;
use tubedrop_core::DownloadOrchestrator;

/// Re-export fixtures for test convenience
pub use tubedrop_core::testing::{fixtures, MockOutput};

/// Test fixture for E2E testing with a mock downloader.
///
/// # Example
///
/// ```rust,ignore
/// #[tokio::test]
/// async fn test_download() {
///     let fixture = TestFixture::new().await;
///     fixture.fetcher.set_outputs(vec![MockOutput::new("Clip", "mp4", b"x".to_vec())]).await;
///
///     let response = fixture.post("/api/download", json!({ "url": "https://youtu.be/x" })).await;
///     assert_eq!(response.status, 200);
/// }
/// ```
pub struct TestFixture {
    /// The Axum router for testing
    pub router: Router,
    /// Mock downloader - configure written files and failures
    pub fetcher: Arc<MockFetcher>,
    /// Orchestrator shared with the router, for awaiting cleanups
    pub orchestrator: Arc<DownloadOrchestrator>,
    /// Temporary root holding `downloads/` and `public/`
    pub temp_dir: TempDir,
}

/// Response from a test request
#[derive(Debug)]
pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub bytes: Vec<u8>,
    /// Body parsed as JSON, `Value::Null` when it is not JSON
    pub body: Value,
}

impl TestResponse {
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }
}

impl TestFixture {
    /// Create a new test fixture with a short cleanup delay.
    pub async fn new() -> Self {
        Self::with_cleanup_delay(50).await
    }

    /// Create a test fixture with a specific cleanup delay.
    pub async fn with_cleanup_delay(cleanup_delay_ms: u64) -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let config = fixtures::config_in(temp_dir.path(), cleanup_delay_ms);

        std::fs::create_dir_all(&config.server.static_dir).expect("Failed to create public dir");
        std::fs::write(
            config.server.static_dir.join("index.html"),
            "<!doctype html><title>tubedrop</title>",
        )
        .expect("Failed to write index.html");

        let fetcher = Arc::new(MockFetcher::new());
        let orchestrator = Arc::new(DownloadOrchestrator::new(
            &config.downloads,
            Arc::clone(&fetcher) as Arc<dyn tubedrop_core::MediaFetcher>,
        ));
        orchestrator
            .ensure_downloads_dir()
            .await
            .expect("Failed to create downloads dir");

        let state = Arc::new(tubedrop_server::state::AppState::new(
            config,
            Arc::clone(&orchestrator),
        ));
        let router = tubedrop_server::api::create_router(state);

        Self {
            router,
            fetcher,
            orchestrator,
            temp_dir,
        }
    }

    /// Downloads directory used by the orchestrator.
    pub fn downloads_dir(&self) -> PathBuf {
        self.orchestrator.downloads_dir().to_path_buf()
    }

    /// Names of all files currently in the downloads directory.
    pub fn download_files(&self) -> Vec<String> {
        let mut names: Vec<String> = std::fs::read_dir(self.downloads_dir())
            .expect("Failed to list downloads dir")
            .map(|e| e.unwrap().file_name().to_string_lossy().to_string())
            .collect();
        names.sort();
        names
    }

    /// Send a GET request to the test server.
    pub async fn get(&self, path: &str) -> TestResponse {
        self.request("GET", path, None).await
    }

    /// Send a POST request with JSON body.
    pub async fn post(&self, path: &str, body: Value) -> TestResponse {
        self.request("POST", path, Some(body)).await
    }

    /// Send a POST request with raw string body (for testing malformed JSON).
    pub async fn post_raw(&self, path: &str, body: &str) -> TestResponse {
        let request = Request::builder()
            .method("POST")
            .uri(path)
            .header("Content-Type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap();
        self.send(request).await
    }

    /// Send a request to the test server.
    async fn request(&self, method: &str, path: &str, body: Option<Value>) -> TestResponse {
        let mut request_builder = Request::builder().method(method).uri(path);

        let body = if let Some(json_body) = body {
            request_builder = request_builder.header("Content-Type", "application/json");
            Body::from(serde_json::to_vec(&json_body).unwrap())
        } else {
            Body::empty()
        };

        self.send(request_builder.body(body).unwrap()).await
    }

    /// Send an arbitrary request to the test server.
    pub async fn send(&self, request: Request<Body>) -> TestResponse {
        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("Failed to send request");

        let status = response.status();
        let headers = response.headers().clone();
        let bytes = response
            .into_body()
            .collect()
            .await
            .expect("Failed to collect body")
            .to_bytes()
            .to_vec();

        let body: Value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or(Value::Null)
        };

        TestResponse {
            status,
            headers,
            bytes,
            body,
        }
    }
}

/// Helper to assert a response has expected status.
#[macro_export]
macro_rules! assert_status {
    ($response:expr, $status:expr) => {
        assert_eq!(
            $response.status,
            $status,
            "Expected status {:?}, got {:?}. Body: {}",
            $status,
            $response.status,
            serde_json::to_string_pretty(&$response.body).unwrap_or_default()
        );
    };
}
