//! Download API handler.

use std::sync::Arc;

use axum::{
    body::{Body, Bytes},
    extract::State,
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use tubedrop_core::{ArtifactDownload, DownloadError, DownloadRequest};

use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub kind: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

/// POST /api/download
///
/// Fetch the video and stream it back as an attachment.
///
/// Any Content-Type is accepted; unparseable bodies get the usual JSON error.
pub async fn download(State(state): State<Arc<AppState>>, body: Bytes) -> Response {
    let result = match parse_request(&body) {
        Ok(request) => state.orchestrator().handle_download(request).await,
        Err(e) => Err(e),
    };
    match result {
        Ok(download) => artifact_response(download),
        Err(e) => error_response(&e),
    }
}

/// An empty body is an empty request, which then fails URL validation.
fn parse_request(body: &[u8]) -> Result<DownloadRequest, DownloadError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(DownloadRequest::default());
    }
    serde_json::from_slice(body).map_err(|e| DownloadError::InvalidInput {
        reason: format!("Malformed request body: {}", e),
    })
}

fn artifact_response(download: ArtifactDownload) -> Response {
    (
        [
            (header::CONTENT_TYPE, download.content_type),
            (header::CONTENT_DISPOSITION, download.content_disposition),
            (header::CONTENT_LENGTH, download.size_bytes.to_string()),
        ],
        Body::from_stream(download.stream),
    )
        .into_response()
}

fn error_response(err: &DownloadError) -> Response {
    let status = if err.is_client_error() {
        StatusCode::BAD_REQUEST
    } else {
        StatusCode::INTERNAL_SERVER_ERROR
    };

    (
        status,
        Json(ErrorResponse {
            error: err.to_string(),
            kind: err.kind(),
            details: err.details(),
        }),
    )
        .into_response()
}
