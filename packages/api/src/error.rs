// ABOUTME: Error types for the API package
// ABOUTME: Maps internal failures to HTTP responses; the pipeline itself never fails

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use thiserror::Error;
use tracing::error;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("History error: {0}")]
    History(#[from] speccraft_history::HistoryError),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        error!("Request failed: {}", self);
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "error": self.to_string() })),
        )
            .into_response()
    }
}
