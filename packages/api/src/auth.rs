// ABOUTME: Request identity middleware
// ABOUTME: Resolves the authenticated user id injected by the fronting auth layer

use axum::extract::Request;
use axum::http::StatusCode;
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use tracing::debug;

/// Header set by the fronting deployment after it has authenticated
/// the caller. Token issuance and verification live outside this
/// service.
pub const USER_ID_HEADER: &str = "x-user-id";

/// The authenticated user on whose behalf a request runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CurrentUser(pub i64);

/// Rejects requests without a resolvable user identity and attaches
/// `CurrentUser` for the handlers otherwise.
pub async fn require_user(mut request: Request, next: Next) -> Response {
    let user_id = request
        .headers()
        .get(USER_ID_HEADER)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.parse::<i64>().ok());

    match user_id {
        Some(id) => {
            debug!("Request authenticated as user {}", id);
            request.extensions_mut().insert(CurrentUser(id));
            next.run(request).await
        }
        None => (
            StatusCode::UNAUTHORIZED,
            Json(json!({ "error": format!("Missing or invalid {} header", USER_ID_HEADER) })),
        )
            .into_response(),
    }
}
