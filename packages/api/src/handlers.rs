// ABOUTME: HTTP request handlers for specification generation, refinement, and history
// ABOUTME: Runs the pipeline, persists each invocation, and returns the specification

use axum::extract::{Query, State};
use axum::{Extension, Json};
use serde::{Deserialize, Serialize};
use tracing::info;

use speccraft_history::{RequestKind, SpecRequestRecord};
use speccraft_pipeline::Specification;

use crate::auth::CurrentUser;
use crate::error::ApiError;
use crate::AppState;

/// Request body for generating a specification.
#[derive(Debug, Deserialize)]
pub struct GenerateSpecRequest {
    pub requirement_text: String,
}

/// Request body for refining an existing specification.
#[derive(Debug, Deserialize)]
pub struct RefineSpecRequest {
    pub requirement_text: String,
    pub refinement_instructions: String,
    #[serde(default)]
    pub previous_spec: Option<Specification>,
}

#[derive(Debug, Deserialize)]
pub struct HistoryQuery {
    #[serde(default = "default_history_limit")]
    pub limit: i64,
}

fn default_history_limit() -> i64 {
    10
}

#[derive(Debug, Serialize)]
pub struct HistoryResponse {
    pub history: Vec<SpecRequestRecord>,
}

/// Generate a specification from requirement text.
pub async fn generate_spec(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Json(request): Json<GenerateSpecRequest>,
) -> Result<Json<Specification>, ApiError> {
    info!("Generating specification for user {}", user.0);

    let specification = state.pipeline.generate(&request.requirement_text).await;
    state
        .history
        .record(
            user.0,
            &request.requirement_text,
            &specification,
            RequestKind::Generate,
        )
        .await?;

    Ok(Json(specification))
}

/// Refine an existing specification with additional instructions.
pub async fn refine_spec(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Json(request): Json<RefineSpecRequest>,
) -> Result<Json<Specification>, ApiError> {
    info!("Refining specification for user {}", user.0);

    let specification = state
        .pipeline
        .refine(
            &request.requirement_text,
            &request.refinement_instructions,
            request.previous_spec.as_ref(),
        )
        .await;

    let input_text = format!(
        "{}\n\nRefinement: {}",
        request.requirement_text, request.refinement_instructions
    );
    state
        .history
        .record(user.0, &input_text, &specification, RequestKind::Refine)
        .await?;

    Ok(Json(specification))
}

/// Get the user's request history, newest first.
pub async fn get_history(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Query(query): Query<HistoryQuery>,
) -> Result<Json<HistoryResponse>, ApiError> {
    let history = state.history.recent(user.0, query.limit).await?;
    Ok(Json(HistoryResponse { history }))
}
