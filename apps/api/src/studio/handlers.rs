//! Axum route handlers for the per-view Studio API.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;

use crate::errors::AppError;
use crate::mediation::models::Tone;
use crate::state::AppState;
use crate::studio::controller::SubmitOutcome;
use crate::studio::{Feature, FeatureSnapshot};

#[derive(Debug, Deserialize)]
pub struct SubmitRequest {
    pub input: String,
    #[serde(default)]
    pub tone: Tone,
}

fn parse_feature(name: &str) -> Result<Feature, AppError> {
    name.parse::<Feature>().map_err(AppError::NotFound)
}

/// GET /api/v1/studio/:feature
pub async fn handle_snapshot(
    State(state): State<AppState>,
    Path(feature): Path<String>,
) -> Result<Json<FeatureSnapshot>, AppError> {
    let feature = parse_feature(&feature)?;
    Ok(Json(state.studio.snapshot(feature)))
}

/// POST /api/v1/studio/:feature/submit
///
/// 202 when a request was started; 200 when it was ignored (blank input or already pending).
pub async fn handle_submit(
    State(state): State<AppState>,
    Path(feature): Path<String>,
    Json(request): Json<SubmitRequest>,
) -> Result<(StatusCode, Json<SubmitOutcome>), AppError> {
    let feature = parse_feature(&feature)?;
    let outcome = state.studio.submit(feature, &request.input, request.tone);
    let status = match outcome {
        SubmitOutcome::Started { .. } => StatusCode::ACCEPTED,
        SubmitOutcome::Busy | SubmitOutcome::Blank => StatusCode::OK,
    };
    Ok((status, Json(outcome)))
}

/// DELETE /api/v1/studio/:feature
///
/// Leaving the view: cancels any in-flight request and resets to Idle.
pub async fn handle_teardown(
    State(state): State<AppState>,
    Path(feature): Path<String>,
) -> Result<StatusCode, AppError> {
    let feature = parse_feature(&feature)?;
    state.studio.teardown(feature);
    Ok(StatusCode::NO_CONTENT)
}
