//! Axum route handlers for the one-shot mediation API.
//!
//! Each handler is a direct request/response call through the facade.
//! For the stateful per-view flow, see `studio::handlers`.

use axum::{extract::State, Json};
use serde::Deserialize;

use crate::errors::AppError;
use crate::mediation::models::{FullScript, Tone, TrendResult, VideoIdea, VideoMetadata};
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct TrendRequest {
    pub niche: String,
}

#[derive(Debug, Deserialize)]
pub struct IdeaRequest {
    pub topic: String,
}

#[derive(Debug, Deserialize)]
pub struct ScriptRequest {
    pub idea: String,
    #[serde(default)]
    pub tone: Tone,
}

#[derive(Debug, Deserialize)]
pub struct MetadataRequest {
    pub context: String,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/trends
pub async fn handle_trends(
    State(state): State<AppState>,
    Json(request): Json<TrendRequest>,
) -> Result<Json<TrendResult>, AppError> {
    Ok(Json(state.mediator.run_trends(&request.niche).await?))
}

/// POST /api/v1/ideas
pub async fn handle_ideas(
    State(state): State<AppState>,
    Json(request): Json<IdeaRequest>,
) -> Result<Json<Vec<VideoIdea>>, AppError> {
    Ok(Json(state.mediator.run_ideas(&request.topic).await?))
}

/// POST /api/v1/script
///
/// `tone` is optional and defaults to "Engaging and High Energy".
pub async fn handle_script(
    State(state): State<AppState>,
    Json(request): Json<ScriptRequest>,
) -> Result<Json<FullScript>, AppError> {
    Ok(Json(
        state
            .mediator
            .run_script(&request.idea, request.tone)
            .await?,
    ))
}

/// POST /api/v1/metadata
pub async fn handle_metadata(
    State(state): State<AppState>,
    Json(request): Json<MetadataRequest>,
) -> Result<Json<VideoMetadata>, AppError> {
    Ok(Json(state.mediator.run_metadata(&request.context).await?))
}
