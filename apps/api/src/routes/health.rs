use axum::{extract::State, Json};
use serde_json::{json, Value};

use crate::llm_client::gemini::MODEL;
use crate::state::AppState;

/// GET /health
/// Returns a simple status object with service version and model settings.
pub async fn health_handler(State(state): State<AppState>) -> Json<Value> {
    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
        "service": "studio-api",
        "model": MODEL,
        "max_retries": state.config.retry.max_retries
    }))
}
