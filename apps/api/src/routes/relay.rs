//! Pass-through relays between clients and the rendering backend.
//!
//! No business logic lives here: forward, relay the answer, or normalize the failure.

use axum::{extract::State, Json};
use bytes::Bytes;
use serde_json::Value;
use tracing::info;

use crate::errors::{AppError, Relay};
use crate::backend::Relayed;
use crate::models::{FontList, GenerationResult};
use crate::state::AppState;

/// GET /api/fonts
///
/// Answers with the backend's body exactly as received.
pub async fn handle_fonts(State(state): State<AppState>) -> Result<Json<Value>, AppError> {
    let list: Relayed<FontList> = state
        .backend
        .list_fonts()
        .await
        .map_err(AppError::backend(Relay::Fonts))?;

    info!("Relayed font catalog ({} fonts)", list.parsed.count);
    Ok(Json(list.body))
}

/// POST /api/generate
///
/// The body only has to be JSON. Whether `text` is present is the caller's problem,
/// and an absent `font` is how callers ask the backend to choose one.
pub async fn handle_generate(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<Value>, AppError> {
    let body: Value = serde_json::from_slice(&body).map_err(|source| AppError::InvalidBody {
        relay: Relay::Generate,
        source,
    })?;

    let result = state
        .backend
        .generate(&body)
        .await
        .map_err(AppError::backend(Relay::Generate))?;

    Ok(relay_result(result, "generation"))
}

/// GET /api/random
pub async fn handle_random(State(state): State<AppState>) -> Result<Json<Value>, AppError> {
    let result = state
        .backend
        .random()
        .await
        .map_err(AppError::backend(Relay::Random))?;

    Ok(relay_result(result, "random generation"))
}

fn relay_result(result: Relayed<GenerationResult>, what: &str) -> Json<Value> {
    info!("Relayed {what} (font: {})", result.parsed.font_used);
    Json(result.body)
}
