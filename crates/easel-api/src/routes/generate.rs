use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use easel_store::{summarize, GenerationRecord, StatsSummary};

use crate::{
    error::{ApiError, ApiResult},
    state::AppState,
};

#[derive(Debug, Deserialize)]
pub struct GenerateRequest {
    #[serde(default)]
    pub prompt: String,
}

#[derive(Debug, Serialize)]
pub struct GenerateResponse {
    pub prompt: String,
    pub filename: String,
    pub image_url: String,
}

#[derive(Debug, Serialize)]
pub struct ClearResponse {
    pub message: String,
}

/// Generate an image from a text prompt.
///
/// Validates the prompt, proxies it to the generation service, stores the
/// decoded bytes and records the generation in the history log. Any failure
/// past validation is surfaced as a 500 carrying the error's description.
pub async fn generate_image(
    State(state): State<Arc<AppState>>,
    Json(req): Json<GenerateRequest>,
) -> ApiResult<Json<GenerateResponse>> {
    let prompt = req.prompt.trim().to_string();
    if prompt.is_empty() {
        return Err(ApiError::EmptyPrompt);
    }

    let bytes = state.generator.generate(&prompt).await?;
    let filename = state.images.save(&bytes).await?;
    let image_url = format!("/image/{}", filename);

    state
        .history
        .append(GenerationRecord::new(prompt.clone(), image_url.clone()))
        .await?;

    tracing::info!(filename = %filename, "Image generated");

    Ok(Json(GenerateResponse {
        prompt,
        filename,
        image_url,
    }))
}

/// Recent generations, newest first (up to 10).
pub async fn get_history(
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<Vec<GenerationRecord>>> {
    let log = state.history.load().await?;
    Ok(Json(log))
}

/// Drop the entire history log.
pub async fn clear_history(State(state): State<Arc<AppState>>) -> ApiResult<Json<ClearResponse>> {
    state.history.clear().await?;

    Ok(Json(ClearResponse {
        message: "History cleared.".to_string(),
    }))
}

/// Prompt usage summary over the current history log.
pub async fn get_stats(State(state): State<Arc<AppState>>) -> ApiResult<Json<StatsSummary>> {
    let log = state.history.load().await?;
    Ok(Json(summarize(&log)))
}
