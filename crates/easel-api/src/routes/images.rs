use axum::{
    extract::{Path, State},
    http::header::{CONTENT_DISPOSITION, CONTENT_TYPE},
    response::IntoResponse,
};
use std::sync::Arc;

use easel_store::StoreError;

use crate::{
    error::{ApiError, ApiResult},
    state::AppState,
};

/// Serve a generated image by filename.
pub async fn get_image(
    State(state): State<Arc<AppState>>,
    Path(filename): Path<String>,
) -> ApiResult<impl IntoResponse> {
    let bytes = state.images.read(&filename).await.map_err(|e| match e {
        // A name trying to escape the store is indistinguishable from an
        // unknown image as far as the client is concerned.
        StoreError::NotFound | StoreError::InvalidFilename(_) => ApiError::ImageNotFound,
        other => ApiError::Store(other),
    })?;

    Ok(([(CONTENT_TYPE, "image/png")], bytes))
}

/// Bundle every stored image into a single zip download.
pub async fn download_all(State(state): State<Arc<AppState>>) -> ApiResult<impl IntoResponse> {
    let archive = state.images.archive_all().map_err(|e| match e {
        StoreError::NotFound => ApiError::NoImages,
        other => ApiError::Store(other),
    })?;

    Ok((
        [
            (CONTENT_TYPE, "application/zip"),
            (
                CONTENT_DISPOSITION,
                "attachment; filename=\"generated_images.zip\"",
            ),
        ],
        archive,
    ))
}
