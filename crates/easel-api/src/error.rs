use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use easel_gateway::GatewayError;
use easel_store::StoreError;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("No prompt provided.")]
    EmptyPrompt,

    #[error("Image not found")]
    ImageNotFound,

    #[error("No images found.")]
    NoImages,

    #[error("{0}")]
    Gateway(#[from] GatewayError),

    #[error("{0}")]
    Store(#[from] StoreError),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match self {
            ApiError::EmptyPrompt | ApiError::Gateway(GatewayError::EmptyPrompt) => {
                StatusCode::BAD_REQUEST
            }
            ApiError::ImageNotFound | ApiError::NoImages => StatusCode::NOT_FOUND,
            ApiError::Gateway(_) | ApiError::Store(_) => {
                tracing::error!("Request failed: {}", self);
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        let body = Json(json!({
            "error": self.to_string()
        }));

        (status, body).into_response()
    }
}

pub type ApiResult<T> = Result<T, ApiError>;
