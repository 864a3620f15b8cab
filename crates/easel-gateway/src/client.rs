// HTTP client for the remote generation endpoint (HTTP direct, no SDK)

use std::time::Duration;

use async_trait::async_trait;
use base64::Engine;
use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE};
use serde::{Deserialize, Serialize};

use crate::error::{GatewayError, Result};
use crate::traits::ImageGenerator;

/// Image generation on the remote side can take minutes.
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(120);

#[derive(Debug, Serialize)]
struct GenerateRequest<'a> {
    prompt: &'a str,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    image_base64: Option<String>,
}

/// Client for the remote generation service.
///
/// Speaks the service's one-endpoint protocol: `POST {base_url}/generate`
/// with `{"prompt": ...}`, answered by `{"image_base64": ...}`.
pub struct HttpImageGenerator {
    http_client: reqwest::Client,
    base_url: String,
}

impl HttpImageGenerator {
    /// Create a new client against `base_url`.
    ///
    /// `timeout` bounds the whole outbound call; `None` applies the default.
    pub fn new(base_url: impl Into<String>, timeout: Option<Duration>) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let http_client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(timeout.unwrap_or(DEFAULT_TIMEOUT))
            .build()
            .map_err(|e| GatewayError::Upstream(e.to_string()))?;

        Ok(Self {
            http_client,
            base_url: base_url.into(),
        })
    }
}

#[async_trait]
impl ImageGenerator for HttpImageGenerator {
    async fn generate(&self, prompt: &str) -> Result<Vec<u8>> {
        let prompt = prompt.trim();
        if prompt.is_empty() {
            return Err(GatewayError::EmptyPrompt);
        }

        let url = format!("{}/generate", self.base_url);
        tracing::debug!(url = %url, "Sending prompt to generation service");

        let response = self
            .http_client
            .post(&url)
            .json(&GenerateRequest { prompt })
            .send()
            .await
            .map_err(|e| GatewayError::Upstream(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(GatewayError::Upstream(format!(
                "generation service returned {}: {}",
                status, body
            )));
        }

        let payload: GenerateResponse = response
            .json()
            .await
            .map_err(|e| GatewayError::Upstream(e.to_string()))?;

        let encoded = payload.image_base64.ok_or(GatewayError::MissingPayload)?;
        let bytes = base64::engine::general_purpose::STANDARD.decode(encoded.as_bytes())?;

        tracing::debug!(bytes = bytes.len(), "Decoded generated image");
        Ok(bytes)
    }
}
