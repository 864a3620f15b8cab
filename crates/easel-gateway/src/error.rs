use thiserror::Error;

#[derive(Error, Debug)]
pub enum GatewayError {
    #[error("No prompt provided.")]
    EmptyPrompt,

    #[error("Generation service error: {0}")]
    Upstream(String),

    #[error("No image returned from generation service")]
    MissingPayload,

    #[error("Invalid image payload: {0}")]
    Decode(#[from] base64::DecodeError),
}

pub type Result<T> = std::result::Result<T, GatewayError>;
