use crate::error::Result;
use async_trait::async_trait;

/// Boundary to the external image-producing service.
///
/// Handlers depend on this trait rather than a concrete client so tests can
/// substitute an in-process stub for the remote endpoint.
#[async_trait]
pub trait ImageGenerator: Send + Sync {
    /// Produce an image for `prompt`, returning the raw decoded bytes.
    ///
    /// A prompt that is empty after trimming is rejected before any network
    /// call is made.
    async fn generate(&self, prompt: &str) -> Result<Vec<u8>>;
}
