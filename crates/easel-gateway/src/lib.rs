pub mod client;
pub mod error;
pub mod traits;

pub use client::HttpImageGenerator;
pub use error::{GatewayError, Result};
pub use traits::ImageGenerator;
