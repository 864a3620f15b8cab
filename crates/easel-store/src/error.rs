use thiserror::Error;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Not found")]
    NotFound,

    #[error("Invalid filename: {0}")]
    InvalidFilename(String),

    #[error("History document error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Archive error: {0}")]
    Archive(#[from] zip::result::ZipError),
}

pub type Result<T> = std::result::Result<T, StoreError>;
