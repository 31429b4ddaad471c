use thiserror::Error;

pub type Result<T> = std::result::Result<T, CatalogError>;

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Malformed store response: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Store request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("Store returned HTTP {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Invalid store configuration: {0}")]
    InvalidConfig(String),
}
