/// Error types for the gallery
///
/// Infrastructure failures (database, network, config) are collected here.
/// Navigation outcomes such as "photo not found" are not errors and live
/// in `state::navigation`.
use thiserror::Error;

#[derive(Debug, Error)]
pub enum GalleryError {
    #[error("catalog database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("http request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("invalid json: {0}")]
    Json(#[from] serde_json::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("backend is not configured: {0}")]
    Misconfigured(String),

    #[error("backend returned no site named '{0}'")]
    SiteNotFound(String),

    #[error("background task failed: {0}")]
    Join(#[from] tokio::task::JoinError),
}

pub type Result<T> = std::result::Result<T, GalleryError>;
