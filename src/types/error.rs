use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("rating must be between 1 and 5, got {0}")]
    InvalidRating(i64),
    #[error("unknown difficulty level: {0}")]
    UnknownDifficulty(String),
    #[error("unknown interaction event type: {0}")]
    UnknownEventType(String),
    #[error("invalid course id: {0}")]
    InvalidCourseId(String),
    #[error("invalid backend url: {0}")]
    InvalidBaseUrl(#[from] url::ParseError),
    #[error("failed to build http client: {0}")]
    HttpClient(#[from] reqwest::Error),
    #[error("failed to read bundled data {path}: {source}")]
    BundledData {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("malformed bundled data {path}: {source}")]
    BundledJson {
        path: PathBuf,
        source: serde_json::Error,
    },
}
