/// Error types shared across the application
///
/// Every error that can cross an iced message boundary is `Clone`,
/// so underlying causes are rendered to strings at the point of failure.

use std::path::PathBuf;
use thiserror::Error;

/// Failures while reading an uploaded photo
#[derive(Debug, Clone, Error, PartialEq)]
pub enum UploadError {
    #[error("failed to read {path}: {message}")]
    Read { path: PathBuf, message: String },

    #[error("{path} is empty")]
    Empty { path: PathBuf },
}

/// Failures while probing the model directory for a head asset
#[derive(Debug, Clone, Error, PartialEq)]
pub enum AssetError {
    #[error("model file not found: {0}")]
    NotFound(PathBuf),

    #[error("unsupported model format: {0}")]
    UnsupportedFormat(PathBuf),

    #[error("failed to parse {path}: {message}")]
    Parse { path: PathBuf, message: String },

    #[error("{0} contains no triangles")]
    NoGeometry(PathBuf),

    #[error("no loadable model among {tried} candidate(s)")]
    Exhausted { tried: usize },

    #[error("model load task failed: {0}")]
    Join(String),
}

/// Failures while downloading a gallery thumbnail
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ThumbnailError {
    #[error("request for {url} failed: {message}")]
    Request { url: String, message: String },

    #[error("failed to decode thumbnail from {url}: {message}")]
    Decode { url: String, message: String },
}

/// Failures while loading the configuration file
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config JSON: {0}")]
    Json(#[from] serde_json::Error),
}
