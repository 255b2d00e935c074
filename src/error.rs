use std::path::PathBuf;
use thiserror::Error;

/// Failures that can occur while fetching or parsing a single source.
///
/// A document whose layout changed is *not* an error: adapters leave their
/// menu set empty and log instead, since retrying cannot fix a structural
/// mismatch.
#[derive(Debug, Error)]
pub enum ScrapeError {
    #[error("http request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("renderer unavailable: {0}")]
    RendererUnavailable(String),

    #[error("timed out waiting for marker `{0}`")]
    RenderTimeout(String),

    #[error("renderer error: {0}")]
    Renderer(String),

    #[error("failed to read {path}: {source}")]
    DataFile {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("malformed data file: {0}")]
    Malformed(#[from] serde_json::Error),
}

/// Snapshot store and annotation failures.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed snapshot: {0}")]
    Json(#[from] serde_json::Error),
}
