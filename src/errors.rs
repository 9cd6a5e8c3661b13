// src/errors.rs
use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("Request to USGS failed: {0}")]
    Network(#[from] reqwest::Error),

    #[error("USGS returned HTTP {status} for {url}")]
    HttpStatus {
        status: reqwest::StatusCode,
        url: String,
    },

    #[error("Response body is not valid JSON: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Failed to write {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Configuration error: {0}")]
    Config(String),
}

impl FetchError {
    /// Failures on the remote side of the fetch. These are the only ones the
    /// log-and-continue policy is allowed to swallow.
    pub fn is_remote(&self) -> bool {
        matches!(
            self,
            FetchError::Network(_) | FetchError::HttpStatus { .. } | FetchError::Decode(_)
        )
    }

    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        FetchError::Io {
            path: path.into(),
            source,
        }
    }
}
