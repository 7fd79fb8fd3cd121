//! API client error types

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ClientError {
    #[error("{resource} not found")]
    NotFound { resource: String },

    #[error("API error (HTTP {status}): {message}")]
    Api { status: u16, message: String },

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid endpoint {endpoint:?}: {message}")]
    InvalidEndpoint { endpoint: String, message: String },
}

impl ClientError {
    /// True when the service answered 404
    pub fn is_not_found(&self) -> bool {
        matches!(self, ClientError::NotFound { .. })
    }
}

pub type Result<T> = std::result::Result<T, ClientError>;
