//! Commerce error types.

use thiserror::Error;

/// Result type for commerce operations.
pub type CommerceResult<T> = Result<T, CommerceError>;

/// Errors that can occur while reading purchase data or issuing links.
#[derive(Debug, Error)]
pub enum CommerceError {
    #[error("not found: {0}")]
    NotFound(String),

    #[error("download link signing failed: {0}")]
    Signing(String),

    #[error("invalid download link: {0}")]
    InvalidLink(String),

    #[error("download link expired at {0}")]
    LinkExpired(i64),

    #[error("invalid catalog: {0}")]
    Catalog(String),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("invalid URL: {0}")]
    Url(#[from] url::ParseError),
}
