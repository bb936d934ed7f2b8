//! Error types for the authentication layer.

use thiserror::Error;

/// Error code returned to callers for every rejected request.
pub const UNAUTHORIZED_CODE: &str = "unauthorized_access";

/// Error code returned to callers when a backing service fails.
pub const INTERNAL_CODE: &str = "internal_error";

/// Result type for authentication operations.
pub type AuthResult<T> = Result<T, AuthError>;

/// Errors that can occur while resolving or authenticating a caller.
///
/// The three rejection variants stay distinct for logging, but
/// [`AuthError::public_message`] renders them identically.
#[derive(Debug, Error)]
pub enum AuthError {
    /// No email, api key or api token was supplied.
    #[error("no credentials supplied")]
    MissingCredentials,

    /// No account matches the supplied identifier.
    #[error("user not found")]
    UserNotFound,

    /// The supplied hash does not match the stored private key.
    #[error("hash mismatch")]
    InvalidHash,

    /// User meta storage failed.
    #[error("storage error: {0}")]
    Storage(String),
}

impl AuthError {
    /// Returns true for every variant that means "caller is not allowed in".
    #[must_use]
    pub fn is_unauthorized(&self) -> bool {
        matches!(
            self,
            Self::MissingCredentials | Self::UserNotFound | Self::InvalidHash
        )
    }

    /// Machine-readable code returned in the error envelope.
    #[must_use]
    pub fn code(&self) -> &'static str {
        if self.is_unauthorized() {
            UNAUTHORIZED_CODE
        } else {
            INTERNAL_CODE
        }
    }

    /// Human-readable message returned in the error envelope.
    #[must_use]
    pub fn public_message(&self) -> &'static str {
        if self.is_unauthorized() {
            "Unauthorized access"
        } else {
            "Internal error"
        }
    }
}

impl From<rusqlite::Error> for AuthError {
    fn from(e: rusqlite::Error) -> Self {
        Self::Storage(e.to_string())
    }
}
