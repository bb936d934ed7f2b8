//! Error types for the HTTP layer.

use crate::envelope::ApiResponse;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use ema_auth::{AuthError, INTERNAL_CODE};
use ema_commerce::CommerceError;
use thiserror::Error;
use tracing::{error, warn};

/// Errors that can end an API request.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error("commerce lookup failed: {0}")]
    Commerce(#[from] CommerceError),

    #[error("request task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

impl ApiError {
    /// - Rejected credentials: 401 Unauthorized
    /// - Storage, commerce or task faults: 500 Internal Server Error
    #[must_use]
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::Auth(e) if e.is_unauthorized() => StatusCode::UNAUTHORIZED,
            Self::Auth(_) | Self::Commerce(_) | Self::Task(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            Self::Auth(e) => e.code(),
            Self::Commerce(_) | Self::Task(_) => INTERNAL_CODE,
        }
    }

    #[must_use]
    pub fn public_message(&self) -> &'static str {
        match self {
            Self::Auth(e) => e.public_message(),
            Self::Commerce(_) | Self::Task(_) => "Internal error",
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status == StatusCode::UNAUTHORIZED {
            warn!("Rejected addons request: {}", self);
        } else {
            error!("Addons request failed: {}", self);
        }
        let body = ApiResponse::<()>::failure(self.code(), self.public_message());
        (status, Json(body)).into_response()
    }
}
