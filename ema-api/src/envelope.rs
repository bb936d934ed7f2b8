//! Standard JSON envelope for every API response.

use ema_types::Purchase;
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct ErrorBody {
    pub code: String,
    pub message: String,
}

/// `{ "error": false, "data": [...] }` on success,
/// `{ "error": true, "data": [], "errors": { "code", "message" } }` on failure.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct ApiResponse<T = Purchase> {
    pub error: bool,
    pub data: Vec<T>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub errors: Option<ErrorBody>,
}

impl<T> ApiResponse<T> {
    #[must_use]
    pub fn success(data: Vec<T>) -> Self {
        Self {
            error: false,
            data,
            errors: None,
        }
    }

    #[must_use]
    pub fn failure(code: &str, message: &str) -> Self {
        Self {
            error: true,
            data: Vec::new(),
            errors: Some(ErrorBody {
                code: code.to_string(),
                message: message.to_string(),
            }),
        }
    }
}
