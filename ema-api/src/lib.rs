//! HTTP API for the EDD Mini API.
//!
//! Exposes a single route, `GET /as-client/addons`, which authenticates the
//! caller from `email`, `api_key` and `api_token` query parameters and returns
//! their purchases wrapped in an [`ApiResponse`] envelope.

use std::sync::Arc;
use axum::{routing::get, Router};

mod catalog;
mod envelope;
mod error;
mod handler;
mod sanitize;

pub use catalog::SiteCatalog;
pub use envelope::{ApiResponse, ErrorBody};
pub use error::ApiError;
pub use handler::{AddonsQuery, ApiState, Credentials};
pub use sanitize::{sanitize_email, sanitize_identifier, sanitize_key};

/// Namespace all routes live under.
pub const API_NAMESPACE: &str = "/as-client";

/// Full path of the customer add-ons route.
pub const ADDONS_ROUTE: &str = "/as-client/addons";

/// Build the HTTP API router with the given shared state.
pub fn build_router(state: Arc<ApiState>) -> Router {
    let routes = Router::new().route("/addons", get(handler::get_customer_addons));
    Router::new().nest(API_NAMESPACE, routes).with_state(state)
}
