use crate::envelope::ApiResponse;
use crate::error::ApiError;
use crate::sanitize::{sanitize_identifier, sanitize_key};
use axum::extract::{RawQuery, State};
use axum::response::Json;
use ema_auth::{resolve_user, verify, AuthError, CredentialStore, UserDirectory, UserIdentifier};
use ema_commerce::PurchaseReporter;
use ema_types::Purchase;
use std::sync::Arc;
use tracing::debug;
use url::form_urlencoded;

/// Collaborators shared by every request.
pub struct ApiState {
    pub users: Arc<dyn UserDirectory>,
    pub credentials: CredentialStore,
    pub reporter: PurchaseReporter,
}

impl ApiState {
    #[must_use]
    pub fn new(
        users: Arc<dyn UserDirectory>,
        credentials: CredentialStore,
        reporter: PurchaseReporter,
    ) -> Self {
        Self {
            users,
            credentials,
            reporter,
        }
    }

    /// Authenticates the caller and returns their purchases.
    pub fn customer_addons(&self, credentials: &Credentials) -> Result<Vec<Purchase>, ApiError> {
        if credentials.is_empty() {
            return Err(AuthError::MissingCredentials.into());
        }

        let identifier =
            UserIdentifier::parse(&credentials.email).ok_or(AuthError::UserNotFound)?;
        let user = resolve_user(self.users.as_ref(), &identifier)?;
        let credential = self.credentials.get_or_create(&user)?;
        verify(&credential, &credentials.api_key, &credentials.api_token)?;

        debug!("Authenticated addons request for user {}", user.id);
        Ok(self.reporter.customer_purchases(&user)?)
    }
}

/// Raw query parameters of the addons route.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AddonsQuery {
    pub email: Option<String>,
    pub api_key: Option<String>,
    pub api_token: Option<String>,
}

impl AddonsQuery {
    /// Parses a query string. A repeated parameter keeps its last value and
    /// unknown parameters are ignored.
    #[must_use]
    pub fn parse(query: &str) -> Self {
        let mut parsed = Self::default();
        for (name, value) in form_urlencoded::parse(query.as_bytes()) {
            let slot = match name.as_ref() {
                "email" => &mut parsed.email,
                "api_key" => &mut parsed.api_key,
                "api_token" => &mut parsed.api_token,
                _ => continue,
            };
            *slot = Some(value.into_owned());
        }
        parsed
    }
}

/// Sanitized caller credentials. Absent parameters become empty strings.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Credentials {
    pub email: String,
    pub api_key: String,
    pub api_token: String,
}

impl Credentials {
    #[must_use]
    pub fn from_query(query: &AddonsQuery) -> Self {
        Self {
            email: query.email.as_deref().map(sanitize_identifier).unwrap_or_default(),
            api_key: query.api_key.as_deref().map(sanitize_key).unwrap_or_default(),
            api_token: query.api_token.as_deref().map(sanitize_key).unwrap_or_default(),
        }
    }

    /// True when none of the three parameters carries a value.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.email.is_empty() && self.api_key.is_empty() && self.api_token.is_empty()
    }
}

pub(crate) async fn get_customer_addons(
    State(state): State<Arc<ApiState>>,
    RawQuery(query): RawQuery,
) -> Result<Json<ApiResponse>, ApiError> {
    let query = AddonsQuery::parse(query.as_deref().unwrap_or_default());
    let credentials = Credentials::from_query(&query);
    // Meta store lookups may hit SQLite.
    let purchases =
        tokio::task::spawn_blocking(move || state.customer_addons(&credentials)).await??;
    Ok(Json(ApiResponse::success(purchases)))
}
