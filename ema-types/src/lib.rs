//! Core type definitions for the EDD Mini API.
//!
//! This crate defines the types shared by the credential, commerce and HTTP
//! layers:
//! - Numeric identifiers for users, payments and products
//! - User accounts and their issued API key pairs
//! - Purchase records as reported by the commerce service, and the enriched
//!   purchase/download shapes returned to API callers

mod account;
mod ids;
mod purchase;

pub use account::{UserAccount, UserCredential};
pub use ids::{PaymentId, ProductId, UserId};
pub use purchase::{
    CartItem, Download, DownloadFile, ItemNumber, ItemOptions, Purchase, PurchaseRecord,
};

/// Result type alias using the crate's error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in type operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("invalid identifier: {0}")]
    InvalidId(#[from] std::num::ParseIntError),
}
