//! Commerce integration for the EDD Mini API.
//!
//! - [`CommerceService`] is the seam to the store's purchase, cart and file
//!   records; [`MemoryCommerce`] implements it over a JSON catalog
//! - [`DownloadUrlIssuer`] issues per-file download links;
//!   [`SignedUrlIssuer`] signs them with HMAC-SHA256 and an expiry
//! - [`PurchaseReporter`] turns a customer's payments into the enriched
//!   [`Purchase`](ema_types::Purchase) list returned by the API
//!
//! Nothing here mutates commerce state.

mod error;
mod memory;
mod reporter;
mod service;
mod signer;

pub use error::{CommerceError, CommerceResult};
pub use memory::{CommerceCatalog, MemoryCommerce, PaymentEntry, ProductEntry};
pub use reporter::PurchaseReporter;
pub use service::{CommerceService, DownloadLinkRequest, DownloadUrlIssuer};
pub use signer::{SignedUrlIssuer, DEFAULT_LINK_TTL_SECS};
