use crate::error::CommerceResult;
use ema_types::{CartItem, DownloadFile, PaymentId, ProductId, PurchaseRecord, UserId};

/// Read access to the store's purchase, cart and file records.
///
/// Implementations must not mutate commerce state from any of these calls.
pub trait CommerceService: Send + Sync {
    /// Purchases made by `user`, or `None` when the store has none on record.
    fn users_purchases(&self, user: UserId) -> CommerceResult<Option<Vec<PurchaseRecord>>>;

    /// Cart lines of a payment.
    fn cart_details(&self, payment: PaymentId) -> CommerceResult<Vec<CartItem>>;

    /// Secret purchase key of a payment, used when issuing download links.
    fn payment_key(&self, payment: PaymentId) -> CommerceResult<String>;

    /// Files attached to a product, paired with their file index.
    fn download_files(&self, product: ProductId) -> CommerceResult<Vec<(u32, DownloadFile)>>;

    /// Public product page URL.
    fn permalink(&self, product: ProductId) -> CommerceResult<String>;
}

/// Everything needed to issue a download link for one file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadLinkRequest {
    pub payment_key: String,
    pub email: String,
    pub file_index: u32,
    pub product: ProductId,
    pub price_id: Option<u32>,
}

/// Issues download URLs for purchased files.
pub trait DownloadUrlIssuer: Send + Sync {
    fn download_url(&self, request: &DownloadLinkRequest) -> CommerceResult<String>;
}
