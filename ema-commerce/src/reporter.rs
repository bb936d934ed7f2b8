//! Assembles a customer's purchases with download metadata.

use crate::error::CommerceResult;
use crate::service::{CommerceService, DownloadLinkRequest, DownloadUrlIssuer};
use ema_types::{CartItem, Download, PaymentId, Purchase, UserAccount};
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::debug;

/// Builds the purchase list returned to an authenticated customer.
#[derive(Clone)]
pub struct PurchaseReporter {
    commerce: Arc<dyn CommerceService>,
    issuer: Arc<dyn DownloadUrlIssuer>,
}

impl PurchaseReporter {
    #[must_use]
    pub fn new(commerce: Arc<dyn CommerceService>, issuer: Arc<dyn DownloadUrlIssuer>) -> Self {
        Self { commerce, issuer }
    }

    /// Every purchase made by `user`, each enriched with its downloads.
    ///
    /// A customer without purchases yields an empty list.
    pub fn customer_purchases(&self, user: &UserAccount) -> CommerceResult<Vec<Purchase>> {
        let Some(records) = self.commerce.users_purchases(user.id)? else {
            debug!("No purchases on record for user {}", user.id);
            return Ok(Vec::new());
        };

        records
            .into_iter()
            .map(|record| {
                Ok(Purchase {
                    downloads: self.customer_downloads(user, record.id)?,
                    id: record.id,
                    name: record.title,
                    slug: record.slug,
                    guid: record.guid,
                })
            })
            .collect()
    }

    fn customer_downloads(
        &self,
        user: &UserAccount,
        payment: PaymentId,
    ) -> CommerceResult<Vec<Download>> {
        let items = self.commerce.cart_details(payment)?;
        if items.is_empty() {
            return Ok(Vec::new());
        }
        let payment_key = self.commerce.payment_key(payment)?;

        items
            .into_iter()
            .map(|item| {
                Ok(Download {
                    product_link: self.commerce.permalink(item.id)?,
                    download_links: self.download_links(user, &payment_key, &item)?,
                    item,
                })
            })
            .collect()
    }

    fn download_links(
        &self,
        user: &UserAccount,
        payment_key: &str,
        item: &CartItem,
    ) -> CommerceResult<BTreeMap<String, String>> {
        let mut links = BTreeMap::new();
        for (file_index, file) in self.commerce.download_files(item.id)? {
            let request = DownloadLinkRequest {
                payment_key: payment_key.to_string(),
                email: user.email.clone(),
                file_index,
                product: item.id,
                price_id: item.price_id(),
            };
            links.insert(file.file_name(), self.issuer.download_url(&request)?);
        }
        Ok(links)
    }
}
