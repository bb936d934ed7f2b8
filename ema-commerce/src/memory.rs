//! In-memory commerce service loaded from a JSON catalog.

use crate::error::{CommerceError, CommerceResult};
use crate::service::CommerceService;
use ema_types::{CartItem, DownloadFile, PaymentId, ProductId, PurchaseRecord, UserId};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

/// A downloadable product and its attached files.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductEntry {
    pub id: ProductId,
    pub permalink: String,
    /// File index → file.
    #[serde(default)]
    pub files: BTreeMap<u32, DownloadFile>,
}

/// A completed payment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaymentEntry {
    pub id: PaymentId,
    pub user_id: UserId,
    pub title: String,
    pub slug: String,
    pub guid: String,
    /// Secret purchase key.
    pub key: String,
    #[serde(default)]
    pub cart: Vec<CartItem>,
}

/// Serialized form of a store's products and payments.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CommerceCatalog {
    #[serde(default)]
    pub products: Vec<ProductEntry>,
    #[serde(default)]
    pub payments: Vec<PaymentEntry>,
}

impl CommerceCatalog {
    pub fn from_json(json: &str) -> CommerceResult<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

/// Read-only [`CommerceService`] over a [`CommerceCatalog`].
#[derive(Debug, Default)]
pub struct MemoryCommerce {
    products: HashMap<ProductId, ProductEntry>,
    payments: HashMap<PaymentId, PaymentEntry>,
    /// Payments per user, in catalog order.
    by_user: HashMap<UserId, Vec<PaymentId>>,
}

impl MemoryCommerce {
    /// Indexes a catalog. Every cart line must reference a known product and
    /// payment ids must be unique.
    pub fn from_catalog(catalog: CommerceCatalog) -> CommerceResult<Self> {
        let mut products = HashMap::new();
        for product in catalog.products {
            if products.insert(product.id, product).is_some() {
                return Err(CommerceError::Catalog("duplicate product id".to_string()));
            }
        }

        let mut payments = HashMap::new();
        let mut by_user: HashMap<UserId, Vec<PaymentId>> = HashMap::new();
        for payment in catalog.payments {
            if let Some(item) = payment.cart.iter().find(|i| !products.contains_key(&i.id)) {
                return Err(CommerceError::Catalog(format!(
                    "payment {} references unknown product {}",
                    payment.id, item.id
                )));
            }
            by_user.entry(payment.user_id).or_default().push(payment.id);
            if let Some(dup) = payments.insert(payment.id, payment) {
                return Err(CommerceError::Catalog(format!("duplicate payment id {}", dup.id)));
            }
        }

        Ok(Self {
            products,
            payments,
            by_user,
        })
    }

    fn payment(&self, id: PaymentId) -> CommerceResult<&PaymentEntry> {
        self.payments
            .get(&id)
            .ok_or_else(|| CommerceError::NotFound(format!("payment {id}")))
    }

    fn product(&self, id: ProductId) -> CommerceResult<&ProductEntry> {
        self.products
            .get(&id)
            .ok_or_else(|| CommerceError::NotFound(format!("product {id}")))
    }
}

impl CommerceService for MemoryCommerce {
    fn users_purchases(&self, user: UserId) -> CommerceResult<Option<Vec<PurchaseRecord>>> {
        let Some(ids) = self.by_user.get(&user) else {
            return Ok(None);
        };
        let records = ids
            .iter()
            .map(|id| {
                self.payment(*id).map(|p| PurchaseRecord {
                    id: p.id,
                    title: p.title.clone(),
                    slug: p.slug.clone(),
                    guid: p.guid.clone(),
                })
            })
            .collect::<CommerceResult<Vec<_>>>()?;
        Ok(Some(records))
    }

    fn cart_details(&self, payment: PaymentId) -> CommerceResult<Vec<CartItem>> {
        Ok(self.payment(payment)?.cart.clone())
    }

    fn payment_key(&self, payment: PaymentId) -> CommerceResult<String> {
        Ok(self.payment(payment)?.key.clone())
    }

    fn download_files(&self, product: ProductId) -> CommerceResult<Vec<(u32, DownloadFile)>> {
        Ok(self
            .product(product)?
            .files
            .iter()
            .map(|(index, file)| (*index, file.clone()))
            .collect())
    }

    fn permalink(&self, product: ProductId) -> CommerceResult<String> {
        Ok(self.product(product)?.permalink.clone())
    }
}
