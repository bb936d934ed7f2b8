//! Purchase records, both as the commerce service reports them and as the
//! API returns them.

use crate::ids::{PaymentId, ProductId};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A completed purchase as returned by the commerce service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PurchaseRecord {
    pub id: PaymentId,
    pub title: String,
    pub slug: String,
    pub guid: String,
}

/// Price-tier options attached to a cart line.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemOptions {
    /// Variable-pricing tier. `None` for single-price products.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price_id: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemNumber {
    pub id: ProductId,
    #[serde(default = "default_quantity")]
    pub quantity: u32,
    #[serde(default)]
    pub options: ItemOptions,
}

/// One line of a payment's cart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartItem {
    pub id: ProductId,
    pub name: String,
    pub item_number: ItemNumber,
    #[serde(default)]
    pub item_price: f64,
    #[serde(default = "default_quantity")]
    pub quantity: u32,
    #[serde(default)]
    pub discount: f64,
    #[serde(default)]
    pub subtotal: f64,
    #[serde(default)]
    pub tax: f64,
    #[serde(default)]
    pub fees: Vec<serde_json::Value>,
    #[serde(default)]
    pub price: f64,
}

impl CartItem {
    /// Price tier bought on this line, if the product has variable pricing.
    #[must_use]
    pub fn price_id(&self) -> Option<u32> {
        self.item_number.options.price_id
    }
}

fn default_quantity() -> u32 {
    1
}

/// A file attached to a downloadable product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DownloadFile {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub file: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attachment_id: Option<u64>,
}

impl DownloadFile {
    /// Display name of the file: the configured name, or the last path
    /// segment of the file location when no name is set.
    #[must_use]
    pub fn file_name(&self) -> String {
        if let Some(name) = self.name.as_deref().map(str::trim).filter(|n| !n.is_empty()) {
            return name.to_string();
        }

        let path = self
            .file
            .split(['?', '#'])
            .next()
            .unwrap_or_default()
            .trim_end_matches('/');
        path.rsplit('/').next().unwrap_or(path).to_string()
    }
}

/// A cart line enriched with its product page and signed file links.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Download {
    #[serde(flatten)]
    pub item: CartItem,
    pub product_link: String,
    /// File name → signed download URL.
    pub download_links: BTreeMap<String, String>,
}

/// A purchase as returned to API callers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Purchase {
    #[serde(rename = "ID")]
    pub id: PaymentId,
    pub name: String,
    pub slug: String,
    pub guid: String,
    pub downloads: Vec<Download>,
}
