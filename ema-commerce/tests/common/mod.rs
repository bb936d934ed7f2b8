//! Shared fixtures for commerce tests.

#![allow(dead_code)]

use chrono::Duration;
use ema_commerce::{CommerceCatalog, MemoryCommerce, SignedUrlIssuer};
use ema_types::{UserAccount, UserId};

pub const SECRET: &str = "test-signing-secret";

/// Two payments for user 1: the first buys a two-file product and a
/// single-file product on a price tier, the second buys a product with no files.
pub const CATALOG_JSON: &str = r#"{
    "products": [
        {
            "id": 10,
            "permalink": "https://shop.example.com/downloads/core/",
            "files": {
                "0": { "name": "Core ZIP", "file": "https://cdn.example.com/core-1.0.zip" },
                "1": { "file": "https://cdn.example.com/core-docs.pdf" }
            }
        },
        {
            "id": 11,
            "permalink": "https://shop.example.com/downloads/slack/",
            "files": {
                "0": { "file": "https://cdn.example.com/slack.zip?v=2" }
            }
        },
        {
            "id": 12,
            "permalink": "https://shop.example.com/downloads/support/"
        }
    ],
    "payments": [
        {
            "id": 301,
            "user_id": 1,
            "title": "Payment 301",
            "slug": "payment-301",
            "guid": "https://shop.example.com/?post_type=edd_payment&p=301",
            "key": "key301",
            "cart": [
                { "id": 10, "name": "Core", "item_number": { "id": 10 }, "price": 49.0 },
                {
                    "id": 11,
                    "name": "Slack",
                    "item_number": { "id": 11, "options": { "price_id": 2 } },
                    "price": 29.0
                }
            ]
        },
        {
            "id": 302,
            "user_id": 1,
            "title": "Payment 302",
            "slug": "payment-302",
            "guid": "https://shop.example.com/?post_type=edd_payment&p=302",
            "key": "key302",
            "cart": [
                { "id": 12, "name": "Support", "item_number": { "id": 12 } }
            ]
        },
        {
            "id": 303,
            "user_id": 2,
            "title": "Payment 303",
            "slug": "payment-303",
            "guid": "https://shop.example.com/?post_type=edd_payment&p=303",
            "key": "key303",
            "cart": []
        }
    ]
}"#;

pub fn catalog() -> CommerceCatalog {
    CommerceCatalog::from_json(CATALOG_JSON).unwrap()
}

pub fn commerce() -> MemoryCommerce {
    MemoryCommerce::from_catalog(catalog()).unwrap()
}

pub fn issuer() -> SignedUrlIssuer {
    SignedUrlIssuer::new("https://shop.example.com/", SECRET, Duration::hours(1)).unwrap()
}

pub fn buyer(id: u64) -> UserAccount {
    UserAccount {
        id: UserId::new(id),
        email: format!("buyer{id}@example.com"),
        display_name: String::new(),
    }
}
