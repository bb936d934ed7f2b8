//! Shared helpers for API tests.

#![allow(dead_code)]

use chrono::Duration;
use ema_api::{build_router, ApiState, SiteCatalog};
use ema_auth::{compute_hash, CredentialStore, MemoryMetaStore};
use ema_commerce::{CommerceService, DownloadUrlIssuer, PurchaseReporter, SignedUrlIssuer};
use ema_types::{UserAccount, UserId};
use std::sync::Arc;

pub const SITE_JSON: &str = r#"{
    "users": [
        { "id": 1, "email": "jane@example.com", "display_name": "Jane" },
        { "id": 2, "email": "newbie@example.com" }
    ],
    "commerce": {
        "products": [
            {
                "id": 10,
                "permalink": "https://shop.example.com/downloads/core/",
                "files": {
                    "0": { "name": "core.zip", "file": "https://cdn.example.com/core.zip" },
                    "1": { "file": "https://cdn.example.com/core-docs.pdf" }
                }
            },
            {
                "id": 11,
                "permalink": "https://shop.example.com/downloads/slack/",
                "files": { "0": { "file": "https://cdn.example.com/slack.zip" } }
            },
            {
                "id": 12,
                "permalink": "https://shop.example.com/downloads/mailchimp/",
                "files": { "0": { "file": "https://cdn.example.com/mailchimp.zip" } }
            }
        ],
        "payments": [
            {
                "id": 301,
                "user_id": 1,
                "title": "Payment 301",
                "slug": "payment-301",
                "guid": "https://shop.example.com/?p=301",
                "key": "key301",
                "cart": [
                    { "id": 10, "name": "Core", "item_number": { "id": 10 } },
                    { "id": 11, "name": "Slack", "item_number": { "id": 11, "options": { "price_id": 1 } } }
                ]
            },
            {
                "id": 302,
                "user_id": 1,
                "title": "Payment 302",
                "slug": "payment-302",
                "guid": "https://shop.example.com/?p=302",
                "key": "key302",
                "cart": [
                    { "id": 12, "name": "Mailchimp", "item_number": { "id": 12 } }
                ]
            }
        ]
    }
}"#;

/// A running test server plus handles to its collaborators.
pub struct TestSite {
    pub base: String,
    pub credentials: CredentialStore,
    pub issuer: Arc<SignedUrlIssuer>,
}

impl TestSite {
    pub fn addons_url(&self, query: &str) -> String {
        format!("{}/as-client/addons{}", self.base, query)
    }

    /// Issues keys for `id` and returns `(api_key, api_token)`.
    pub fn keys_for(&self, id: u64, email: &str) -> (String, String) {
        let account = UserAccount {
            id: UserId::new(id),
            email: email.into(),
            display_name: String::new(),
        };
        let cred = self.credentials.get_or_create(&account).unwrap();
        let token = compute_hash(&cred.public_key, &cred.private_key);
        (cred.public_key, token)
    }
}

pub fn issuer() -> Arc<SignedUrlIssuer> {
    Arc::new(SignedUrlIssuer::new("https://shop.example.com/", "secret", Duration::hours(1)).unwrap())
}

/// Spin up the HTTP server on an OS-assigned port.
pub async fn spawn_site() -> TestSite {
    let (users, commerce) = SiteCatalog::from_json(SITE_JSON)
        .unwrap()
        .into_services()
        .unwrap();
    spawn_with(Arc::new(users), Arc::new(commerce)).await
}

pub async fn spawn_with(
    users: Arc<dyn ema_auth::UserDirectory>,
    commerce: Arc<dyn CommerceService>,
) -> TestSite {
    let credentials = CredentialStore::new(Arc::new(MemoryMetaStore::new()));
    let issuer = issuer();
    let links: Arc<dyn DownloadUrlIssuer> = issuer.clone();
    let state = Arc::new(ApiState::new(
        users,
        credentials.clone(),
        PurchaseReporter::new(commerce, links),
    ));

    let app = build_router(state);
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .unwrap();
    let port = listener.local_addr().unwrap().port();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    TestSite {
        base: format!("http://127.0.0.1:{}", port),
        credentials,
        issuer,
    }
}
