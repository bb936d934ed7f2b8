//! HMAC-signed, expiring download links.
//!
//! Links take the form
//! `{base}/index.php?download_key=..&email=..&file=..[&price_id=..]&download_id=..&ttl=..&token=..`
//! where `ttl` is the expiry as a unix timestamp and `token` is
//! `hex(HMAC-SHA256(secret, query-without-token))`.

use crate::error::{CommerceError, CommerceResult};
use crate::service::{DownloadLinkRequest, DownloadUrlIssuer};
use chrono::{DateTime, Duration, Utc};
use ema_types::ProductId;
use hmac::{Hmac, Mac};
use sha2::Sha256;
use url::{form_urlencoded, Url};

type HmacSha256 = Hmac<Sha256>;

/// Default lifetime of an issued link (24 hours).
pub const DEFAULT_LINK_TTL_SECS: i64 = 24 * 60 * 60;

const ENTRY_POINT: &str = "index.php";

/// Issues download links signed with a shared secret.
pub struct SignedUrlIssuer {
    base: Url,
    secret: Vec<u8>,
    link_ttl: Duration,
}

impl std::fmt::Debug for SignedUrlIssuer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SignedUrlIssuer")
            .field("base", &self.base.as_str())
            .field("secret", &"[REDACTED]")
            .field("link_ttl", &self.link_ttl)
            .finish()
    }
}

impl SignedUrlIssuer {
    /// Creates an issuer for links under `base` (e.g. `https://shop.example.com/`).
    pub fn new(base: &str, secret: impl Into<Vec<u8>>, link_ttl: Duration) -> CommerceResult<Self> {
        let secret = secret.into();
        if secret.is_empty() {
            return Err(CommerceError::Signing("signing secret is empty".to_string()));
        }
        if link_ttl <= Duration::zero() {
            return Err(CommerceError::Signing("link ttl must be positive".to_string()));
        }
        if Utc::now().checked_add_signed(link_ttl).is_none() {
            return Err(CommerceError::Signing("link ttl is out of range".to_string()));
        }

        let mut base = Url::parse(base)?;
        let path = format!("{}/{ENTRY_POINT}", base.path().trim_end_matches('/'));
        base.set_path(&path);
        base.set_query(None);
        base.set_fragment(None);

        Ok(Self {
            base,
            secret,
            link_ttl,
        })
    }

    /// Issues a link that expires `link_ttl` after `now`.
    pub fn download_url_at(
        &self,
        request: &DownloadLinkRequest,
        now: DateTime<Utc>,
    ) -> CommerceResult<String> {
        let expires = now
            .checked_add_signed(self.link_ttl)
            .ok_or_else(|| CommerceError::Signing("link expiry is out of range".to_string()))?
            .timestamp();

        let mut pairs = vec![
            ("download_key", request.payment_key.clone()),
            ("email", request.email.clone()),
            ("file", request.file_index.to_string()),
        ];
        if let Some(price_id) = request.price_id {
            pairs.push(("price_id", price_id.to_string()));
        }
        pairs.push(("download_id", request.product.to_string()));
        pairs.push(("ttl", expires.to_string()));

        let canonical = encode_pairs(pairs.iter().map(|(k, v)| (*k, v.as_str())));
        let token = self.sign(&canonical)?;

        let mut url = self.base.clone();
        url.set_query(Some(&format!("{canonical}&token={token}")));
        Ok(url.into())
    }

    /// Checks a link's signature and expiry, returning what it grants.
    pub fn verify_at(&self, link: &str, now: DateTime<Utc>) -> CommerceResult<DownloadLinkRequest> {
        let url = Url::parse(link)?;
        if url.origin() != self.base.origin() || url.path() != self.base.path() {
            return Err(CommerceError::InvalidLink("unexpected location".to_string()));
        }

        let mut token = None;
        let mut signed = Vec::new();
        for (key, value) in url.query_pairs() {
            if key == "token" {
                token = Some(value.into_owned());
            } else {
                signed.push((key.into_owned(), value.into_owned()));
            }
        }
        let token = token.ok_or_else(|| CommerceError::InvalidLink("missing token".to_string()))?;
        let token = hex::decode(token)
            .map_err(|e| CommerceError::InvalidLink(format!("malformed token: {e}")))?;

        let canonical = encode_pairs(signed.iter().map(|(k, v)| (k.as_str(), v.as_str())));
        self.mac()?
            .chain_update(canonical.as_bytes())
            .verify_slice(&token)
            .map_err(|_| CommerceError::InvalidLink("signature mismatch".to_string()))?;

        let field = |name: &str| {
            signed
                .iter()
                .find(|(k, _)| k == name)
                .map(|(_, v)| v.as_str())
                .ok_or_else(|| CommerceError::InvalidLink(format!("missing {name}")))
        };
        let number = |name: &str| -> CommerceResult<i64> {
            field(name)?
                .parse()
                .map_err(|_| CommerceError::InvalidLink(format!("malformed {name}")))
        };

        let expires = number("ttl")?;
        if expires < now.timestamp() {
            return Err(CommerceError::LinkExpired(expires));
        }

        let price_id = if signed.iter().any(|(k, _)| k == "price_id") {
            let raw = number("price_id")?;
            Some(
                u32::try_from(raw)
                    .map_err(|_| CommerceError::InvalidLink("malformed price_id".to_string()))?,
            )
        } else {
            None
        };
        let product = u64::try_from(number("download_id")?)
            .map_err(|_| CommerceError::InvalidLink("malformed download_id".to_string()))?;
        let file_index = u32::try_from(number("file")?)
            .map_err(|_| CommerceError::InvalidLink("malformed file".to_string()))?;

        Ok(DownloadLinkRequest {
            payment_key: field("download_key")?.to_string(),
            email: field("email")?.to_string(),
            file_index,
            product: ProductId::new(product),
            price_id,
        })
    }

    /// [`SignedUrlIssuer::verify_at`] against the current time.
    pub fn verify(&self, link: &str) -> CommerceResult<DownloadLinkRequest> {
        self.verify_at(link, Utc::now())
    }

    fn mac(&self) -> CommerceResult<HmacSha256> {
        HmacSha256::new_from_slice(&self.secret).map_err(|e| CommerceError::Signing(e.to_string()))
    }

    fn sign(&self, canonical: &str) -> CommerceResult<String> {
        let mac = self.mac()?.chain_update(canonical.as_bytes());
        Ok(hex::encode(mac.finalize().into_bytes()))
    }
}

impl DownloadUrlIssuer for SignedUrlIssuer {
    fn download_url(&self, request: &DownloadLinkRequest) -> CommerceResult<String> {
        self.download_url_at(request, Utc::now())
    }
}

fn encode_pairs<'a>(pairs: impl Iterator<Item = (&'a str, &'a str)>) -> String {
    form_urlencoded::Serializer::new(String::new())
        .extend_pairs(pairs)
        .finish()
}
