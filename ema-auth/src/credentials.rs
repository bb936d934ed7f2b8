//! Credential lookup, lazy issuance and request authentication.

use crate::error::{AuthError, AuthResult};
use crate::keys::{compute_hash, generate_key, KEY_LENGTH};
use crate::meta::UserMetaStore;
use ema_types::{UserAccount, UserCredential, UserId};
use std::sync::Arc;
use subtle::ConstantTimeEq;
use tracing::{debug, info};

/// Meta key holding a user's public key.
pub const PUBLIC_KEY_META: &str = "_ema_public_key";

/// Meta key holding a user's private key.
pub const PRIVATE_KEY_META: &str = "_ema_private_key";

/// Hands out the key pair stored against each user, issuing one on first use.
#[derive(Clone)]
pub struct CredentialStore {
    meta: Arc<dyn UserMetaStore>,
}

impl CredentialStore {
    #[must_use]
    pub fn new(meta: Arc<dyn UserMetaStore>) -> Self {
        Self { meta }
    }

    /// Loads the stored pair without issuing one.
    pub fn load(&self, user: UserId) -> AuthResult<Option<UserCredential>> {
        let public_key = self.read_key(user, PUBLIC_KEY_META)?;
        let private_key = self.read_key(user, PRIVATE_KEY_META)?;
        Ok(match (public_key, private_key) {
            (Some(public_key), Some(private_key)) => Some(UserCredential {
                user_id: user,
                public_key,
                private_key,
            }),
            _ => None,
        })
    }

    /// Returns the user's key pair, generating and storing one if either
    /// key is missing. Existing keys are never replaced.
    pub fn get_or_create(&self, user: &UserAccount) -> AuthResult<UserCredential> {
        if let Some(credential) = self.load(user.id)? {
            return Ok(credential);
        }

        let public_key = generate_key(KEY_LENGTH);
        let private_key = generate_key(KEY_LENGTH);
        self.meta.add_if_absent(
            user.id,
            &[
                (PUBLIC_KEY_META, public_key.as_str()),
                (PRIVATE_KEY_META, private_key.as_str()),
            ],
        )?;
        info!("Issued API keys for user {}", user.id);

        // Another request may have won the insert; report what is stored.
        self.load(user.id)?.ok_or_else(|| {
            AuthError::Storage(format!("keys for user {} missing after insert", user.id))
        })
    }

    fn read_key(&self, user: UserId, meta_key: &str) -> AuthResult<Option<String>> {
        Ok(self.meta.get(user, meta_key)?.filter(|k| !k.is_empty()))
    }
}

/// Returns true iff `supplied_hash` equals the hash of `supplied_public_key`
/// combined with the stored private key.
///
/// The stored public key does not take part in the check.
#[must_use]
pub fn authenticate(
    credential: &UserCredential,
    supplied_public_key: &str,
    supplied_hash: &str,
) -> bool {
    let expected = compute_hash(supplied_public_key, &credential.private_key);
    expected.as_bytes().ct_eq(supplied_hash.as_bytes()).into()
}

/// [`authenticate`], as a `Result`.
pub fn verify(
    credential: &UserCredential,
    supplied_public_key: &str,
    supplied_hash: &str,
) -> AuthResult<()> {
    if authenticate(credential, supplied_public_key, supplied_hash) {
        Ok(())
    } else {
        debug!("Hash mismatch for user {}", credential.user_id);
        Err(AuthError::InvalidHash)
    }
}
