//! User accounts and the API credentials stored against them.

use crate::ids::UserId;
use serde::{Deserialize, Serialize};

/// A user account as exposed by the host platform's user directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserAccount {
    pub id: UserId,
    pub email: String,
    #[serde(default)]
    pub display_name: String,
}

/// The public/private key pair issued to a user.
///
/// The public key is handed to the client; the private key is only ever
/// combined with a supplied public key to recompute the request hash.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserCredential {
    pub user_id: UserId,
    pub public_key: String,
    pub private_key: String,
}

impl std::fmt::Debug for UserCredential {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UserCredential")
            .field("user_id", &self.user_id)
            .field("public_key", &self.public_key)
            .field("private_key", &"[REDACTED]")
            .finish()
    }
}
