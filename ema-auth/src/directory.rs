//! User account lookup.

use crate::error::{AuthError, AuthResult};
use crate::identifier::UserIdentifier;
use ema_types::{UserAccount, UserId};
use std::collections::HashMap;

/// Read access to the host platform's user accounts.
pub trait UserDirectory: Send + Sync {
    /// Finds an account by email address (case-insensitive).
    fn find_by_email(&self, email: &str) -> Option<UserAccount>;

    /// Finds an account by numeric id.
    fn find_by_id(&self, id: UserId) -> Option<UserAccount>;
}

/// Resolves an identifier to an account.
pub fn resolve_user(
    directory: &dyn UserDirectory,
    identifier: &UserIdentifier,
) -> AuthResult<UserAccount> {
    let found = match identifier {
        UserIdentifier::Email(email) => directory.find_by_email(email),
        UserIdentifier::Id(id) => directory.find_by_id(*id),
    };
    found.ok_or(AuthError::UserNotFound)
}

/// In-memory user directory, typically loaded from a catalog file.
#[derive(Debug, Default, Clone)]
pub struct MemoryUserDirectory {
    by_id: HashMap<UserId, UserAccount>,
    by_email: HashMap<String, UserId>,
}

impl MemoryUserDirectory {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds or replaces an account.
    pub fn insert(&mut self, account: UserAccount) {
        if let Some(previous) = self.by_id.get(&account.id) {
            self.by_email.remove(&previous.email.to_lowercase());
        }
        self.by_email.insert(account.email.to_lowercase(), account.id);
        self.by_id.insert(account.id, account);
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.by_id.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.by_id.is_empty()
    }
}

impl FromIterator<UserAccount> for MemoryUserDirectory {
    fn from_iter<I: IntoIterator<Item = UserAccount>>(iter: I) -> Self {
        let mut directory = Self::new();
        for account in iter {
            directory.insert(account);
        }
        directory
    }
}

impl UserDirectory for MemoryUserDirectory {
    fn find_by_email(&self, email: &str) -> Option<UserAccount> {
        self.by_email
            .get(&email.to_lowercase())
            .and_then(|id| self.by_id.get(id))
            .cloned()
    }

    fn find_by_id(&self, id: UserId) -> Option<UserAccount> {
        self.by_id.get(&id).cloned()
    }
}
