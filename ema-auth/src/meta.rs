//! Per-user key/value metadata storage.

use crate::error::{AuthError, AuthResult};
use ema_types::UserId;
use std::collections::HashMap;
use std::sync::Mutex;

/// Per-user metadata the host platform keeps alongside each account.
pub trait UserMetaStore: Send + Sync {
    /// Reads one value. Missing keys yield `Ok(None)`.
    fn get(&self, user: UserId, key: &str) -> AuthResult<Option<String>>;

    /// Stores every entry whose key is missing or empty for `user`.
    ///
    /// The whole batch is applied atomically. Existing non-empty values are
    /// never overwritten, so racing callers converge on the first write.
    fn add_if_absent(&self, user: UserId, entries: &[(&str, &str)]) -> AuthResult<()>;
}

/// In-memory meta store.
#[derive(Debug, Default)]
pub struct MemoryMetaStore {
    values: Mutex<HashMap<(UserId, String), String>>,
}

impl MemoryMetaStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> AuthResult<std::sync::MutexGuard<'_, HashMap<(UserId, String), String>>> {
        self.values
            .lock()
            .map_err(|_| AuthError::Storage("meta store lock poisoned".to_string()))
    }
}

impl UserMetaStore for MemoryMetaStore {
    fn get(&self, user: UserId, key: &str) -> AuthResult<Option<String>> {
        Ok(self.lock()?.get(&(user, key.to_string())).cloned())
    }

    fn add_if_absent(&self, user: UserId, entries: &[(&str, &str)]) -> AuthResult<()> {
        let mut values = self.lock()?;
        for (key, value) in entries {
            let slot = values.entry((user, (*key).to_string())).or_default();
            if slot.is_empty() {
                *slot = (*value).to_string();
            }
        }
        Ok(())
    }
}
