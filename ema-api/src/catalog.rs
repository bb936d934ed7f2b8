//! Site catalog: the accounts and commerce records a server instance serves.

use ema_auth::MemoryUserDirectory;
use ema_commerce::{CommerceCatalog, CommerceResult, MemoryCommerce};
use ema_types::UserAccount;
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
pub struct SiteCatalog {
    #[serde(default)]
    pub users: Vec<UserAccount>,
    #[serde(default)]
    pub commerce: CommerceCatalog,
}

impl SiteCatalog {
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }

    /// Splits the catalog into a user directory and a commerce service.
    pub fn into_services(self) -> CommerceResult<(MemoryUserDirectory, MemoryCommerce)> {
        let users = self.users.into_iter().collect();
        let commerce = MemoryCommerce::from_catalog(self.commerce)?;
        Ok((users, commerce))
    }
}
