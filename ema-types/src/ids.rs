//! Numeric identifiers used by the account and commerce layers.
//!
//! The host platform hands out plain integer ids for users, payments and
//! products. Each gets its own newtype so they cannot be mixed up.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::num::ParseIntError;
use std::str::FromStr;

macro_rules! numeric_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(u64);

        impl $name {
            /// Wraps a raw id.
            #[must_use]
            pub const fn new(raw: u64) -> Self {
                Self(raw)
            }

            /// Returns the raw id.
            #[must_use]
            pub const fn get(&self) -> u64 {
                self.0
            }

            /// Parses an id from its decimal form.
            pub fn parse(s: &str) -> crate::Result<Self> {
                Ok(s.parse()?)
            }
        }

        impl From<u64> for $name {
            fn from(raw: u64) -> Self {
                Self(raw)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl FromStr for $name {
            type Err = ParseIntError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Ok(Self(s.trim().parse()?))
            }
        }
    };
}

numeric_id!(
    /// Identifier of a user account on the host platform.
    UserId
);

numeric_id!(
    /// Identifier of a payment (one completed purchase).
    PaymentId
);

numeric_id!(
    /// Identifier of a downloadable product.
    ProductId
);
