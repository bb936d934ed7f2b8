//! Caller authentication for the EDD Mini API.
//!
//! This crate handles:
//! - Resolving a caller identifier (email or numeric id) to an account
//! - Issuing a per-user public/private key pair on first use
//! - Verifying a request hash against the stored private key
//!
//! # Key Format
//!
//! Keys are 20 random characters from `[a-z0-9]`. A request carries the
//! public key and `hex(SHA-256(public_key || private_key))`.
//!
//! Keys live in per-user meta storage behind [`UserMetaStore`]. Issuance uses
//! a single atomic insert-if-absent, so concurrent first requests for the same
//! user all observe the same pair.

mod credentials;
mod directory;
mod error;
mod identifier;
mod keys;
mod meta;
mod sqlite;

pub use credentials::{
    authenticate, verify, CredentialStore, PRIVATE_KEY_META, PUBLIC_KEY_META,
};
pub use directory::{resolve_user, MemoryUserDirectory, UserDirectory};
pub use error::{AuthError, AuthResult, INTERNAL_CODE, UNAUTHORIZED_CODE};
pub use identifier::{is_domain_char, is_email, is_local_part_char, UserIdentifier};
pub use keys::{compute_hash, generate_key, KEY_ALPHABET, KEY_LENGTH};
pub use meta::{MemoryMetaStore, UserMetaStore};
pub use sqlite::SqliteMetaStore;
