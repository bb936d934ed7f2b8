//! API key generation and request hashing.
//!
//! A client holds its public key and computes
//! `hex(SHA-256(public_key || private_key))` as the request token. Keys are
//! short lowercase-alphanumeric strings so they survive key sanitization
//! unchanged.

use rand::rngs::OsRng;
use rand::Rng;
use sha2::{Digest, Sha256};

/// Length of generated public and private keys.
pub const KEY_LENGTH: usize = 20;

/// Alphabet keys are drawn from.
pub const KEY_ALPHABET: &[u8] = b"abcdefghijklmnopqrstuvwxyz0123456789";

/// Generates a random key of `len` characters from [`KEY_ALPHABET`] using the
/// operating system's CSPRNG.
#[must_use]
pub fn generate_key(len: usize) -> String {
    let mut rng = OsRng;
    (0..len)
        .map(|_| char::from(KEY_ALPHABET[rng.gen_range(0..KEY_ALPHABET.len())]))
        .collect()
}

/// Computes the request hash for a public/private key pair.
#[must_use]
pub fn compute_hash(public_key: &str, private_key: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(public_key.as_bytes());
    hasher.update(private_key.as_bytes());
    hex::encode(hasher.finalize())
}
