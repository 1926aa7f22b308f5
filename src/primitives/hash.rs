//! `H`: the single 32-byte domain-separated hash used throughout (§4.1).

use sha2::{Digest, Sha256};

pub const HASH_LEN: usize = 32;

/// `H(tag || parts[0] || parts[1] || ...)`.
///
/// Every call site supplies one of the `config::domain` tags as `tag` so
/// that two computations over coincidentally-identical bytes can never be
/// confused with each other.
pub fn domain_hash(tag: &[u8], parts: &[&[u8]]) -> [u8; HASH_LEN] {
    let mut hasher = Sha256::new();
    hasher.update(tag);
    for part in parts {
        hasher.update(part);
    }
    let digest = hasher.finalize();
    let mut out = [0u8; HASH_LEN];
    out.copy_from_slice(&digest);
    out
}
