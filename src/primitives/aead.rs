//! AEAD primitive: AES-256-GCM (§4.1).
//!
//! `encrypt(K, N, pt, AD) -> ct||tag`; `decrypt(K, N, ct||tag, AD) -> pt | ⊥`.
//! This module never decides acceptance — it only reports success/failure
//! of one `Aes256Gcm` call. The covenant gate (`crate::gate`) is the only
//! caller permitted to turn a decrypt success into an `Accept`.

use aes_gcm::{
    aead::{Aead, Payload},
    Aes256Gcm, KeyInit, Nonce,
};

pub const KEY_LEN: usize = 32;
pub const NONCE_LEN: usize = 12;
pub const TAG_LEN: usize = 16;

/// Opaque failure — deliberately carries no information about *why*
/// encryption failed (it practically never does, for well-formed keys).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AeadError;

pub fn encrypt(
    key: &[u8; KEY_LEN],
    nonce: &[u8; NONCE_LEN],
    plaintext: &[u8],
    ad: &[u8],
) -> Result<Vec<u8>, AeadError> {
    let cipher = Aes256Gcm::new_from_slice(key).map_err(|_| AeadError)?;
    let n = Nonce::from_slice(nonce);
    cipher
        .encrypt(n, Payload { msg: plaintext, aad: ad })
        .map_err(|_| AeadError)
}

/// Returns `None` on any authentication failure — never a partial or
/// best-guess plaintext.
pub fn decrypt(
    key: &[u8; KEY_LEN],
    nonce: &[u8; NONCE_LEN],
    ciphertext: &[u8],
    ad: &[u8],
) -> Option<Vec<u8>> {
    let cipher = Aes256Gcm::new_from_slice(key).ok()?;
    let n = Nonce::from_slice(nonce);
    cipher.decrypt(n, Payload { msg: ciphertext, aad: ad }).ok()
}
