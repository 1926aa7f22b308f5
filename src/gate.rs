//! The covenant acceptance gate (§4.7) — the single indivisible predicate
//! deciding `Accept` vs `Reject`.
//!
//! `Plaintext`'s field is private to this module, so `VerifyResult::Accept`
//! can only ever be constructed here: no other module can name a
//! `Plaintext` value to put inside it. This turns requirement 1 of §4.7
//! ("the gate is the only construction site of `Accept`") into a
//! compile-time guarantee rather than a convention to audit for.

use crate::primitives::aead;

/// Accepted plaintext. Constructible only within `gate` — every other
/// module can move it around and read it via `as_bytes`/`into_bytes`, but
/// never produce one itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Plaintext(Vec<u8>);

impl Plaintext {
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.0
    }
}

/// The closed two-variant outcome (§3). No intermediate states, no
/// fallible field, immutable once constructed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VerifyResult {
    Accept(Plaintext),
    Reject,
}

impl VerifyResult {
    pub fn is_accept(&self) -> bool {
        matches!(self, VerifyResult::Accept(_))
    }

    pub fn plaintext(&self) -> Option<&[u8]> {
        match self {
            VerifyResult::Accept(pt) => Some(pt.as_bytes()),
            VerifyResult::Reject => None,
        }
    }
}

/// `gate(K, N, ciphertext, AD) -> VerifyResult`. Pure: no logging, no
/// timing side channel beyond `aead::decrypt`'s own, no global state.
pub fn gate(
    key: &[u8; aead::KEY_LEN],
    nonce: &[u8; aead::NONCE_LEN],
    ciphertext: &[u8],
    ad: &[u8],
) -> VerifyResult {
    match aead::decrypt(key, nonce, ciphertext, ad) {
        Some(plaintext) => VerifyResult::Accept(Plaintext(plaintext)),
        None => VerifyResult::Reject,
    }
}
