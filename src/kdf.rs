//! Per-block key and nonce schedule (§4.2).
//!
//! `K_t` is always derived from the master secret, the chain tip, and the
//! block index — never reused verbatim, never persisted. `N_t` is either
//! re-derived the same way (`NonceMode::Derived`) or drawn fresh and
//! carried in the codeword (`NonceMode::Random`); the decoder always uses
//! the carried nonce, it never falls back to re-deriving one.

use hkdf::Hkdf;
use rand_core::RngCore;
use sha2::Sha256;

use crate::config::{domain, KdfMode, NonceMode};
use crate::primitives::aead::{KEY_LEN, NONCE_LEN};
use crate::primitives::hash::domain_hash;

/// Derives `K_t` from the master secret `k_star`, the chain tip `h_prev`,
/// and the block index `t`.
pub fn derive_key(mode: KdfMode, k_star: &[u8], h_prev: &[u8; 32], t: u64) -> [u8; KEY_LEN] {
    match mode {
        KdfMode::Deterministic => {
            domain_hash(domain::KDF_DET, &[k_star, &t.to_be_bytes(), h_prev])
        }
        KdfMode::Hkdf => {
            let hk = Hkdf::<Sha256>::new(Some(h_prev), k_star);
            let info = [domain::KDF_INFO, &t.to_be_bytes()].concat();
            let mut out = [0u8; KEY_LEN];
            // `info` is short and fixed-shape; HKDF-Expand only fails when
            // the requested length exceeds 255 * hash_len, far above 32.
            hk.expand(&info, &mut out).expect("HKDF-Expand output length is within bounds");
            out
        }
    }
}

/// Derives `N_t` for `NonceMode::Derived`. Callers using `NonceMode::Random`
/// draw a nonce directly from the system RNG instead.
pub fn derive_nonce(key: &[u8; KEY_LEN], t: u64) -> [u8; NONCE_LEN] {
    let digest = domain_hash(domain::NONCE, &[key, &t.to_be_bytes()]);
    let mut out = [0u8; NONCE_LEN];
    out.copy_from_slice(&digest[..NONCE_LEN]);
    out
}

/// Draws a fresh random nonce for `NonceMode::Random`.
pub fn random_nonce() -> [u8; NONCE_LEN] {
    let mut out = [0u8; NONCE_LEN];
    rand::rngs::OsRng.fill_bytes(&mut out);
    out
}

/// Resolves the nonce for encoding under the configured mode.
pub fn nonce_for_encode(mode: NonceMode, key: &[u8; KEY_LEN], t: u64) -> [u8; NONCE_LEN] {
    match mode {
        NonceMode::Derived => derive_nonce(key, t),
        NonceMode::Random => random_nonce(),
    }
}
