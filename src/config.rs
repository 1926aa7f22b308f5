//! Session configuration (§4.2, §6 "Configuration surface").
//!
//! Selected once at session construction and never swapped per block — the
//! Design Notes in §9 single out "dynamic dispatch over AEAD/ECC... inject
//! concrete implementations at session start; do not allow runtime swapping
//! per block" as a pattern to avoid carrying over from the source.

use crate::error::InvalidInput;

/// Key-schedule mode, fixed for the lifetime of a `Session` (§4.2).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KdfMode {
    /// `K_t := H("GP/kdf-det" || K* || t_be || H_{t-1})`. Used for
    /// reproducibility tests (P1) — never for production traffic.
    Deterministic,
    /// HKDF-Extract-then-Expand with `salt = H_{t-1}`, `ikm = K*`,
    /// `info = "GP/kdf" || t_be`.
    Hkdf,
}

/// Nonce mode, fixed for the lifetime of a `Session` (§4.2, Open Questions).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NonceMode {
    /// `N_t` derived from `H("GP/nonce" || K_t || t_be)`. The carried
    /// nonce in the codeword is redundant but kept for uniform framing.
    Derived,
    /// `N_t` drawn from entropy at encode time and carried in the
    /// codeword. The decoder must use the carried nonce; it never falls
    /// back to the derived nonce on a missing/truncated carry (Open
    /// Questions, §9).
    Random,
}

/// RS parity count bounds (§4.1): `NSYM` even, tunable 32..=128.
pub const NSYM_MIN: u16 = 32;
pub const NSYM_MAX: u16 = 128;
pub const NSYM_DEFAULT: u16 = 64;

/// Codec/framing parameters carried into the public header (§6).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CodecParams {
    /// Reed–Solomon parity symbols per RS block.
    pub nsym: u16,
    /// Total carrier length, including deterministic padding. Must be at
    /// least the codeword length for any block encoded under these
    /// params, or encoding fails with `InvalidInput`.
    pub frame_size: usize,
}

impl CodecParams {
    pub fn new(nsym: u16, frame_size: usize) -> Result<Self, InvalidInput> {
        if nsym < NSYM_MIN || nsym > NSYM_MAX || nsym % 2 != 0 {
            return Err(InvalidInput::InvalidCodecParams);
        }
        Ok(Self { nsym, frame_size })
    }

    /// Default parity (64) with a caller-supplied frame size.
    pub fn with_frame_size(frame_size: usize) -> Self {
        Self { nsym: NSYM_DEFAULT, frame_size }
    }
}

/// Domain separation tags (§4.1). Every hash use is prefixed by one of
/// these ASCII constants so that no two logically distinct computations
/// can ever collide on the same hash input.
pub mod domain {
    pub const GENESIS: &[u8] = b"GP/genesis";
    pub const H_T: &[u8] = b"GP/H_t";
    pub const A_T: &[u8] = b"GP/A_t";
    pub const NONCE: &[u8] = b"GP/nonce";
    pub const KDF_DET: &[u8] = b"GP/kdf-det";
    pub const KDF_INFO: &[u8] = b"GP/kdf";
    pub const PERM: &[u8] = b"GP/perm";
    pub const PAD: &[u8] = b"GP/pad";
    pub const DIGEST: &[u8] = b"GP/digest";
    pub const CT_HASH: &[u8] = b"GP/ct";
}
