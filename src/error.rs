//! Error taxonomy for the core (§7).
//!
//! Exactly one caller-visible error kind exists outside `VerifyResult`:
//! `InvalidInput`, raised only at the encoder/decoder entry points for
//! caller bugs (non-monotonic index, oversize plaintext, bad codec params).
//! Everything else — wrong key, wrong AAD, tampered carrier, noise beyond
//! the ECC radius, truncation — collapses into `Reject` inside
//! `VerifyResult` (see `gate.rs`). There is deliberately no `EccFailure`,
//! `DecodeError`, or `AuthenticationFailure` variant.

use core::fmt;

/// A caller-side mistake rejected before any cryptographic work happens.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvalidInput {
    /// Block index is not exactly one greater than the chain's current tip.
    NonMonotonicIndex { expected: u64, got: u64 },
    /// Plaintext exceeds the configured maximum for a single block.
    OversizePlaintext { len: usize, max: usize },
    /// `nsym` outside the supported tuning range (32..=128, even).
    InvalidCodecParams,
}

impl fmt::Display for InvalidInput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NonMonotonicIndex { expected, got } => {
                write!(f, "non-monotonic block index: expected {expected}, got {got}")
            }
            Self::OversizePlaintext { len, max } => {
                write!(f, "plaintext of {len} bytes exceeds maximum of {max} bytes")
            }
            Self::InvalidCodecParams => write!(f, "invalid codec parameters"),
        }
    }
}

impl std::error::Error for InvalidInput {}
