//! Block-indexed authenticated transport: an acceptance-gate + dual-chain
//! pipeline moving authenticated messages across an ordered, hash-linked
//! sequence of blocks over lossy or corrupted carriers.
//!
//! Acceptance is decided by exactly one predicate (`gate::gate`):
//! authenticated decryption succeeds, or it doesn't. Nothing about the
//! transport layer — noise tolerance, error-correction radius, carrier
//! length — ever feeds back into that decision. A message chain
//! (per-block AEAD) carries confidentiality and authenticity; a transport
//! chain (Reed–Solomon over an interleaved carrier) carries resilience;
//! a commitment chain (hash-linked public metadata) carries ordering and
//! tamper-evidence. The three are independent until the gate runs.
//!
//! Out of scope here, by design: key management, consensus/networking,
//! CLI and JSON framing, and any application layer built atop accepted
//! plaintext. Those are collaborators, not core.

pub mod aad;
pub mod canonical;
pub mod commitment;
pub mod config;
pub mod decoder;
pub mod encoder;
pub mod error;
pub mod gate;
pub mod kdf;
pub mod primitives;
pub mod wire;

pub use canonical::{StateValue, StructuredState};
pub use commitment::ChainState;
pub use config::{CodecParams, KdfMode, NonceMode, NSYM_DEFAULT, NSYM_MAX, NSYM_MIN};
pub use encoder::{EncodeOutput, EncodeRequest};
pub use decoder::{DecodeOutput, DecodeRequest};
pub use error::InvalidInput;
pub use gate::VerifyResult;

/// Session-fixed configuration: key-schedule mode, nonce mode, and codec
/// parameters are chosen once and never swapped per block (§9, "inject
/// concrete implementations at session start; do not allow runtime
/// swapping per block").
#[derive(Debug, Clone, Copy)]
pub struct Session {
    kdf_mode: KdfMode,
    nonce_mode: NonceMode,
    codec_params: CodecParams,
}

impl Session {
    pub fn new(kdf_mode: KdfMode, nonce_mode: NonceMode, codec_params: CodecParams) -> Self {
        Self { kdf_mode, nonce_mode, codec_params }
    }

    /// Encodes one block: `(carrier, new_prev_hash, availability_witness)`.
    pub fn encode(&self, req: EncodeRequest<'_>) -> Result<EncodeOutput, InvalidInput> {
        encoder::encode(req, self.kdf_mode, self.nonce_mode, self.codec_params)
    }

    /// Decodes one block. Never returns an error distinguishable from
    /// `Reject` (§6) — failures of every kind collapse into the returned
    /// `VerifyResult`.
    pub fn decode(&self, req: DecodeRequest<'_>) -> DecodeOutput {
        decoder::decode(req, self.kdf_mode, self.nonce_mode, self.codec_params)
    }
}
