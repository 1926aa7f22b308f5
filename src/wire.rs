//! Carrier framing (§6 "Wire format of the carrier").
//!
//! ```text
//! offset 0                          : NONCE_LEN (12) bytes — nonce or placeholder
//! offset NONCE_LEN                  : L bytes — AEAD ciphertext
//! offset NONCE_LEN+L                : TAG_LEN (16) bytes — AEAD tag
//! offset NONCE_LEN+L+TAG_LEN        : NSYM bytes — RS parity
//! offset NONCE_LEN+L+TAG_LEN+NSYM   : pad (fixed length, deterministic)
//! ```
//!
//! `[0, NONCE_LEN+L+TAG_LEN+NSYM)` is the codeword; padding sits outside it
//! and outside the permutation.

use crate::config::domain;
use crate::error::InvalidInput;
use crate::primitives::aead::{NONCE_LEN, TAG_LEN};
use crate::primitives::hash::domain_hash;
use crate::primitives::rs::RsCodec;

/// `NONCE_LEN + L + TAG_LEN + NSYM` for a payload that fits in one RS
/// block (invariant 2, §3); for payloads striped across several shortened
/// RS blocks (§4.1, `RsCodec`), this accounts for one `nsym` tax per
/// block rather than just one. Computed identically by encoder and
/// decoder from the declared length and `nsym` alone — no extra framing
/// carries the block count.
pub fn codeword_len(plaintext_len: usize, nsym: u16) -> usize {
    let payload_len = NONCE_LEN + plaintext_len + TAG_LEN;
    RsCodec::new(nsym).encoded_len(payload_len)
}

/// `H("GP/pad" ‖ H_{t-1} ‖ t_be)`, repeated to fill `len` bytes.
pub fn deterministic_pad(prev_hash: &[u8; 32], t: u64, len: usize) -> Vec<u8> {
    let digest = domain_hash(domain::PAD, &[prev_hash, &t.to_be_bytes()]);
    let mut out = Vec::with_capacity(len);
    while out.len() < len {
        let remaining = len - out.len();
        out.extend_from_slice(&digest[..remaining.min(digest.len())]);
    }
    out
}

/// `carrier := permuted_codeword ‖ deterministic_pad`, extended to
/// `frame_size` total bytes. Fails if the codeword alone already exceeds
/// `frame_size`.
pub fn build_carrier(
    permuted_codeword: &[u8],
    prev_hash: &[u8; 32],
    t: u64,
    frame_size: usize,
) -> Result<Vec<u8>, InvalidInput> {
    if frame_size < permuted_codeword.len() {
        return Err(InvalidInput::InvalidCodecParams);
    }
    let pad_len = frame_size - permuted_codeword.len();
    let mut carrier = Vec::with_capacity(frame_size);
    carrier.extend_from_slice(permuted_codeword);
    carrier.extend_from_slice(&deterministic_pad(prev_hash, t, pad_len));
    Ok(carrier)
}

/// Slices exactly `len_cw` bytes of codeword from `carrier`, discarding
/// anything beyond. If `carrier` is shorter than `len_cw`, returns an
/// all-zero dummy buffer of that length — decoding proceeds and fails at
/// the gate rather than short-circuiting on transport information (§4.6
/// step 2).
pub fn slice_codeword(carrier: &[u8], len_cw: usize) -> Vec<u8> {
    if carrier.len() >= len_cw {
        carrier[..len_cw].to_vec()
    } else {
        vec![0u8; len_cw]
    }
}
