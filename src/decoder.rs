//! Decoder pipeline (§4.6): `carrier -> RS-decode -> de-interleave ->
//! candidate -> gate(candidate, AD) -> {Accept(plaintext) | Reject}`.

use crate::aad;
use crate::canonical::StructuredState;
use crate::commitment::ChainState;
use crate::config::{CodecParams, KdfMode, NonceMode};
use crate::gate::{self, VerifyResult};
use crate::kdf;
use crate::primitives::{aead, permute, rs::RsCodec};
use crate::wire;
use zeroize::Zeroizing;

pub struct DecodeRequest<'a> {
    pub carrier: &'a [u8],
    pub block_index: u64,
    pub prev_hash: [u8; 32],
    pub state: &'a StructuredState,
    pub master_secret: &'a [u8; 32],
    /// `L`, agreed out of band — the decoder never reads it from the
    /// carrier itself (§4.6 step 1).
    pub declared_len: u32,
}

pub struct DecodeOutput {
    pub result: VerifyResult,
    /// Advanced regardless of gate outcome — the chain records that block
    /// `t` was attempted (§6). Left at `prev_hash` if the block index
    /// itself was non-monotonic, since no valid `H_t` can be computed for
    /// an attempt outside the chain's own ordering (an Open Question in
    /// the source material, resolved here in `gate`'s favor: reject, do
    /// not panic, do not forge a commitment for a `t` the chain never
    /// reached).
    pub new_prev_hash: [u8; 32],
}

/// Errors collapse entirely into `Reject` on this side (§6): there is no
/// `Result` return here, only `DecodeOutput`.
pub fn decode(
    req: DecodeRequest<'_>,
    kdf_mode: KdfMode,
    nonce_mode: NonceMode,
    codec_params: CodecParams,
) -> DecodeOutput {
    let prior_t = match req.block_index.checked_sub(1) {
        Some(t) => t,
        None => {
            return DecodeOutput { result: VerifyResult::Reject, new_prev_hash: req.prev_hash }
        }
    };
    let chain = ChainState { t: prior_t, prev_hash: req.prev_hash };

    let g_t = ChainState::state_digest(req.state);
    let ad = aad::build(req.block_index, &req.prev_hash, &g_t, req.declared_len, codec_params.nsym);

    let k_t = Zeroizing::new(kdf::derive_key(kdf_mode, req.master_secret, &req.prev_hash, req.block_index));

    let len_cw = wire::codeword_len(req.declared_len as usize, codec_params.nsym);
    let slice = wire::slice_codeword(req.carrier, len_cw);

    let seed_t = permute::permutation_seed(&req.prev_hash, req.block_index);
    let coded = permute::unpermute(&seed_t, &slice);

    let codec = RsCodec::new(codec_params.nsym);
    let payload_len = aead::NONCE_LEN + req.declared_len as usize + aead::TAG_LEN;
    let payload = match codec.decode(&coded, payload_len) {
        Some(recovered) => recovered,
        // RS failure never short-circuits to Reject: the uncorrected raw
        // slice is handed to the gate, which alone decides (§4.6 step 4).
        None => codec.strip_parity(&coded, payload_len),
    };

    let mut nonce = [0u8; aead::NONCE_LEN];
    nonce.copy_from_slice(&payload[..aead::NONCE_LEN]);
    let nonce = match nonce_mode {
        NonceMode::Derived => kdf::derive_nonce(&k_t, req.block_index),
        NonceMode::Random => nonce,
    };
    let ct = &payload[aead::NONCE_LEN..];

    let result = gate::gate(&k_t, &nonce, ct, &ad);

    let ct_hash = ChainState::ciphertext_hash(ct);
    let new_prev_hash = match chain.advance(req.block_index, &ct_hash, &g_t, &ad) {
        Ok((new_state, _availability_witness)) => new_state.prev_hash,
        Err(_) => req.prev_hash,
    };

    DecodeOutput { result, new_prev_hash }
}
