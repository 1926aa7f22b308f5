//! Encoder pipeline (§4.5): `plaintext, context -> AD -> ct -> interleaved
//! -> RS(ct) -> carrier`.

use crate::aad;
use crate::canonical::StructuredState;
use crate::commitment::ChainState;
use crate::config::{CodecParams, KdfMode, NonceMode};
use crate::error::InvalidInput;
use crate::kdf;
use crate::primitives::{aead, permute, rs::RsCodec};
use zeroize::Zeroizing;

/// The wire format's declared-length field is 4 bytes big-endian (§6), so
/// that is the hard ceiling on a single block's plaintext.
pub const MAX_PLAINTEXT_LEN: usize = u32::MAX as usize;

pub struct EncodeRequest<'a> {
    pub plaintext: &'a [u8],
    pub block_index: u64,
    pub prev_hash: [u8; 32],
    pub state: &'a StructuredState,
    pub master_secret: &'a [u8; 32],
}

pub struct EncodeOutput {
    pub carrier: Vec<u8>,
    pub new_prev_hash: [u8; 32],
    pub availability_witness: [u8; 32],
}

pub fn encode(
    req: EncodeRequest<'_>,
    kdf_mode: KdfMode,
    nonce_mode: NonceMode,
    codec_params: CodecParams,
) -> Result<EncodeOutput, InvalidInput> {
    if req.plaintext.len() > MAX_PLAINTEXT_LEN {
        return Err(InvalidInput::OversizePlaintext {
            len: req.plaintext.len(),
            max: MAX_PLAINTEXT_LEN,
        });
    }

    let prior_t = req.block_index.checked_sub(1).ok_or(InvalidInput::NonMonotonicIndex {
        expected: 1,
        got: req.block_index,
    })?;
    let chain = ChainState { t: prior_t, prev_hash: req.prev_hash };
    let g_t = ChainState::state_digest(req.state);
    let ad = aad::build(
        req.block_index,
        &req.prev_hash,
        &g_t,
        req.plaintext.len() as u32,
        codec_params.nsym,
    );

    let k_t = Zeroizing::new(kdf::derive_key(kdf_mode, req.master_secret, &req.prev_hash, req.block_index));
    let n_t = kdf::nonce_for_encode(nonce_mode, &k_t, req.block_index);

    let ct = aead::encrypt(&k_t, &n_t, req.plaintext, &ad)
        .expect("AES-256-GCM encryption with a well-formed 32-byte key never fails");

    let mut payload = Vec::with_capacity(aead::NONCE_LEN + ct.len());
    payload.extend_from_slice(&n_t);
    payload.extend_from_slice(&ct);

    let codec = RsCodec::new(codec_params.nsym);
    let coded = codec.encode(&payload);

    let seed_t = permute::permutation_seed(&req.prev_hash, req.block_index);
    let permuted = permute::permute(&seed_t, &coded);

    let carrier =
        crate::wire::build_carrier(&permuted, &req.prev_hash, req.block_index, codec_params.frame_size)?;

    let ct_hash = ChainState::ciphertext_hash(&ct);
    let (new_state, availability_witness) =
        chain.advance(req.block_index, &ct_hash, &g_t, &ad)?;

    Ok(EncodeOutput {
        carrier,
        new_prev_hash: new_state.prev_hash,
        availability_witness,
    })
}
