//! Known-answer / wire-format tests for the public header and carrier
//! framing (§6).

use block_covenant::aad;
use block_covenant::canonical::{StateValue, StructuredState};
use block_covenant::commitment::ChainState;
use block_covenant::config::{CodecParams, KdfMode, NonceMode, NSYM_DEFAULT};
use block_covenant::wire;
use block_covenant::{EncodeRequest, Session};

#[test]
fn public_header_is_exactly_80_bytes() {
    assert_eq!(aad::HEADER_LEN, 80);
    let header = aad::build(1, &[0u8; 32], &[0u8; 32], 11, 64);
    assert_eq!(header.len(), 80);
}

#[test]
fn public_header_version_is_one() {
    assert_eq!(aad::VERSION, 1);
}

#[test]
fn codeword_len_formula_matches_spec_for_unstriped_payload() {
    // NONCE_LEN(12) + L + TAG_LEN(16) + NSYM for a payload within one RS
    // block, per §6's wire format table.
    let len = wire::codeword_len(11, NSYM_DEFAULT);
    assert_eq!(len, 12 + 11 + 16 + 64);
}

#[test]
fn encoded_carrier_matches_declared_frame_size() {
    let session =
        Session::new(KdfMode::Deterministic, NonceMode::Derived, CodecParams::with_frame_size(2048));
    let mut state = StructuredState::new();
    state.insert("v", StateValue::UInt(1));
    let prev_hash = ChainState::genesis().prev_hash;

    let encoded = session
        .encode(EncodeRequest {
            plaintext: b"known answer payload",
            block_index: 1,
            prev_hash,
            state: &state,
            master_secret: &[0u8; 32],
        })
        .unwrap();

    assert_eq!(encoded.carrier.len(), 2048);
}

/// P1, §8: two encodes under `Deterministic` KDF with identical inputs
/// produce byte-identical carriers.
#[test]
fn deterministic_mode_is_byte_for_byte_reproducible() {
    let session =
        Session::new(KdfMode::Deterministic, NonceMode::Derived, CodecParams::with_frame_size(2048));
    let mut state = StructuredState::new();
    state.insert("v", StateValue::UInt(1));
    let prev_hash = ChainState::genesis().prev_hash;

    let req = || EncodeRequest {
        plaintext: b"reproducible payload",
        block_index: 1,
        prev_hash,
        state: &state,
        master_secret: &[7u8; 32],
    };

    let a = session.encode(req()).unwrap();
    let b = session.encode(req()).unwrap();

    assert_eq!(a.carrier, b.carrier);
    assert_eq!(a.new_prev_hash, b.new_prev_hash);
    assert_eq!(a.availability_witness, b.availability_witness);
}

/// Worked scenario 1, §8, spelled out with the spec's literal hex-encoded
/// master secret rather than an array literal.
#[test]
fn worked_scenario_one_clean_round_trip() {
    let master_secret_vec = hex::decode("00".repeat(32)).unwrap();
    let master_secret: [u8; 32] = master_secret_vec.try_into().unwrap();

    let session =
        Session::new(KdfMode::Deterministic, NonceMode::Derived, CodecParams::with_frame_size(4096));
    let mut state = StructuredState::new();
    state.insert("v", StateValue::UInt(1));
    let prev_hash = ChainState::genesis().prev_hash;

    let encoded = session
        .encode(EncodeRequest {
            plaintext: b"hello world",
            block_index: 1,
            prev_hash,
            state: &state,
            master_secret: &master_secret,
        })
        .unwrap();

    let out = session.decode(block_covenant::DecodeRequest {
        carrier: &encoded.carrier,
        block_index: 1,
        prev_hash,
        state: &state,
        master_secret: &master_secret,
        declared_len: b"hello world".len() as u32,
    });

    assert_eq!(out.result.plaintext(), Some(&b"hello world"[..]));
}

#[test]
fn invalid_codec_params_are_rejected() {
    assert!(CodecParams::new(31, 4096).is_err()); // odd
    assert!(CodecParams::new(16, 4096).is_err()); // below NSYM_MIN
    assert!(CodecParams::new(256, 4096).is_err()); // above NSYM_MAX
    assert!(CodecParams::new(64, 4096).is_ok());
}
