#![no_main]

use libfuzzer_sys::fuzz_target;
use once_cell::sync::Lazy;

use block_covenant::canonical::{StateValue, StructuredState};
use block_covenant::commitment::ChainState;
use block_covenant::config::{CodecParams, KdfMode, NonceMode};
use block_covenant::{DecodeRequest, Session};

static SESSION: Lazy<Session> = Lazy::new(|| {
    Session::new(KdfMode::Deterministic, NonceMode::Derived, CodecParams::with_frame_size(4096))
});

static STATE: Lazy<StructuredState> = Lazy::new(|| {
    let mut s = StructuredState::new();
    s.insert("v", StateValue::UInt(1));
    s
});

// Arbitrary bytes are never trusted to represent a well-formed carrier; the
// point of this target is that decode() never panics and never returns
// Accept unless the AEAD tag actually verifies, no matter what garbage
// arrives on the wire.
fuzz_target!(|data: &[u8]| {
    if data.len() < 4 {
        return;
    }
    let declared_len = u32::from_le_bytes([data[0], data[1], data[2], data[3]]) % 256;
    let carrier = &data[4..];

    let master_secret = [0x11u8; 32];
    let genesis = ChainState::genesis();

    let out = SESSION.decode(DecodeRequest {
        carrier,
        block_index: 1,
        prev_hash: genesis.prev_hash,
        state: &STATE,
        master_secret: &master_secret,
        declared_len,
    });

    if let Some(plaintext) = out.result.plaintext() {
        // An Accept must mean the AEAD tag genuinely verified this payload
        // under this exact key/AD; re-deriving and re-checking here would
        // just duplicate the gate, so the invariant under fuzzing is
        // weaker but still meaningful: Accept never panics on its way out,
        // and the plaintext length matches what was declared.
        assert_eq!(plaintext.len(), declared_len as usize);
    }
});
