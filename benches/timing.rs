use std::hint::black_box;
use std::time::Instant;

use block_covenant::canonical::{StateValue, StructuredState};
use block_covenant::commitment::ChainState;
use block_covenant::config::{CodecParams, KdfMode, NonceMode};
use block_covenant::{DecodeRequest, EncodeRequest, Session};

fn time_it<F: FnMut()>(label: &str, iters: usize, mut f: F) {
    for _ in 0..(iters / 10).max(10) {
        f();
    }

    let start = Instant::now();
    for _ in 0..iters {
        f();
    }
    let elapsed = start.elapsed();

    let per_iter = elapsed / (iters as u32);
    println!("{:<16} total={:?}  per_iter={:?}", label, elapsed, per_iter);
}

fn main() {
    let session = Session::new(
        KdfMode::Deterministic,
        NonceMode::Derived,
        CodecParams::with_frame_size(4096),
    );
    let master_secret = [0x11u8; 32];
    let genesis = ChainState::genesis();
    let mut state = StructuredState::new();
    state.insert("v", StateValue::UInt(1));

    let plaintext = vec![0x42u8; 1024];

    let encoded = session
        .encode(EncodeRequest {
            plaintext: &plaintext,
            block_index: 1,
            prev_hash: genesis.prev_hash,
            state: &state,
            master_secret: &master_secret,
        })
        .unwrap();

    let mut tampered = encoded.carrier.clone();
    let last = tampered.len() - 1;
    tampered[last] ^= 0x01;

    let iters = 5_000;

    time_it("encode", iters, || {
        let out = session
            .encode(EncodeRequest {
                plaintext: black_box(&plaintext),
                block_index: 1,
                prev_hash: genesis.prev_hash,
                state: &state,
                master_secret: &master_secret,
            })
            .unwrap();
        black_box(out);
    });

    time_it("decode_accept", iters, || {
        let out = session.decode(DecodeRequest {
            carrier: black_box(&encoded.carrier),
            block_index: 1,
            prev_hash: genesis.prev_hash,
            state: &state,
            master_secret: &master_secret,
            declared_len: plaintext.len() as u32,
        });
        black_box(out.result.is_accept());
    });

    time_it("decode_tampered", iters, || {
        let out = session.decode(DecodeRequest {
            carrier: black_box(&tampered),
            block_index: 1,
            prev_hash: genesis.prev_hash,
            state: &state,
            master_secret: &master_secret,
            declared_len: plaintext.len() as u32,
        });
        black_box(out.result.is_accept());
    });

    time_it("decode_wrong_key", iters, || {
        let wrong_secret = [0x22u8; 32];
        let out = session.decode(DecodeRequest {
            carrier: black_box(&encoded.carrier),
            block_index: 1,
            prev_hash: genesis.prev_hash,
            state: &state,
            master_secret: &wrong_secret,
            declared_len: plaintext.len() as u32,
        });
        black_box(out.result.is_accept());
    });

    println!("\nDone.");
}
