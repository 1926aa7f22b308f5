//! Deterministic keyed interleaving (§4.1, §4.4).
//!
//! `permute(seed, bytes) -> bytes` and its inverse scatter burst noise
//! across RS blocks rather than concentrating it in one. The permutation
//! is a Fisher–Yates shuffle of byte indices, seeded by a ChaCha8 stream
//! keyed off the block's own domain-separated seed — reproducible from
//! `(K_t, t)` alone, with no extra framing.

use rand_chacha::ChaCha8Rng;
use rand_core::SeedableRng;

use crate::primitives::hash::{domain_hash, HASH_LEN};

/// Builds the permutation of `0..len` for a given 32-byte seed. Both
/// `permute` and `unpermute` call this so encoder and decoder always agree
/// on the same index mapping.
fn build_permutation(seed: &[u8; HASH_LEN], len: usize) -> Vec<usize> {
    let mut rng = ChaCha8Rng::from_seed(*seed);
    let mut indices: Vec<usize> = (0..len).collect();
    // Fisher–Yates, high to low, using the RNG's own uniform range sampler.
    for i in (1..len).rev() {
        let j = rand::Rng::gen_range(&mut rng, 0..=i);
        indices.swap(i, j);
    }
    indices
}

/// Derives the permutation seed from the chain tip and block index: `H("GP/perm"
/// || H_{t-1} || t_be)` (§4.1). Depends only on public context, never on `K_t` —
/// a decoder can recompute it before the AEAD key even enters the picture.
pub fn permutation_seed(prev_hash: &[u8; 32], block_index: u64) -> [u8; HASH_LEN] {
    domain_hash(crate::config::domain::PERM, &[prev_hash, &block_index.to_be_bytes()])
}

/// `out[indices[i]] = bytes[i]` — scatters byte `i` to its shuffled slot.
pub fn permute(seed: &[u8; HASH_LEN], bytes: &[u8]) -> Vec<u8> {
    let indices = build_permutation(seed, bytes.len());
    let mut out = vec![0u8; bytes.len()];
    for (i, &b) in bytes.iter().enumerate() {
        out[indices[i]] = b;
    }
    out
}

/// Inverse of `permute`: `out[i] = bytes[indices[i]]`.
pub fn unpermute(seed: &[u8; HASH_LEN], bytes: &[u8]) -> Vec<u8> {
    let indices = build_permutation(seed, bytes.len());
    let mut out = vec![0u8; bytes.len()];
    for (i, &idx) in indices.iter().enumerate() {
        out[i] = bytes[idx];
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn permute_unpermute_round_trips() {
        let seed = [7u8; HASH_LEN];
        let data: Vec<u8> = (0..200u16).map(|x| x as u8).collect();
        let scrambled = permute(&seed, &data);
        assert_ne!(scrambled, data);
        let restored = unpermute(&seed, &scrambled);
        assert_eq!(restored, data);
    }

    #[test]
    fn different_seeds_give_different_permutations() {
        let data: Vec<u8> = (0..100u16).map(|x| x as u8).collect();
        let a = permute(&[1u8; HASH_LEN], &data);
        let b = permute(&[2u8; HASH_LEN], &data);
        assert_ne!(a, b);
    }

    #[test]
    fn empty_input_round_trips() {
        let seed = [9u8; HASH_LEN];
        let scrambled = permute(&seed, &[]);
        assert!(scrambled.is_empty());
        assert!(unpermute(&seed, &scrambled).is_empty());
    }
}
