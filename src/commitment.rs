//! Commitment chain (§4.3): a pure-functional hash chain over block
//! metadata. Runs independently of the transport chain — it never
//! consumes or gates on decode results, only on the caller-supplied
//! `StructuredState` and public header bytes.

use crate::canonical::StructuredState;
use crate::config::domain;
use crate::error::InvalidInput;
use crate::primitives::hash::domain_hash;

/// `H_0 := H("GP/genesis")`, plus the chain's position counter. Owned by
/// the caller; the core never retains a reference across calls (§5).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChainState {
    pub t: u64,
    pub prev_hash: [u8; 32],
}

impl ChainState {
    /// The chain's starting point, before any block has been committed.
    pub fn genesis() -> Self {
        Self { t: 0, prev_hash: domain_hash(domain::GENESIS, &[]) }
    }

    /// `g_t := H(canonical(D_t))`.
    pub fn state_digest(state: &StructuredState) -> [u8; 32] {
        domain_hash(domain::DIGEST, &[&state.serialize()])
    }

    /// `H(C_t)` — the only way ciphertext bytes influence the chain
    /// (invariant 3, §3): never the raw bytes, always this hash.
    pub fn ciphertext_hash(ciphertext: &[u8]) -> [u8; 32] {
        domain_hash(domain::CT_HASH, &[ciphertext])
    }

    /// Advances the chain to block `t`, computing `H_t` and `A_t` from the
    /// previous tip, the ciphertext hash, the state digest, and the public
    /// header bytes (`P_t == AD_t`, §3). Rejects any `t` other than
    /// `self.t + 1` — no skipping, no rewinding (§4.3 invariant, P7).
    pub fn advance(
        &self,
        t: u64,
        ciphertext_hash: &[u8; 32],
        state_digest: &[u8; 32],
        public_header: &[u8],
    ) -> Result<(ChainState, [u8; 32]), InvalidInput> {
        if t != self.t + 1 {
            return Err(InvalidInput::NonMonotonicIndex { expected: self.t + 1, got: t });
        }
        let h_t =
            domain_hash(domain::H_T, &[&self.prev_hash, ciphertext_hash, state_digest]);
        let a_t = domain_hash(domain::A_T, &[&self.prev_hash, state_digest, public_header]);
        Ok((ChainState { t, prev_hash: h_t }, a_t))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canonical::StateValue;

    fn sample_state() -> StructuredState {
        let mut s = StructuredState::new();
        s.insert("v", StateValue::UInt(1));
        s
    }

    #[test]
    fn genesis_is_deterministic() {
        assert_eq!(ChainState::genesis().prev_hash, ChainState::genesis().prev_hash);
    }

    #[test]
    fn advance_requires_exact_successor_index() {
        let genesis = ChainState::genesis();
        let g_t = ChainState::state_digest(&sample_state());
        let ct_hash = ChainState::ciphertext_hash(b"irrelevant");
        assert!(genesis.advance(2, &ct_hash, &g_t, b"ad").is_err());
        assert!(genesis.advance(0, &ct_hash, &g_t, b"ad").is_err());
        assert!(genesis.advance(1, &ct_hash, &g_t, b"ad").is_ok());
    }

    #[test]
    fn advancing_twice_requires_strictly_increasing_t() {
        let genesis = ChainState::genesis();
        let g_t = ChainState::state_digest(&sample_state());
        let ct_hash = ChainState::ciphertext_hash(b"irrelevant");
        let (next, _) = genesis.advance(1, &ct_hash, &g_t, b"ad").unwrap();
        assert!(next.advance(1, &ct_hash, &g_t, b"ad").is_err());
        assert!(next.advance(3, &ct_hash, &g_t, b"ad").is_err());
        assert!(next.advance(2, &ct_hash, &g_t, b"ad").is_ok());
    }

    #[test]
    fn different_ciphertext_hash_changes_commitment() {
        let genesis = ChainState::genesis();
        let g_t = ChainState::state_digest(&sample_state());
        let a = genesis.advance(1, &ChainState::ciphertext_hash(b"one"), &g_t, b"ad").unwrap();
        let b = genesis.advance(1, &ChainState::ciphertext_hash(b"two"), &g_t, b"ad").unwrap();
        assert_ne!(a.0.prev_hash, b.0.prev_hash);
    }
}
