//! Associated data builder (§4.4, §6 "Public header (AD) byte format").
//!
//! Produces the exact 80-byte `AD_t == P_t` string bound into AEAD.
//! Encoder and decoder call this same builder — neither ever assembles AD
//! bytes by hand elsewhere, so the two sides can never drift.

pub const VERSION: u16 = 1;
pub const HEADER_LEN: usize = 2 + 8 + 32 + 32 + 4 + 2; // 80 bytes

/// `version (2) || t (8 BE) || H_{t-1} (32) || g_t (32) || L (4 BE) || nsym (2 BE)`.
pub fn build(t: u64, prev_hash: &[u8; 32], state_digest: &[u8; 32], plaintext_len: u32, nsym: u16) -> Vec<u8> {
    let mut out = Vec::with_capacity(HEADER_LEN);
    out.extend_from_slice(&VERSION.to_be_bytes());
    out.extend_from_slice(&t.to_be_bytes());
    out.extend_from_slice(prev_hash);
    out.extend_from_slice(state_digest);
    out.extend_from_slice(&plaintext_len.to_be_bytes());
    out.extend_from_slice(&nsym.to_be_bytes());
    debug_assert_eq!(out.len(), HEADER_LEN);
    out
}

/// A parsed view over a `build()` output, used by tests and diagnostics
/// that need to inspect individual fields without re-deriving them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PublicHeaderFields {
    pub version: u16,
    pub t: u64,
    pub prev_hash: [u8; 32],
    pub state_digest: [u8; 32],
    pub plaintext_len: u32,
    pub nsym: u16,
}

pub fn parse(bytes: &[u8]) -> Option<PublicHeaderFields> {
    if bytes.len() != HEADER_LEN {
        return None;
    }
    let version = u16::from_be_bytes(bytes[0..2].try_into().ok()?);
    let t = u64::from_be_bytes(bytes[2..10].try_into().ok()?);
    let mut prev_hash = [0u8; 32];
    prev_hash.copy_from_slice(&bytes[10..42]);
    let mut state_digest = [0u8; 32];
    state_digest.copy_from_slice(&bytes[42..74]);
    let plaintext_len = u32::from_be_bytes(bytes[74..78].try_into().ok()?);
    let nsym = u16::from_be_bytes(bytes[78..80].try_into().ok()?);
    Some(PublicHeaderFields { version, t, prev_hash, state_digest, plaintext_len, nsym })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn layout_is_exactly_80_bytes() {
        let bytes = build(1, &[0u8; 32], &[0u8; 32], 11, 64);
        assert_eq!(bytes.len(), 80);
    }

    #[test]
    fn parse_round_trips_build() {
        let prev_hash = [7u8; 32];
        let g_t = [9u8; 32];
        let bytes = build(42, &prev_hash, &g_t, 123, 64);
        let fields = parse(&bytes).unwrap();
        assert_eq!(fields.version, VERSION);
        assert_eq!(fields.t, 42);
        assert_eq!(fields.prev_hash, prev_hash);
        assert_eq!(fields.state_digest, g_t);
        assert_eq!(fields.plaintext_len, 123);
        assert_eq!(fields.nsym, 64);
    }

    #[test]
    fn differing_t_changes_the_bytes() {
        let a = build(1, &[0u8; 32], &[0u8; 32], 11, 64);
        let b = build(2, &[0u8; 32], &[0u8; 32], 11, 64);
        assert_ne!(a, b);
    }
}
