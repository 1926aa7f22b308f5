//! Canonical serialization of `StructuredState` (`D_t`) and the public
//! header `P_t` (§4.8).
//!
//! Deliberately hand-rolled rather than built on a reflection-based
//! serializer: field names sorted lexicographically, byte strings
//! length-prefixed with a 4-byte big-endian count, integers fixed-width
//! big-endian, no trailing whitespace, no language-specific type tags. Two
//! conforming implementations in different languages must produce
//! byte-identical output for the same `StructuredState`.

use std::collections::BTreeMap;

/// One field's value in a `StructuredState`. Closed on purpose — adding a
/// variant is a wire-format change and must bump the version tag in
/// `PublicHeader`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StateValue {
    Bytes(Vec<u8>),
    UInt(u64),
}

const TAG_BYTES: u8 = 0;
const TAG_UINT: u8 = 1;

/// Opaque public metadata `D_t`. A `BTreeMap` gives lexicographic key
/// ordering for free, which is exactly the canonical ordering the format
/// requires.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct StructuredState {
    fields: BTreeMap<String, StateValue>,
}

impl StructuredState {
    pub fn new() -> Self {
        Self { fields: BTreeMap::new() }
    }

    pub fn insert(&mut self, key: impl Into<String>, value: StateValue) -> &mut Self {
        self.fields.insert(key.into(), value);
        self
    }

    pub fn get(&self, key: &str) -> Option<&StateValue> {
        self.fields.get(key)
    }

    /// `field names sorted lexicographically, numbers as fixed-width
    /// big-endian integers, byte strings prefixed with their length as a
    /// 4-byte big-endian integer, no trailing whitespace, no
    /// language-specific type tags` — the grammar from §4.8, verbatim.
    pub fn serialize(&self) -> Vec<u8> {
        let mut out = Vec::new();
        for (key, value) in &self.fields {
            push_length_prefixed(&mut out, key.as_bytes());
            match value {
                StateValue::Bytes(bytes) => {
                    out.push(TAG_BYTES);
                    push_length_prefixed(&mut out, bytes);
                }
                StateValue::UInt(n) => {
                    out.push(TAG_UINT);
                    out.extend_from_slice(&n.to_be_bytes());
                }
            }
        }
        out
    }

    pub fn deserialize(bytes: &[u8]) -> Option<Self> {
        let mut fields = BTreeMap::new();
        let mut cursor = 0usize;
        while cursor < bytes.len() {
            let key_bytes = read_length_prefixed(bytes, &mut cursor)?;
            let key = String::from_utf8(key_bytes).ok()?;
            let tag = *bytes.get(cursor)?;
            cursor += 1;
            let value = match tag {
                TAG_BYTES => StateValue::Bytes(read_length_prefixed(bytes, &mut cursor)?),
                TAG_UINT => {
                    let slice = bytes.get(cursor..cursor + 8)?;
                    cursor += 8;
                    StateValue::UInt(u64::from_be_bytes(slice.try_into().ok()?))
                }
                _ => return None,
            };
            fields.insert(key, value);
        }
        Some(Self { fields })
    }
}

fn push_length_prefixed(out: &mut Vec<u8>, bytes: &[u8]) {
    out.extend_from_slice(&(bytes.len() as u32).to_be_bytes());
    out.extend_from_slice(bytes);
}

fn read_length_prefixed(bytes: &[u8], cursor: &mut usize) -> Option<Vec<u8>> {
    let len_bytes = bytes.get(*cursor..*cursor + 4)?;
    let len = u32::from_be_bytes(len_bytes.try_into().ok()?) as usize;
    *cursor += 4;
    let data = bytes.get(*cursor..*cursor + len)?.to_vec();
    *cursor += len;
    Some(data)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trips_mixed_fields() {
        let mut state = StructuredState::new();
        state.insert("v", StateValue::UInt(1));
        state.insert("label", StateValue::Bytes(b"hello".to_vec()));
        let bytes = state.serialize();
        assert_eq!(StructuredState::deserialize(&bytes).unwrap(), state);
    }

    #[test]
    fn empty_state_round_trips() {
        let state = StructuredState::new();
        let bytes = state.serialize();
        assert!(bytes.is_empty());
        assert_eq!(StructuredState::deserialize(&bytes).unwrap(), state);
    }

    #[test]
    fn serialization_is_stable_regardless_of_insertion_order() {
        let mut a = StructuredState::new();
        a.insert("zeta", StateValue::UInt(9));
        a.insert("alpha", StateValue::UInt(1));

        let mut b = StructuredState::new();
        b.insert("alpha", StateValue::UInt(1));
        b.insert("zeta", StateValue::UInt(9));

        assert_eq!(a.serialize(), b.serialize());
    }

    #[test]
    fn malformed_bytes_fail_closed() {
        assert!(StructuredState::deserialize(&[0, 0, 0, 5, b'h', b'i']).is_none());
    }
}
