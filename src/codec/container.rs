//! Sequences and mappings, plus decode-time homogeneity inference.
//!
//! After decoding, a container is narrowed to a single element kind when
//! every non-null element shares the kind of the first non-null element
//! (the "dominant" kind). Nulls survive narrowing; elements of any other
//! kind are dropped rather than coerced. Mixed containers stay untyped with
//! all elements intact.

use std::collections::HashMap;
use std::hash::{BuildHasher, Hash, Hasher, RandomState};
use std::mem;

use bytes::{Buf, BufMut};

use super::decode::{DecodeContext, capacity_hint, decode_nested, read_len};
use super::encode::{Trail, encode_nested, ensure_capacity, len_prefix};
use super::tag::{self, LEN_SIZE};
use crate::error::PackError;
use crate::types::{PackMapping, PackSequence, PackValue, ValueKind};

pub(crate) fn encode_sequence<B: BufMut>(
    buf: &mut B,
    seq: &PackSequence,
    trail: &mut Trail,
) -> Result<(), PackError> {
    encode_header(buf, tag::SEQUENCE, seq.len())?;
    for item in seq {
        encode_nested(buf, item, trail)?;
    }
    Ok(())
}

pub(crate) fn encode_mapping<B: BufMut>(
    buf: &mut B,
    map: &PackMapping,
    trail: &mut Trail,
) -> Result<(), PackError> {
    encode_header(buf, tag::MAPPING, map.len())?;
    for (key, value) in map.iter() {
        encode_nested(buf, key, trail)?;
        encode_nested(buf, value, trail)?;
    }
    Ok(())
}

fn encode_header(buf: &mut impl BufMut, t: u8, len: usize) -> Result<(), PackError> {
    let len = len_prefix(len)?;
    ensure_capacity(buf, 1 + LEN_SIZE)?;
    buf.put_u8(t);
    buf.put_i32(len);
    Ok(())
}

pub(crate) fn decode_sequence<B: Buf>(
    buf: &mut B,
    ctx: &mut DecodeContext<'_>,
) -> Result<PackValue, PackError> {
    let len = read_len(buf)?;
    if len == 0 {
        return Ok(PackValue::Sequence(PackSequence::default()));
    }
    let mut items = Vec::with_capacity(capacity_hint(len, buf));
    for _ in 0..len {
        items.push(decode_nested(buf, ctx)?);
    }
    Ok(PackValue::Sequence(narrow_sequence(items)))
}

pub(crate) fn decode_mapping<B: Buf>(
    buf: &mut B,
    ctx: &mut DecodeContext<'_>,
) -> Result<PackValue, PackError> {
    let len = read_len(buf)?;
    if len == 0 {
        return Ok(PackValue::Mapping(PackMapping::default()));
    }
    let mut keys = Vec::with_capacity(capacity_hint(len, buf));
    let mut values = Vec::with_capacity(capacity_hint(len, buf));
    for _ in 0..len {
        keys.push(decode_nested(buf, ctx)?);
        values.push(decode_nested(buf, ctx)?);
    }
    Ok(PackValue::Mapping(narrow_mapping(keys, values)))
}

/// Returns the dominant kind when every non-null value shares it.
///
/// `None` when there are no non-null values or the kinds are mixed.
pub fn infer_kind(values: &[PackValue]) -> Option<ValueKind> {
    let mut kinds = values.iter().filter_map(PackValue::kind);
    let dominant = kinds.next()?;
    let uniform = kinds.all(|k| k == dominant);
    uniform.then_some(dominant)
}

fn matches_kind(value: &PackValue, kind: &ValueKind) -> bool {
    value.is_null() || value.kind().as_ref() == Some(kind)
}

/// Applies homogeneity inference to decoded sequence items.
pub fn narrow_sequence(items: Vec<PackValue>) -> PackSequence {
    match infer_kind(&items) {
        Some(kind) => {
            let items = items
                .into_iter()
                .filter(|v| matches_kind(v, &kind))
                .collect();
            PackSequence::typed(kind, items)
        }
        None => PackSequence::new(items),
    }
}

/// Applies homogeneity inference to keys and values independently.
///
/// When the keys narrow, each key is paired with the value at that key's
/// first occurrence. This is only sound for unique keys: every duplicate of
/// a key receives the value stored with its first occurrence. Keys that do
/// not narrow are returned as decoded, paired positionally.
///
/// Keys must be acyclic.
pub fn narrow_mapping(keys: Vec<PackValue>, values: Vec<PackValue>) -> PackMapping {
    let key_kind = infer_kind(&keys);
    let value_kind = infer_kind(&values);

    let entries = match &key_kind {
        Some(kind) => {
            let firsts = first_occurrences(&keys);
            keys.into_iter()
                .zip(firsts)
                .filter(|(key, _)| matches_kind(key, kind))
                .map(|(key, first)| {
                    let value = values.get(first).cloned().unwrap_or(PackValue::Null);
                    (key, value)
                })
                .collect()
        }
        None => keys.into_iter().zip(values).collect(),
    };

    PackMapping::typed(key_kind, value_kind, entries)
}

/// For every key, the index of the first key equal to it.
///
/// Keys are bucketed by hash so each lookup only compares against earlier
/// keys with the same hash. Keys unequal to themselves (NaN) map to their
/// own index.
fn first_occurrences(keys: &[PackValue]) -> Vec<usize> {
    let state = RandomState::new();
    let mut buckets: HashMap<u64, Vec<usize>> = HashMap::with_capacity(keys.len());
    keys.iter()
        .enumerate()
        .map(|(i, key)| {
            let mut hasher = state.build_hasher();
            hash_value(key, &mut hasher);
            let bucket = buckets.entry(hasher.finish()).or_default();
            match bucket.iter().copied().find(|&j| keys[j] == *key) {
                Some(j) => j,
                None => {
                    bucket.push(i);
                    i
                }
            }
        })
        .collect()
}

/// Hashes a value consistently with its `PartialEq`.
fn hash_value(value: &PackValue, state: &mut impl Hasher) {
    mem::discriminant(value).hash(state);
    match value {
        PackValue::Null => {}
        PackValue::Byte(v) => v.hash(state),
        PackValue::Short(v) => v.hash(state),
        PackValue::Int(v) => v.hash(state),
        PackValue::Long(v) => v.hash(state),
        // 0.0 and -0.0 compare equal.
        PackValue::Float(v) => (if *v == 0.0 { 0 } else { v.to_bits() }).hash(state),
        PackValue::Double(v) => (if *v == 0.0 { 0 } else { v.to_bits() }).hash(state),
        PackValue::Char(v) => v.hash(state),
        PackValue::Boolean(v) => v.hash(state),
        PackValue::String(v) => v.hash(state),
        PackValue::ByteArray(v) => v.hash(state),
        PackValue::BigInteger(v) => v.hash(state),
        PackValue::Sequence(seq) => {
            seq.len().hash(state);
            for item in seq {
                hash_value(item, state);
            }
        }
        PackValue::Mapping(map) => {
            map.len().hash(state);
            for (k, v) in map.iter() {
                hash_value(k, state);
                hash_value(v, state);
            }
        }
        PackValue::Object(obj) => {
            obj.type_name().hash(state);
            for field in &obj.fields() {
                hash_value(field, state);
            }
        }
    }
}
