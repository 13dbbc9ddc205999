//! Tagpack encoding: `PackValue` → bytes.

use std::collections::HashSet;

use bytes::BufMut;

use super::{DEFAULT_MAX_DEPTH, composite, container, primitive};
use crate::error::PackError;
use crate::types::{PackObject, PackValue};

/// Encodes a `PackValue` into the buffer using the default depth limit.
///
/// The buffer's `remaining_mut` is its capacity: fixed buffers such as
/// `&mut [u8]` fail with [`PackError::CapacityExceeded`] instead of growing.
pub fn encode_value(buf: &mut impl BufMut, value: &PackValue) -> Result<(), PackError> {
    let mut trail = Trail::new(DEFAULT_MAX_DEPTH);
    encode_nested(buf, value, &mut trail)
}

/// Encoder traversal state: current depth and the composites being written.
pub(crate) struct Trail {
    in_progress: HashSet<usize>,
    depth: usize,
    max_depth: usize,
}

impl Trail {
    pub(crate) fn new(max_depth: usize) -> Self {
        Self {
            in_progress: HashSet::new(),
            depth: 0,
            max_depth,
        }
    }

    /// Marks `object` as in progress; re-entering it is a cycle.
    pub(crate) fn enter(&mut self, object: &PackObject) -> Result<(), PackError> {
        if !self.in_progress.insert(object.identity()) {
            tracing::debug!(type_name = object.type_name(), "cyclic reference detected");
            return Err(PackError::CyclicReference {
                type_name: object.type_name().to_string(),
            });
        }
        Ok(())
    }

    pub(crate) fn leave(&mut self, object: &PackObject) {
        self.in_progress.remove(&object.identity());
    }
}

/// Dispatch Core: routes a value to the primitive, container or composite codec.
pub(crate) fn encode_nested<B: BufMut>(
    buf: &mut B,
    value: &PackValue,
    trail: &mut Trail,
) -> Result<(), PackError> {
    if trail.depth >= trail.max_depth {
        return Err(PackError::DepthExceeded {
            limit: trail.max_depth,
        });
    }
    trail.depth += 1;
    let result = match value {
        PackValue::Sequence(seq) => container::encode_sequence(buf, seq, trail),
        PackValue::Mapping(map) => container::encode_mapping(buf, map, trail),
        PackValue::Object(obj) => composite::encode_composite(buf, obj, trail),
        other => primitive::encode_primitive(buf, other),
    };
    trail.depth -= 1;
    result
}

pub(crate) fn ensure_capacity(buf: &impl BufMut, needed: usize) -> Result<(), PackError> {
    if buf.remaining_mut() < needed {
        Err(PackError::CapacityExceeded {
            needed,
            remaining: buf.remaining_mut(),
        })
    } else {
        Ok(())
    }
}

/// Converts a length or count to its 4-byte wire prefix.
pub(crate) fn len_prefix(len: usize) -> Result<i32, PackError> {
    i32::try_from(len).map_err(|_| PackError::LengthOverflow(len))
}
