//! Tagpack decoding: bytes → `PackValue`.

use bytes::Buf;

use super::{DEFAULT_MAX_DEPTH, composite, container, primitive, tag};
use crate::error::PackError;
use crate::registry::TypeRegistry;
use crate::types::PackValue;

/// Decodes a single `PackValue` from the buffer using the default depth limit.
///
/// Composite type identifiers are resolved through `registry`.
pub fn decode_value(buf: &mut impl Buf, registry: &TypeRegistry) -> Result<PackValue, PackError> {
    let mut ctx = DecodeContext::new(registry, DEFAULT_MAX_DEPTH);
    decode_nested(buf, &mut ctx)
}

/// Decoder traversal state.
pub(crate) struct DecodeContext<'r> {
    pub(crate) registry: &'r TypeRegistry,
    depth: usize,
    max_depth: usize,
}

impl<'r> DecodeContext<'r> {
    pub(crate) fn new(registry: &'r TypeRegistry, max_depth: usize) -> Self {
        Self {
            registry,
            depth: 0,
            max_depth,
        }
    }
}

/// Dispatch Core: reads a tag byte and routes to the matching codec.
pub(crate) fn decode_nested<B: Buf>(
    buf: &mut B,
    ctx: &mut DecodeContext<'_>,
) -> Result<PackValue, PackError> {
    ensure_remaining(buf, 1)?;
    let t = buf.get_u8();

    if ctx.depth >= ctx.max_depth {
        return Err(PackError::DepthExceeded {
            limit: ctx.max_depth,
        });
    }
    ctx.depth += 1;
    let result = match t {
        tag::SEQUENCE => container::decode_sequence(buf, ctx),
        tag::MAPPING => container::decode_mapping(buf, ctx),
        tag::COMPOSITE => composite::decode_composite(buf, ctx),
        t if tag::is_primitive(t) => primitive::decode_primitive(t, buf),
        _ => Err(PackError::UnknownTag(t)),
    };
    ctx.depth -= 1;
    result
}

pub(crate) fn ensure_remaining(buf: &impl Buf, needed: usize) -> Result<(), PackError> {
    if buf.remaining() < needed {
        Err(PackError::BufferUnderflow {
            needed,
            remaining: buf.remaining(),
        })
    } else {
        Ok(())
    }
}

/// Reads a 4-byte length or count prefix.
pub(crate) fn read_len(buf: &mut impl Buf) -> Result<usize, PackError> {
    ensure_remaining(buf, 4)?;
    let len = buf.get_i32();
    usize::try_from(len).map_err(|_| PackError::InvalidLength(len))
}

/// Upper bound for pre-allocating `len` decoded elements: every element
/// needs at least one byte, so never reserve more than what is left.
pub(crate) fn capacity_hint(len: usize, buf: &impl Buf) -> usize {
    len.min(buf.remaining())
}
