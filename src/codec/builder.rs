//! Configured codec: a shared type registry plus traversal limits.

use std::sync::Arc;

use bytes::{Buf, BufMut, Bytes, BytesMut};

use super::DEFAULT_MAX_DEPTH;
use super::decode::{DecodeContext, decode_nested};
use super::encode::{Trail, encode_nested};
use crate::error::PackError;
use crate::registry::TypeRegistry;
use crate::types::PackValue;

/// Encoder/decoder pair bound to a [`TypeRegistry`].
///
/// Cheap to clone; clones share the registry.
#[derive(Debug, Clone)]
pub struct Codec {
    registry: Arc<TypeRegistry>,
    max_depth: usize,
}

impl Codec {
    /// Creates a codec that resolves composites through `registry`.
    pub fn new(registry: impl Into<Arc<TypeRegistry>>) -> Self {
        Self {
            registry: registry.into(),
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }

    /// Sets the maximum nesting depth for both encode and decode.
    pub fn max_depth(mut self, limit: usize) -> Self {
        self.max_depth = limit;
        self
    }

    pub fn registry(&self) -> &TypeRegistry {
        &self.registry
    }

    /// Encodes `value` into `buf`.
    pub fn encode(&self, buf: &mut impl BufMut, value: &PackValue) -> Result<(), PackError> {
        let mut trail = Trail::new(self.max_depth);
        encode_nested(buf, value, &mut trail)
    }

    /// Decodes one value from `buf`, leaving any following bytes unread.
    pub fn decode(&self, buf: &mut impl Buf) -> Result<PackValue, PackError> {
        let mut ctx = DecodeContext::new(&self.registry, self.max_depth);
        decode_nested(buf, &mut ctx)
    }

    /// Encodes `value` as a standalone document.
    pub fn to_bytes(&self, value: &PackValue) -> Result<Bytes, PackError> {
        let mut buf = BytesMut::new();
        self.encode(&mut buf, value)?;
        tracing::trace!(bytes = buf.len(), kind = value.kind_name(), "encoded document");
        Ok(buf.freeze())
    }

    /// Decodes a standalone document. The value must span all of `data`.
    pub fn from_bytes(&self, data: &[u8]) -> Result<PackValue, PackError> {
        let mut cursor = data;
        let value = self.decode(&mut cursor)?;
        if !cursor.is_empty() {
            return Err(PackError::TrailingBytes(cursor.len()));
        }
        tracing::trace!(bytes = data.len(), kind = value.kind_name(), "decoded document");
        Ok(value)
    }
}

impl Default for Codec {
    fn default() -> Self {
        Self::new(TypeRegistry::new())
    }
}
