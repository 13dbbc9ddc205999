//! Tagpack binary encoding.
//!
//! Every value is written as a one-byte tag followed by a tag-specific
//! payload. Multi-byte quantities are big-endian. Nothing outside the bytes
//! themselves is needed to find where a value ends, except the registry
//! used to rebuild composite types.

mod builder;
pub(crate) mod composite;
pub(crate) mod container;
pub mod decode;
pub mod encode;
pub mod primitive;
pub mod tag;


pub use builder::Codec;
pub use container::{infer_kind, narrow_mapping, narrow_sequence};
pub use decode::decode_value;
pub use encode::encode_value;

/// Default nesting limit for encode and decode.
pub const DEFAULT_MAX_DEPTH: usize = 512;
