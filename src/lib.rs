//! Tagpack: a schema-less, self-describing binary object codec.
//!
//! Every value on the wire starts with a one-byte tag that says how to read
//! the rest, so a document can be decoded without knowing its shape in
//! advance. Host records travel as composites: a type identifier plus their
//! fields in declaration order, rebuilt on decode through a [`TypeRegistry`].
//!
//! # Architecture
//!
//! - **`codec`**: Tag table, primitive/container/composite codecs and the
//!   dispatch core that routes between them
//! - **`types`**: The dynamic value model (`PackValue`) and the `Record`
//!   traits host types implement
//! - **`registry`**: Type identifier → constructor lookup used by the decoder
//! - **`compression`**, **`crypto`**, **`json`**: Optional byte-level
//!   helpers that sit outside the codec (feature-gated)
//!
//! # Example
//!
//! ```
//! use tagpack::{Codec, PackValue, TypeRegistry};
//!
//! let codec = Codec::new(TypeRegistry::new());
//! let value = PackValue::from(vec![1i32, 2, 3]);
//! let bytes = codec.to_bytes(&value)?;
//! assert_eq!(codec.from_bytes(&bytes)?, value);
//! # Ok::<(), tagpack::PackError>(())
//! ```

pub mod codec;
pub mod error;
pub mod registry;
pub mod types;

#[cfg(feature = "compression")]
pub mod compression;
#[cfg(feature = "crypto")]
pub mod crypto;
#[cfg(feature = "json")]
pub mod json;

#[cfg(test)]
mod testing;

pub use codec::{Codec, DEFAULT_MAX_DEPTH, decode_value, encode_value};
pub use error::PackError;
pub use registry::{TypeDescriptor, TypeRegistry};
pub use types::{
    FieldReader, FromPackValue, PackMapping, PackObject, PackSequence, PackValue, Record,
    RecordType, ValueKind,
};
