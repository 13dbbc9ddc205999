//! Tagpack value types: primitives, containers and composite records.

mod container;
mod object;
mod value;

pub use container::{PackMapping, PackSequence};
pub use object::{FieldReader, PackObject, Record, RecordType};
pub use value::{FromPackValue, PackValue, ValueKind};
