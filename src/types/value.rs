//! The tagpack value model.

use std::fmt;

use bytes::Bytes;
use num_bigint::BigInt;

use super::{PackMapping, PackObject, PackSequence};
use crate::error::PackError;

/// A value in a tagpack document.
///
/// Every variant maps to exactly one tag byte on the wire.
#[derive(Debug, Clone, PartialEq)]
pub enum PackValue {
    Null,
    Byte(i8),
    Short(i16),
    Int(i32),
    Long(i64),
    Float(f32),
    Double(f64),
    /// A single UTF-16 code unit, not a full Unicode scalar.
    Char(u16),
    Boolean(bool),
    String(String),
    ByteArray(Vec<u8>),
    BigInteger(BigInt),
    // Containers
    Sequence(PackSequence),
    Mapping(PackMapping),
    // Composite
    Object(PackObject),
}

/// The runtime type of a non-null [`PackValue`].
///
/// Composite kinds carry the type identifier, so two composites only share a
/// kind when they come from the same registered type.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ValueKind {
    Byte,
    Short,
    Int,
    Long,
    Float,
    Double,
    Char,
    Boolean,
    String,
    ByteArray,
    BigInteger,
    Sequence,
    Mapping,
    Composite(String),
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Composite(name) => write!(f, "composite {name}"),
            other => f.write_str(other.name()),
        }
    }
}

impl ValueKind {
    /// Short lowercase name of the kind; composites report `"composite"`.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Byte => "byte",
            Self::Short => "short",
            Self::Int => "int",
            Self::Long => "long",
            Self::Float => "float",
            Self::Double => "double",
            Self::Char => "char",
            Self::Boolean => "boolean",
            Self::String => "string",
            Self::ByteArray => "bytearray",
            Self::BigInteger => "biginteger",
            Self::Sequence => "sequence",
            Self::Mapping => "mapping",
            Self::Composite(_) => "composite",
        }
    }
}

impl PackValue {
    /// Returns the runtime kind, or `None` for `Null`.
    pub fn kind(&self) -> Option<ValueKind> {
        let kind = match self {
            Self::Null => return None,
            Self::Byte(_) => ValueKind::Byte,
            Self::Short(_) => ValueKind::Short,
            Self::Int(_) => ValueKind::Int,
            Self::Long(_) => ValueKind::Long,
            Self::Float(_) => ValueKind::Float,
            Self::Double(_) => ValueKind::Double,
            Self::Char(_) => ValueKind::Char,
            Self::Boolean(_) => ValueKind::Boolean,
            Self::String(_) => ValueKind::String,
            Self::ByteArray(_) => ValueKind::ByteArray,
            Self::BigInteger(_) => ValueKind::BigInteger,
            Self::Sequence(_) => ValueKind::Sequence,
            Self::Mapping(_) => ValueKind::Mapping,
            Self::Object(o) => ValueKind::Composite(o.type_name().to_string()),
        };
        Some(kind)
    }

    /// Variant name for diagnostics.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Byte(_) => "byte",
            Self::Short(_) => "short",
            Self::Int(_) => "int",
            Self::Long(_) => "long",
            Self::Float(_) => "float",
            Self::Double(_) => "double",
            Self::Char(_) => "char",
            Self::Boolean(_) => "boolean",
            Self::String(_) => "string",
            Self::ByteArray(_) => "bytearray",
            Self::BigInteger(_) => "biginteger",
            Self::Sequence(_) => "sequence",
            Self::Mapping(_) => "mapping",
            Self::Object(_) => "composite",
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Wraps a host record as a composite value.
    pub fn object(record: impl super::Record) -> Self {
        Self::Object(PackObject::new(record))
    }

    /// Builds a byte-array value.
    pub fn bytes(data: impl Into<Vec<u8>>) -> Self {
        Self::ByteArray(data.into())
    }

    /// Returns the value as a string reference, if it is a `String` variant.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    /// Returns the value as an i32, if it is an `Int` variant.
    pub fn as_int(&self) -> Option<i32> {
        match self {
            Self::Int(i) => Some(*i),
            _ => None,
        }
    }

    pub fn as_sequence(&self) -> Option<&PackSequence> {
        match self {
            Self::Sequence(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_mapping(&self) -> Option<&PackMapping> {
        match self {
            Self::Mapping(m) => Some(m),
            _ => None,
        }
    }

    pub fn as_object(&self) -> Option<&PackObject> {
        match self {
            Self::Object(o) => Some(o),
            _ => None,
        }
    }

    /// Converts a composite value back into the concrete host record `T`.
    pub fn into_record<T: super::Record + Clone>(self) -> Result<T, PackError> {
        match &self {
            Self::Object(o) => o.downcast_ref::<T>().cloned().ok_or_else(|| {
                PackError::TypeMismatch {
                    expected: std::any::type_name::<T>(),
                    found: format!("composite {}", o.type_name()),
                }
            }),
            other => Err(PackError::mismatch("composite", other)),
        }
    }
}

impl fmt::Display for PackValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => f.write_str("null"),
            Self::Byte(v) => write!(f, "{v}b"),
            Self::Short(v) => write!(f, "{v}s"),
            Self::Int(v) => write!(f, "{v}"),
            Self::Long(v) => write!(f, "{v}L"),
            Self::Float(v) => write!(f, "{v}f"),
            Self::Double(v) => write!(f, "{v}"),
            Self::Char(v) => write!(f, "'\\u{v:04x}'"),
            Self::Boolean(v) => write!(f, "{v}"),
            Self::String(s) => write!(f, "{s:?}"),
            Self::ByteArray(b) => write!(f, "<{} bytes>", b.len()),
            Self::BigInteger(n) => write!(f, "{n}n"),
            Self::Sequence(s) => write!(f, "[{} items]", s.len()),
            Self::Mapping(m) => write!(f, "{{{} entries}}", m.len()),
            Self::Object(o) => write!(f, "{}(..)", o.type_name()),
        }
    }
}

// -- Convenience conversions --

macro_rules! from_primitive {
    ($($ty:ty => $variant:ident),* $(,)?) => {
        $(
            impl From<$ty> for PackValue {
                fn from(v: $ty) -> Self {
                    Self::$variant(v)
                }
            }
        )*
    };
}

from_primitive! {
    i8 => Byte,
    i16 => Short,
    i32 => Int,
    i64 => Long,
    f32 => Float,
    f64 => Double,
    bool => Boolean,
    String => String,
    BigInt => BigInteger,
    PackSequence => Sequence,
    PackMapping => Mapping,
    PackObject => Object,
}

impl From<&str> for PackValue {
    fn from(s: &str) -> Self {
        Self::String(s.to_string())
    }
}

impl From<Bytes> for PackValue {
    fn from(b: Bytes) -> Self {
        Self::ByteArray(b.to_vec())
    }
}

impl<T: Into<PackValue>> From<Option<T>> for PackValue {
    fn from(v: Option<T>) -> Self {
        v.map_or(Self::Null, Into::into)
    }
}

impl<T: Into<PackValue>> From<Vec<T>> for PackValue {
    fn from(items: Vec<T>) -> Self {
        Self::Sequence(items.into_iter().map(Into::into).collect())
    }
}

/// Strict conversion out of a [`PackValue`]; no numeric widening.
pub trait FromPackValue: Sized {
    fn from_pack_value(value: PackValue) -> Result<Self, PackError>;
}

macro_rules! from_pack_value {
    ($($ty:ty => $variant:ident, $name:literal),* $(,)?) => {
        $(
            impl FromPackValue for $ty {
                fn from_pack_value(value: PackValue) -> Result<Self, PackError> {
                    match value {
                        PackValue::$variant(v) => Ok(v),
                        other => Err(PackError::mismatch($name, &other)),
                    }
                }
            }
        )*
    };
}

from_pack_value! {
    i8 => Byte, "byte",
    i16 => Short, "short",
    i32 => Int, "int",
    i64 => Long, "long",
    f32 => Float, "float",
    f64 => Double, "double",
    u16 => Char, "char",
    bool => Boolean, "boolean",
    String => String, "string",
    BigInt => BigInteger, "biginteger",
    PackSequence => Sequence, "sequence",
    PackMapping => Mapping, "mapping",
    PackObject => Object, "composite",
}

impl FromPackValue for PackValue {
    fn from_pack_value(value: PackValue) -> Result<Self, PackError> {
        Ok(value)
    }
}

impl FromPackValue for Bytes {
    fn from_pack_value(value: PackValue) -> Result<Self, PackError> {
        match value {
            PackValue::ByteArray(b) => Ok(Bytes::from(b)),
            other => Err(PackError::mismatch("bytearray", &other)),
        }
    }
}

impl<T: FromPackValue> FromPackValue for Option<T> {
    fn from_pack_value(value: PackValue) -> Result<Self, PackError> {
        match value {
            PackValue::Null => Ok(None),
            other => T::from_pack_value(other).map(Some),
        }
    }
}

impl<T: FromPackValue> FromPackValue for Vec<T> {
    fn from_pack_value(value: PackValue) -> Result<Self, PackError> {
        match value {
            PackValue::Sequence(seq) => seq.into_items().into_iter().map(T::from_pack_value).collect(),
            other => Err(PackError::mismatch("sequence", &other)),
        }
    }
}
