//! Composite values: host records encoded positionally by declared field order.

use std::any::Any;
use std::fmt;
use std::sync::Arc;

use super::{FromPackValue, PackValue};
use crate::error::PackError;

/// A host type that can be written as a composite.
///
/// `fields` must return every stored field, in declaration order, on every
/// call. The decoder has no field names: reordering fields after data has
/// been persisted misdirects values.
pub trait Record: Any + fmt::Debug + Send + Sync {
    /// Fully-qualified type identifier written to the wire.
    fn type_name(&self) -> &str;

    /// Current field values in declaration order.
    fn fields(&self) -> Vec<PackValue>;
}

/// A [`Record`] that can also be rebuilt by the decoder.
///
/// Register it with [`TypeRegistry::register_record`](crate::registry::TypeRegistry::register_record).
pub trait RecordType: Record + Sized {
    /// Must match what [`Record::type_name`] returns.
    const TYPE_NAME: &'static str;

    /// Declared field names, in the order `fields` yields them.
    const FIELDS: &'static [&'static str];

    /// Canonical constructor. Receives exactly `FIELDS.len()` values.
    fn from_fields(fields: Vec<PackValue>) -> Result<Self, PackError>;
}

/// A shared handle to a live host record.
#[derive(Clone)]
pub struct PackObject(Arc<dyn Record>);

impl PackObject {
    pub fn new(record: impl Record) -> Self {
        Self(Arc::new(record))
    }

    /// Wraps an already shared record without copying it.
    pub fn from_arc(record: Arc<dyn Record>) -> Self {
        Self(record)
    }

    pub fn type_name(&self) -> &str {
        self.0.type_name()
    }

    pub fn fields(&self) -> Vec<PackValue> {
        self.0.fields()
    }

    /// Address of the shared record; equal for clones of the same handle.
    pub fn identity(&self) -> usize {
        Arc::as_ptr(&self.0) as *const () as usize
    }

    pub fn downcast_ref<T: Record>(&self) -> Option<&T> {
        let any: &dyn Any = &*self.0;
        any.downcast_ref::<T>()
    }

    pub fn is<T: Record>(&self) -> bool {
        self.downcast_ref::<T>().is_some()
    }
}

impl<T: Record> From<Arc<T>> for PackObject {
    fn from(record: Arc<T>) -> Self {
        Self(record)
    }
}

impl fmt::Debug for PackObject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&*self.0, f)
    }
}

/// Two objects are equal when they are the same handle, or when they share a
/// type identifier and all field values compare equal.
///
/// Fields are compared recursively. Comparing two distinct handles whose
/// graphs loop back on themselves does not terminate; only the same handle
/// short-circuits.
impl PartialEq for PackObject {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
            || (self.type_name() == other.type_name() && self.fields() == other.fields())
    }
}

/// Pulls typed fields out of a constructor's positional argument list.
pub struct FieldReader {
    type_name: &'static str,
    fields: std::vec::IntoIter<PackValue>,
    index: usize,
}

impl FieldReader {
    pub fn new(type_name: &'static str, fields: Vec<PackValue>) -> Self {
        Self {
            type_name,
            fields: fields.into_iter(),
            index: 0,
        }
    }

    /// Reads the next field as `T`.
    pub fn read<T: FromPackValue>(&mut self) -> Result<T, PackError> {
        let index = self.index;
        let value = self.take()?;
        T::from_pack_value(value).map_err(|e| self.invalid(index, e))
    }

    /// Reads the next field as a nested record of type `T`.
    pub fn read_record<T: Record + Clone>(&mut self) -> Result<T, PackError> {
        let index = self.index;
        let value = self.take()?;
        value.into_record::<T>().map_err(|e| self.invalid(index, e))
    }

    /// Reads the next field as an optional nested record; `Null` yields `None`.
    pub fn read_optional_record<T: Record + Clone>(&mut self) -> Result<Option<T>, PackError> {
        let index = self.index;
        match self.take()? {
            PackValue::Null => Ok(None),
            value => value
                .into_record::<T>()
                .map(Some)
                .map_err(|e| self.invalid(index, e)),
        }
    }

    fn take(&mut self) -> Result<PackValue, PackError> {
        let index = self.index;
        self.index += 1;
        self.fields.next().ok_or_else(|| PackError::InvalidField {
            type_name: self.type_name.to_string(),
            index,
            reason: "missing".into(),
        })
    }

    fn invalid(&self, index: usize, source: PackError) -> PackError {
        PackError::InvalidField {
            type_name: self.type_name.to_string(),
            index,
            reason: source.to_string(),
        }
    }
}
