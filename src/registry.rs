//! Host-populated registry of composite types.
//!
//! Decoding a composite resolves its wire type identifier here. The host must
//! register every type it expects to decode before decoding starts; after
//! that the registry is only read, and may be shared across threads.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use crate::error::PackError;
use crate::types::{PackObject, PackValue, RecordType};

/// Positional constructor: receives the decoded field values in declared
/// order and builds the host object.
pub type Constructor = Arc<dyn Fn(Vec<PackValue>) -> Result<PackObject, PackError> + Send + Sync>;

/// Field layout and constructor for one composite type.
#[derive(Clone)]
pub struct TypeDescriptor {
    name: String,
    fields: Vec<String>,
    constructor: Constructor,
}

impl TypeDescriptor {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn fields(&self) -> &[String] {
        &self.fields
    }

    /// Number of declared fields.
    pub fn arity(&self) -> usize {
        self.fields.len()
    }

    /// Invokes the constructor after checking the arity.
    pub fn construct(&self, fields: Vec<PackValue>) -> Result<PackObject, PackError> {
        if fields.len() != self.arity() {
            return Err(PackError::ArityMismatch {
                type_name: self.name.clone(),
                expected: self.arity(),
                found: fields.len(),
            });
        }
        (self.constructor)(fields)
    }
}

impl fmt::Debug for TypeDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TypeDescriptor")
            .field("name", &self.name)
            .field("fields", &self.fields)
            .finish_non_exhaustive()
    }
}

/// Maps type identifiers to [`TypeDescriptor`]s.
#[derive(Debug, Clone, Default)]
pub struct TypeRegistry {
    types: HashMap<String, TypeDescriptor>,
}

impl TypeRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a type under `name`. A later registration of the same name
    /// replaces the earlier one.
    pub fn register<F>(
        &mut self,
        name: impl Into<String>,
        fields: impl IntoIterator<Item = impl Into<String>>,
        constructor: F,
    ) -> &mut Self
    where
        F: Fn(Vec<PackValue>) -> Result<PackObject, PackError> + Send + Sync + 'static,
    {
        let name = name.into();
        let descriptor = TypeDescriptor {
            name: name.clone(),
            fields: fields.into_iter().map(Into::into).collect(),
            constructor: Arc::new(constructor),
        };
        let arity = descriptor.arity();
        if self.types.insert(name.clone(), descriptor).is_some() {
            tracing::warn!(type_name = %name, arity, "replaced composite type registration");
        } else {
            tracing::debug!(type_name = %name, arity, "registered composite type");
        }
        self
    }

    /// Registers a [`RecordType`] under its `TYPE_NAME`.
    pub fn register_record<T: RecordType>(&mut self) -> &mut Self {
        self.register(T::TYPE_NAME, T::FIELDS.iter().copied(), |fields| {
            T::from_fields(fields).map(PackObject::new)
        })
    }

    /// Looks up the descriptor for `name`.
    pub fn resolve(&self, name: &str) -> Option<&TypeDescriptor> {
        self.types.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.types.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    /// Registered type identifiers, in no particular order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.types.keys().map(String::as_str)
    }
}
