//! Record fixtures shared by unit tests.

use std::fmt;
use std::sync::Mutex;

use bytes::Bytes;

use crate::error::PackError;
use crate::registry::TypeRegistry;
use crate::types::{FieldReader, PackObject, PackValue, Record, RecordType};

/// Implements [`Record`] by delegating to the [`RecordType`] constants and a
/// field list expression.
macro_rules! record {
    ($ty:ident, |$this:ident| $fields:expr) => {
        impl Record for $ty {
            fn type_name(&self) -> &str {
                <Self as RecordType>::TYPE_NAME
            }

            fn fields(&self) -> Vec<PackValue> {
                let $this = self;
                $fields
            }
        }
    };
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Sample {
    pub id: i32,
    pub name: Option<String>,
    pub tags: Vec<String>,
}

impl Sample {
    pub(crate) fn new(id: i32, name: &str, tags: &[&str]) -> Self {
        Self {
            id,
            name: Some(name.to_string()),
            tags: tags.iter().map(|t| t.to_string()).collect(),
        }
    }

    pub(crate) fn with_null_name(id: i32) -> Self {
        Self {
            id,
            name: None,
            tags: Vec::new(),
        }
    }
}

record!(Sample, |s| vec![
    s.id.into(),
    s.name.clone().into(),
    s.tags.clone().into(),
]);

impl RecordType for Sample {
    const TYPE_NAME: &'static str = "tagpack.testing.Sample";
    const FIELDS: &'static [&'static str] = &["id", "name", "tags"];

    fn from_fields(fields: Vec<PackValue>) -> Result<Self, PackError> {
        let mut r = FieldReader::new(Self::TYPE_NAME, fields);
        Ok(Self {
            id: r.read()?,
            name: r.read()?,
            tags: r.read()?,
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Nested {
    pub value: i32,
}

record!(Nested, |n| vec![n.value.into()]);

impl RecordType for Nested {
    const TYPE_NAME: &'static str = "tagpack.testing.Nested";
    const FIELDS: &'static [&'static str] = &["value"];

    fn from_fields(fields: Vec<PackValue>) -> Result<Self, PackError> {
        let mut r = FieldReader::new(Self::TYPE_NAME, fields);
        Ok(Self { value: r.read()? })
    }
}

/// Nested composite as its last field.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Outer {
    pub label: Option<String>,
    pub count: i64,
    pub inner: Nested,
}

record!(Outer, |o| vec![
    o.label.clone().into(),
    o.count.into(),
    PackValue::object(o.inner.clone()),
]);

impl RecordType for Outer {
    const TYPE_NAME: &'static str = "tagpack.testing.Outer";
    const FIELDS: &'static [&'static str] = &["label", "count", "inner"];

    fn from_fields(fields: Vec<PackValue>) -> Result<Self, PackError> {
        let mut r = FieldReader::new(Self::TYPE_NAME, fields);
        Ok(Self {
            label: r.read()?,
            count: r.read()?,
            inner: r.read_record()?,
        })
    }
}

/// Nested composites in first and last position.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Pair {
    pub left: Option<Nested>,
    pub right: Nested,
}

record!(Pair, |p| vec![
    p.left.clone().map_or(PackValue::Null, PackValue::object),
    PackValue::object(p.right.clone()),
]);

impl RecordType for Pair {
    const TYPE_NAME: &'static str = "tagpack.testing.Pair";
    const FIELDS: &'static [&'static str] = &["left", "right"];

    fn from_fields(fields: Vec<PackValue>) -> Result<Self, PackError> {
        let mut r = FieldReader::new(Self::TYPE_NAME, fields);
        Ok(Self {
            left: r.read_optional_record()?,
            right: r.read_record()?,
        })
    }
}

const LOREM: &str = "Lorem ipsum dolor sit amet, consectetur adipiscing elit. \
    Nunc tempor tortor ipsum, a tempor ante efficitur ac. Curabitur blandit \
    libero a ex pretium, vitae faucibus ipsum suscipit. Ut posuere fringilla \
    consequat. Suspendisse a risus vulputate, ultricies ante et, porttitor mi.\n";

/// A few kilobytes of mixed fields.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Document {
    pub text: String,
    pub long: i64,
    pub int: i32,
    pub raw: Bytes,
    pub nested: Nested,
}

impl Default for Document {
    fn default() -> Self {
        let text = LOREM.repeat(8);
        Self {
            raw: Bytes::from(text.clone().into_bytes()),
            text,
            long: 123_123,
            int: 123,
            nested: Nested { value: 10 },
        }
    }
}

record!(Document, |d| vec![
    d.text.as_str().into(),
    d.long.into(),
    d.int.into(),
    d.raw.clone().into(),
    PackValue::object(d.nested.clone()),
]);

impl RecordType for Document {
    const TYPE_NAME: &'static str = "tagpack.testing.Document";
    const FIELDS: &'static [&'static str] = &["text", "long", "int", "raw", "nested"];

    fn from_fields(fields: Vec<PackValue>) -> Result<Self, PackError> {
        let mut r = FieldReader::new(Self::TYPE_NAME, fields);
        Ok(Self {
            text: r.read()?,
            long: r.read()?,
            int: r.read()?,
            raw: r.read()?,
            nested: r.read_record()?,
        })
    }
}

/// Mutable singly-linked node, used to build reference cycles.
#[derive(Default)]
pub(crate) struct Link {
    next: Mutex<Option<PackObject>>,
}

// Printing `next` would recurse forever through a cycle.
impl fmt::Debug for Link {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Link").finish_non_exhaustive()
    }
}

impl Link {
    pub(crate) const NAME: &'static str = "tagpack.testing.Link";

    pub(crate) fn point_to(&self, next: Option<PackObject>) {
        *self.next.lock().unwrap() = next;
    }
}

impl Record for Link {
    fn type_name(&self) -> &str {
        Self::NAME
    }

    fn fields(&self) -> Vec<PackValue> {
        vec![self.next.lock().unwrap().clone().into()]
    }
}

/// Registry with every constructible fixture.
pub(crate) fn registry() -> TypeRegistry {
    let mut registry = TypeRegistry::new();
    registry
        .register_record::<Sample>()
        .register_record::<Nested>()
        .register_record::<Outer>()
        .register_record::<Pair>()
        .register_record::<Document>();
    registry
}
