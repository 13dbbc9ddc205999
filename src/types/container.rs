//! Ordered sequence and key-ordered mapping containers.

use super::{PackValue, ValueKind};

/// An ordered list of values.
///
/// `element_kind` is `None` for untyped (heterogeneous) sequences. Sequences
/// built by the host start untyped; the decoder narrows them when every
/// non-null element shares one kind.
///
/// Equality compares items only; the element kind is an annotation.
#[derive(Debug, Clone, Default)]
pub struct PackSequence {
    element_kind: Option<ValueKind>,
    items: Vec<PackValue>,
}

impl PackSequence {
    /// Creates an untyped sequence.
    pub fn new(items: Vec<PackValue>) -> Self {
        Self {
            element_kind: None,
            items,
        }
    }

    /// Creates a sequence narrowed to `kind`.
    pub fn typed(kind: ValueKind, items: Vec<PackValue>) -> Self {
        Self {
            element_kind: Some(kind),
            items,
        }
    }

    pub fn element_kind(&self) -> Option<&ValueKind> {
        self.element_kind.as_ref()
    }

    pub fn is_typed(&self) -> bool {
        self.element_kind.is_some()
    }

    pub fn items(&self) -> &[PackValue] {
        &self.items
    }

    pub fn into_items(self) -> Vec<PackValue> {
        self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, PackValue> {
        self.items.iter()
    }
}

impl PartialEq for PackSequence {
    fn eq(&self, other: &Self) -> bool {
        self.items == other.items
    }
}

impl FromIterator<PackValue> for PackSequence {
    fn from_iter<I: IntoIterator<Item = PackValue>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a PackSequence {
    type Item = &'a PackValue;
    type IntoIter = std::slice::Iter<'a, PackValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

/// An insertion-ordered list of key/value pairs.
///
/// Keys are not required to be unique; the codec neither enforces nor
/// collapses duplicates. Equality compares entries only.
#[derive(Debug, Clone, Default)]
pub struct PackMapping {
    key_kind: Option<ValueKind>,
    value_kind: Option<ValueKind>,
    entries: Vec<(PackValue, PackValue)>,
}

impl PackMapping {
    /// Creates an untyped mapping.
    pub fn new(entries: Vec<(PackValue, PackValue)>) -> Self {
        Self {
            key_kind: None,
            value_kind: None,
            entries,
        }
    }

    /// Creates a mapping with explicit key and value kinds.
    pub fn typed(
        key_kind: Option<ValueKind>,
        value_kind: Option<ValueKind>,
        entries: Vec<(PackValue, PackValue)>,
    ) -> Self {
        Self {
            key_kind,
            value_kind,
            entries,
        }
    }

    pub fn key_kind(&self) -> Option<&ValueKind> {
        self.key_kind.as_ref()
    }

    pub fn value_kind(&self) -> Option<&ValueKind> {
        self.value_kind.as_ref()
    }

    pub fn entries(&self) -> &[(PackValue, PackValue)] {
        &self.entries
    }

    pub fn into_entries(self) -> Vec<(PackValue, PackValue)> {
        self.entries
    }

    /// Returns the value paired with the first occurrence of `key`.
    pub fn get(&self, key: &PackValue) -> Option<&PackValue> {
        self.entries.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    /// Appends a pair, keeping any earlier pair with the same key.
    pub fn push(&mut self, key: impl Into<PackValue>, value: impl Into<PackValue>) {
        self.entries.push((key.into(), value.into()));
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, (PackValue, PackValue)> {
        self.entries.iter()
    }
}

impl PartialEq for PackMapping {
    fn eq(&self, other: &Self) -> bool {
        self.entries == other.entries
    }
}

impl<K: Into<PackValue>, V: Into<PackValue>> FromIterator<(K, V)> for PackMapping {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self::new(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}
