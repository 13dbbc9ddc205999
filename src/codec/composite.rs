//! Composite records: type identifier, explicit field count, positional fields.
//!
//! Layout: `COMPOSITE`, untagged UTF-16 type identifier, 4-byte field count,
//! then each field as a tagged value. The explicit count lets composites
//! nest and sit next to each other anywhere in a document.

use bytes::{Buf, BufMut};

use super::decode::{DecodeContext, capacity_hint, decode_nested, read_len};
use super::encode::{Trail, encode_nested, ensure_capacity, len_prefix};
use super::primitive::{get_utf16, put_utf16, utf16_layout};
use super::tag::{self, LEN_SIZE};
use crate::error::PackError;
use crate::types::{PackObject, PackValue};

pub(crate) fn encode_composite<B: BufMut>(
    buf: &mut B,
    object: &PackObject,
    trail: &mut Trail,
) -> Result<(), PackError> {
    trail.enter(object)?;

    let type_name = object.type_name();
    let fields = object.fields();
    let (name_len, name_size) = utf16_layout(type_name)?;
    let count = len_prefix(fields.len())?;

    ensure_capacity(buf, 1 + name_size + LEN_SIZE)?;
    buf.put_u8(tag::COMPOSITE);
    put_utf16(buf, name_len, type_name);
    buf.put_i32(count);
    for field in &fields {
        encode_nested(buf, field, trail)?;
    }

    trail.leave(object);
    Ok(())
}

/// Decodes a composite body. The constructor only runs once every field has
/// been decoded.
pub(crate) fn decode_composite<B: Buf>(
    buf: &mut B,
    ctx: &mut DecodeContext<'_>,
) -> Result<PackValue, PackError> {
    let type_name = get_utf16(buf)?;
    let count = read_len(buf)?;

    let registry = ctx.registry;
    let Some(descriptor) = registry.resolve(&type_name) else {
        tracing::debug!(%type_name, "composite type not registered");
        return Err(PackError::UnknownType(type_name));
    };
    if count != descriptor.arity() {
        tracing::debug!(%type_name, expected = descriptor.arity(), found = count, "composite arity mismatch");
        return Err(PackError::ArityMismatch {
            type_name,
            expected: descriptor.arity(),
            found: count,
        });
    }

    let mut fields = Vec::with_capacity(capacity_hint(count, buf));
    for _ in 0..count {
        fields.push(decode_nested(buf, ctx)?);
    }
    descriptor.construct(fields).map(PackValue::Object)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::codec::{decode_value, encode_value};
    use crate::registry::TypeRegistry;
    use crate::testing::{Document, Link, Nested, Outer, Pair, Sample, registry};
    use crate::types::RecordType;
    use bytes::BytesMut;

    fn encode(value: &PackValue) -> BytesMut {
        let mut buf = BytesMut::with_capacity(10_000);
        encode_value(&mut buf, value).unwrap();
        buf
    }

    #[test]
    fn record_round_trip_then_corrupt_tag() {
        let sample = Sample::new(42, "ok", &["a", "b"]);
        let mut buf = encode(&PackValue::object(sample.clone()));

        let decoded = decode_value(&mut &buf[..], &registry()).unwrap();
        let back = decoded.into_record::<Sample>().unwrap();
        assert_eq!(back.id, 42);
        assert_eq!(back.name.as_deref(), Some("ok"));
        assert_eq!(back.tags, vec!["a".to_string(), "b".to_string()]);
        assert_eq!(back, sample);

        buf[0] = 200;
        let err = decode_value(&mut &buf[..], &registry()).unwrap_err();
        assert!(matches!(err, PackError::UnknownTag(200)));
    }

    #[test]
    fn null_field_round_trip() {
        let sample = Sample::with_null_name(7);
        let buf = encode(&PackValue::object(sample.clone()));
        let decoded = decode_value(&mut &buf[..], &registry()).unwrap();
        assert_eq!(decoded.into_record::<Sample>().unwrap(), sample);
    }

    #[test]
    fn nested_composite_as_last_field() {
        let outer = Outer {
            label: None,
            count: -5,
            inner: Nested { value: 10 },
        };
        let buf = encode(&PackValue::object(outer.clone()));
        let decoded = decode_value(&mut &buf[..], &registry()).unwrap();
        assert_eq!(decoded.into_record::<Outer>().unwrap(), outer);
    }

    #[test]
    fn nested_composite_before_other_fields() {
        let pair = Pair {
            left: Some(Nested { value: 1 }),
            right: Nested { value: 2 },
        };
        let buf = encode(&PackValue::object(pair.clone()));
        let decoded = decode_value(&mut &buf[..], &registry()).unwrap();
        assert_eq!(decoded.into_record::<Pair>().unwrap(), pair);

        let pair = Pair {
            left: None,
            right: Nested { value: 3 },
        };
        let buf = encode(&PackValue::object(pair.clone()));
        let decoded = decode_value(&mut &buf[..], &registry()).unwrap();
        assert_eq!(decoded.into_record::<Pair>().unwrap(), pair);
    }

    #[test]
    fn large_document_round_trip() {
        let doc = Document::default();
        let buf = encode(&PackValue::object(doc.clone()));
        let decoded = decode_value(&mut &buf[..], &registry()).unwrap();
        assert_eq!(decoded.into_record::<Document>().unwrap(), doc);
    }

    #[test]
    fn unregistered_type() {
        let buf = encode(&PackValue::object(Nested { value: 1 }));
        let err = decode_value(&mut &buf[..], &TypeRegistry::new()).unwrap_err();
        assert!(matches!(err, PackError::UnknownType(ref name) if name == Nested::TYPE_NAME));
    }

    #[test]
    fn arity_mismatch_against_registry() {
        let buf = encode(&PackValue::object(Nested { value: 1 }));

        let mut drifted = TypeRegistry::new();
        drifted.register(Nested::TYPE_NAME, ["value", "added_later"], |_| {
            unreachable!("constructor must not run on arity mismatch")
        });
        let err = decode_value(&mut &buf[..], &drifted).unwrap_err();
        assert!(matches!(
            err,
            PackError::ArityMismatch { expected: 2, found: 1, .. }
        ));
    }

    #[test]
    fn constructor_failure_propagates() {
        // Registered constructor expects an int but the wire carries a string.
        let mut data = BytesMut::new();
        data.put_u8(tag::COMPOSITE);
        let (len, _) = utf16_layout(Nested::TYPE_NAME).unwrap();
        put_utf16(&mut data, len, Nested::TYPE_NAME);
        data.put_i32(1);
        encode_value(&mut data, &PackValue::from("ten")).unwrap();

        let err = decode_value(&mut &data[..], &registry()).unwrap_err();
        assert!(matches!(err, PackError::InvalidField { index: 0, .. }));
    }

    #[test]
    fn truncated_fields_underflow() {
        let buf = encode(&PackValue::object(Sample::new(1, "x", &[])));
        let cut = &buf[..buf.len() - 2];
        let err = decode_value(&mut &cut[..], &registry()).unwrap_err();
        assert!(matches!(err, PackError::BufferUnderflow { .. }));
    }

    #[test]
    fn self_reference_is_cyclic() {
        let link = Arc::new(Link::default());
        let obj = PackObject::from(link.clone());
        link.point_to(Some(obj.clone()));

        let mut buf = BytesMut::new();
        let err = encode_value(&mut buf, &PackValue::Object(obj)).unwrap_err();
        assert!(matches!(err, PackError::CyclicReference { ref type_name } if type_name == Link::NAME));

        link.point_to(None);
    }

    #[test]
    fn longer_cycle_is_cyclic() {
        let a = Arc::new(Link::default());
        let b = Arc::new(Link::default());
        a.point_to(Some(PackObject::from(b.clone())));
        b.point_to(Some(PackObject::from(a.clone())));

        let mut buf = BytesMut::new();
        let err = encode_value(&mut buf, &PackValue::Object(PackObject::from(a.clone()))).unwrap_err();
        assert!(matches!(err, PackError::CyclicReference { .. }));

        a.point_to(None);
        b.point_to(None);
    }

    #[test]
    fn shared_reference_is_not_a_cycle() {
        let shared = PackObject::new(Nested { value: 4 });
        let value = PackValue::from(vec![
            PackValue::Object(shared.clone()),
            PackValue::Object(shared),
        ]);
        let buf = encode(&value);
        let decoded = decode_value(&mut &buf[..], &registry()).unwrap();
        let items = decoded.as_sequence().unwrap().items();
        assert_eq!(items.len(), 2);
        assert_eq!(items[0], items[1]);
    }

    #[test]
    fn capacity_checked_before_header() {
        let mut storage = [0u8; 10];
        let mut slice: &mut [u8] = &mut storage;
        let err = encode_value(&mut slice, &PackValue::object(Nested { value: 1 })).unwrap_err();
        assert!(matches!(err, PackError::CapacityExceeded { remaining: 10, .. }));
        assert_eq!(storage, [0u8; 10]);
    }
}
