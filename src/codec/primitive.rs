//! Fixed-layout primitives: null, numbers, char, boolean, string, byte array
//! and big integer.
//!
//! Every encoder checks the complete encoded size against the buffer before
//! writing the tag, so a primitive is either fully written or not at all.

use bytes::{Buf, BufMut};
use num_bigint::BigInt;

use super::decode::{ensure_remaining, read_len};
use super::encode::{ensure_capacity, len_prefix};
use super::tag::{self, LEN_SIZE};
use crate::error::PackError;
use crate::types::PackValue;

/// Encodes any primitive variant. Containers and composites are rejected.
pub fn encode_primitive(buf: &mut impl BufMut, value: &PackValue) -> Result<(), PackError> {
    match value {
        PackValue::Null => encode_null(buf),
        PackValue::Byte(v) => encode_byte(buf, *v),
        PackValue::Short(v) => encode_short(buf, *v),
        PackValue::Int(v) => encode_int(buf, *v),
        PackValue::Long(v) => encode_long(buf, *v),
        PackValue::Float(v) => encode_float(buf, *v),
        PackValue::Double(v) => encode_double(buf, *v),
        PackValue::Char(v) => encode_char(buf, *v),
        PackValue::Boolean(v) => encode_bool(buf, *v),
        PackValue::String(s) => encode_string(buf, s),
        PackValue::ByteArray(b) => encode_bytes(buf, b),
        PackValue::BigInteger(n) => encode_big_integer(buf, n),
        other => Err(PackError::mismatch("primitive", other)),
    }
}

/// Checks room for the tag plus `payload` bytes, then writes the tag.
fn begin(buf: &mut impl BufMut, t: u8, payload: usize) -> Result<(), PackError> {
    ensure_capacity(buf, payload.saturating_add(1))?;
    buf.put_u8(t);
    Ok(())
}

pub fn encode_null(buf: &mut impl BufMut) -> Result<(), PackError> {
    begin(buf, tag::NULL, 0)
}

pub fn encode_byte(buf: &mut impl BufMut, value: i8) -> Result<(), PackError> {
    begin(buf, tag::BYTE, 1)?;
    buf.put_i8(value);
    Ok(())
}

pub fn encode_short(buf: &mut impl BufMut, value: i16) -> Result<(), PackError> {
    begin(buf, tag::SHORT, 2)?;
    buf.put_i16(value);
    Ok(())
}

pub fn encode_int(buf: &mut impl BufMut, value: i32) -> Result<(), PackError> {
    begin(buf, tag::INT, 4)?;
    buf.put_i32(value);
    Ok(())
}

pub fn encode_long(buf: &mut impl BufMut, value: i64) -> Result<(), PackError> {
    begin(buf, tag::LONG, 8)?;
    buf.put_i64(value);
    Ok(())
}

pub fn encode_float(buf: &mut impl BufMut, value: f32) -> Result<(), PackError> {
    begin(buf, tag::FLOAT, 4)?;
    buf.put_f32(value);
    Ok(())
}

pub fn encode_double(buf: &mut impl BufMut, value: f64) -> Result<(), PackError> {
    begin(buf, tag::DOUBLE, 8)?;
    buf.put_f64(value);
    Ok(())
}

pub fn encode_char(buf: &mut impl BufMut, value: u16) -> Result<(), PackError> {
    begin(buf, tag::CHAR, 2)?;
    buf.put_u16(value);
    Ok(())
}

/// Booleans take a full 4-byte integer on the wire.
pub fn encode_bool(buf: &mut impl BufMut, value: bool) -> Result<(), PackError> {
    begin(buf, tag::BOOLEAN, 4)?;
    buf.put_i32(i32::from(value));
    Ok(())
}

/// Encodes a string (prefix = UTF-16 code-unit count, not byte length).
pub fn encode_string(buf: &mut impl BufMut, value: &str) -> Result<(), PackError> {
    let (len, size) = utf16_layout(value)?;
    begin(buf, tag::STRING, size)?;
    put_utf16(buf, len, value);
    Ok(())
}

pub fn encode_bytes(buf: &mut impl BufMut, value: &[u8]) -> Result<(), PackError> {
    let len = len_prefix(value.len())?;
    begin(buf, tag::BYTEARRAY, LEN_SIZE + value.len())?;
    buf.put_i32(len);
    buf.put_slice(value);
    Ok(())
}

/// Encodes the minimal two's-complement big-endian form; the sign lives in
/// the top bit of the first byte.
pub fn encode_big_integer(buf: &mut impl BufMut, value: &BigInt) -> Result<(), PackError> {
    let bytes = value.to_signed_bytes_be();
    let len = len_prefix(bytes.len())?;
    begin(buf, tag::BIGINTEGER, LEN_SIZE + bytes.len())?;
    buf.put_i32(len);
    buf.put_slice(&bytes);
    Ok(())
}

/// Returns the code-unit prefix and total encoded size (prefix included) of
/// an untagged UTF-16 string.
pub(crate) fn utf16_layout(value: &str) -> Result<(i32, usize), PackError> {
    let units = value.encode_utf16().count();
    let len = len_prefix(units)?;
    Ok((len, LEN_SIZE + units.saturating_mul(2)))
}

/// Writes an untagged UTF-16 string. Capacity must already be checked.
pub(crate) fn put_utf16(buf: &mut impl BufMut, len: i32, value: &str) {
    buf.put_i32(len);
    for unit in value.encode_utf16() {
        buf.put_u16(unit);
    }
}

/// Reads an untagged UTF-16 string.
pub(crate) fn get_utf16(buf: &mut impl Buf) -> Result<String, PackError> {
    let len = read_len(buf)?;
    ensure_remaining(buf, len.saturating_mul(2))?;
    let units: Vec<u16> = (0..len).map(|_| buf.get_u16()).collect();
    String::from_utf16(&units).map_err(|e| PackError::InvalidString(e.to_string()))
}

/// Decodes the payload of an already-consumed primitive tag.
pub fn decode_primitive(t: u8, buf: &mut impl Buf) -> Result<PackValue, PackError> {
    match t {
        tag::NULL => Ok(PackValue::Null),
        tag::BYTE => {
            ensure_remaining(buf, 1)?;
            Ok(PackValue::Byte(buf.get_i8()))
        }
        tag::SHORT => {
            ensure_remaining(buf, 2)?;
            Ok(PackValue::Short(buf.get_i16()))
        }
        tag::INT => {
            ensure_remaining(buf, 4)?;
            Ok(PackValue::Int(buf.get_i32()))
        }
        tag::LONG => {
            ensure_remaining(buf, 8)?;
            Ok(PackValue::Long(buf.get_i64()))
        }
        tag::FLOAT => {
            ensure_remaining(buf, 4)?;
            Ok(PackValue::Float(buf.get_f32()))
        }
        tag::DOUBLE => {
            ensure_remaining(buf, 8)?;
            Ok(PackValue::Double(buf.get_f64()))
        }
        tag::CHAR => {
            ensure_remaining(buf, 2)?;
            Ok(PackValue::Char(buf.get_u16()))
        }
        // Any non-zero integer reads as true.
        tag::BOOLEAN => {
            ensure_remaining(buf, 4)?;
            Ok(PackValue::Boolean(buf.get_i32() != 0))
        }
        tag::STRING => get_utf16(buf).map(PackValue::String),
        tag::BYTEARRAY => decode_byte_run(buf).map(PackValue::ByteArray),
        tag::BIGINTEGER => {
            let bytes = decode_byte_run(buf)?;
            Ok(PackValue::BigInteger(BigInt::from_signed_bytes_be(&bytes)))
        }
        _ => Err(PackError::UnknownTag(t)),
    }
}

fn decode_byte_run(buf: &mut impl Buf) -> Result<Vec<u8>, PackError> {
    let len = read_len(buf)?;
    ensure_remaining(buf, len)?;
    let mut data = vec![0u8; len];
    buf.copy_to_slice(&mut data);
    Ok(data)
}
