//! Tagpack tag byte constants.
//!
//! These values are the format's only versioning mechanism. Tags below 30
//! never change meaning; new tags are appended above 30.

// Null
pub const NULL: u8 = 0;

// Fixed-width primitives
pub const BYTE: u8 = 1;
pub const SHORT: u8 = 2;
pub const INT: u8 = 3;
pub const LONG: u8 = 4;
pub const FLOAT: u8 = 5;
pub const DOUBLE: u8 = 6;
pub const CHAR: u8 = 7;
// Written as a 4-byte integer, not a single byte.
pub const BOOLEAN: u8 = 8;

// Length-prefixed primitives
pub const STRING: u8 = 9;
pub const BYTEARRAY: u8 = 10;
pub const BIGINTEGER: u8 = 11;

// Containers: 20..=29
pub const SEQUENCE: u8 = 20;
pub const MAPPING: u8 = 21;

// Composites: 30 and up
pub const COMPOSITE: u8 = 30;

/// Size of every length and count prefix.
pub const LEN_SIZE: usize = 4;

pub fn is_primitive(tag: u8) -> bool {
    tag <= BIGINTEGER
}
