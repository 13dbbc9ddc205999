//! Error types for the tagpack codec.

/// Errors that can occur while encoding, decoding or transforming documents.
#[derive(Debug, thiserror::Error)]
pub enum PackError {
    #[error("buffer underflow: need {needed} bytes but only {remaining} remaining")]
    BufferUnderflow { needed: usize, remaining: usize },

    #[error("capacity exceeded: need {needed} bytes but only {remaining} writable")]
    CapacityExceeded { needed: usize, remaining: usize },

    #[error("unknown tag: {0}")]
    UnknownTag(u8),

    #[error("unknown composite type: {0}")]
    UnknownType(String),

    #[error("arity mismatch for {type_name}: type declares {expected} fields, data has {found}")]
    ArityMismatch {
        type_name: String,
        expected: usize,
        found: usize,
    },

    #[error("cyclic reference through {type_name}")]
    CyclicReference { type_name: String },

    #[error("nesting depth exceeds limit of {limit}")]
    DepthExceeded { limit: usize },

    #[error("invalid length prefix: {0}")]
    InvalidLength(i32),

    #[error("length {0} does not fit a 4-byte prefix")]
    LengthOverflow(usize),

    #[error("invalid UTF-16 string: {0}")]
    InvalidString(String),

    #[error("type mismatch: expected {expected}, got {found}")]
    TypeMismatch {
        expected: &'static str,
        found: String,
    },

    #[error("invalid field {index} of {type_name}: {reason}")]
    InvalidField {
        type_name: String,
        index: usize,
        reason: String,
    },

    #[error("{0} trailing bytes after document")]
    TrailingBytes(usize),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("crypto error: {0}")]
    Crypto(String),

    #[cfg(feature = "json")]
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl PackError {
    /// Wraps any displayable error as a crypto error.
    pub fn crypto(e: impl std::fmt::Display) -> Self {
        Self::Crypto(e.to_string())
    }

    /// Builds a [`PackError::TypeMismatch`] for a value of the wrong variant.
    pub(crate) fn mismatch(expected: &'static str, found: &crate::types::PackValue) -> Self {
        Self::TypeMismatch {
            expected,
            found: found.kind_name().to_string(),
        }
    }

    /// Returns `true` for failures caused by the shape of the input bytes
    /// rather than by the host (registry drift, buffer sizing, bad objects).
    pub fn is_corrupt_input(&self) -> bool {
        matches!(
            self,
            Self::BufferUnderflow { .. }
                | Self::UnknownTag(_)
                | Self::InvalidLength(_)
                | Self::InvalidString(_)
                | Self::TrailingBytes(_)
        )
    }
}
