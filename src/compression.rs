//! zlib compression for encoded documents.
//!
//! Operates on opaque bytes; the codec never calls into this module.

use std::io::{self, Read, Write};

use flate2::Compression;
use flate2::read::ZlibDecoder;
use flate2::write::ZlibEncoder;

use crate::error::PackError;

/// Compresses `data` as a zlib stream at the fastest level.
pub fn compress(data: &[u8]) -> Result<Vec<u8>, PackError> {
    let mut encoder = ZlibEncoder::new(Vec::with_capacity(data.len() / 2), Compression::fast());
    encoder.write_all(data)?;
    let out = encoder.finish()?;
    tracing::debug!(input = data.len(), output = out.len(), "compressed");
    Ok(out)
}

/// Decompresses a zlib stream produced by [`compress`].
pub fn decompress(data: &[u8]) -> Result<Vec<u8>, PackError> {
    let mut out = Vec::with_capacity(data.len().saturating_mul(2));
    ZlibDecoder::new(data).read_to_end(&mut out)?;
    tracing::debug!(input = data.len(), output = out.len(), "decompressed");
    Ok(out)
}

/// Like [`decompress`], but fails once the output would exceed `max_len`.
pub fn decompress_with_limit(data: &[u8], max_len: usize) -> Result<Vec<u8>, PackError> {
    let mut out = Vec::new();
    let limit = u64::try_from(max_len).unwrap_or(u64::MAX).saturating_add(1);
    ZlibDecoder::new(data).take(limit).read_to_end(&mut out)?;
    if out.len() > max_len {
        return Err(PackError::Io(io::Error::new(
            io::ErrorKind::InvalidData,
            format!("decompressed data exceeds {max_len} bytes"),
        )));
    }
    tracing::debug!(input = data.len(), output = out.len(), "decompressed");
    Ok(out)
}
