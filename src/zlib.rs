//! Zlib compression for the image data.
//!
//! PNG image data is a zlib stream (deflate with the 2 byte zlib header and the
//! Adler-32 trailer). The codec only needs to inflate one stream and deflate
//! one stream, so that's all the [`Compressor`] trait asks for.

use alloc::vec::Vec;

use crate::CodecError;

/// Something that can inflate and deflate zlib streams.
pub trait Compressor {
  /// Inflates a complete zlib stream.
  ///
  /// `max_len` is the most output the caller will accept. An implementation
  /// may stop early once the output goes past it, as long as the output it
  /// returns is then longer than `max_len`.
  fn inflate(&self, zlib: &[u8], max_len: usize) -> Result<Vec<u8>, CodecError>;

  /// Deflates `raw` into a complete zlib stream.
  fn deflate(&self, raw: &[u8]) -> Result<Vec<u8>, CodecError>;
}

/// A [`Compressor`] using `miniz_oxide`.
#[cfg(feature = "miniz_oxide")]
#[cfg_attr(docs_rs, doc(cfg(feature = "miniz_oxide")))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MinizCompressor {
  /// Deflate level, 0 (store only) through 10 (slowest).
  pub level: u8,
}
#[cfg(feature = "miniz_oxide")]
impl MinizCompressor {
  pub const DEFAULT_LEVEL: u8 = 6;

  #[inline]
  #[must_use]
  pub const fn new(level: u8) -> Self {
    Self { level }
  }
}
#[cfg(feature = "miniz_oxide")]
impl Default for MinizCompressor {
  #[inline]
  #[must_use]
  fn default() -> Self {
    Self::new(Self::DEFAULT_LEVEL)
  }
}
#[cfg(feature = "miniz_oxide")]
impl Compressor for MinizCompressor {
  fn inflate(&self, zlib: &[u8], max_len: usize) -> Result<Vec<u8>, CodecError> {
    use miniz_oxide::inflate::{decompress_to_vec_zlib_with_limit, TINFLStatus};
    match decompress_to_vec_zlib_with_limit(zlib, max_len.saturating_add(1)) {
      Ok(out) => Ok(out),
      // more data than wanted, hand back what we have so the length check
      // downstream reports it.
      Err(e) if e.status == TINFLStatus::HasMoreOutput => Ok(e.output),
      Err(_) => Err(CodecError::Decompression),
    }
  }

  fn deflate(&self, raw: &[u8]) -> Result<Vec<u8>, CodecError> {
    Ok(miniz_oxide::deflate::compress_to_vec_zlib(raw, self.level))
  }
}
