use core::num::TryFromIntError;

use crate::png::PngChunkTy;

/// An error from the `thumbnail` crate.
///
/// Every variant is fatal to the call that produced it. Nothing is retried and
/// no partial output is ever returned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CodecError {
  /// The input doesn't start with the 8 byte PNG signature.
  PreambleMismatch,

  /// A chunk's declared length runs past the end of the buffer.
  ///
  /// `length` is `None` when there weren't even 4 bytes left to read the
  /// length from.
  ChunkStructure { offset: usize, length: Option<u32> },

  /// The CRC stored after a chunk doesn't match its type and data.
  ChecksumMismatch { chunk_type: PngChunkTy },

  /// Chunk parsing stopped somewhere other than the exact end of the buffer.
  StreamLengthMismatch { parsed: usize, actual: usize },

  /// The `IHDR` chunk body wasn't exactly 13 bytes.
  HeaderLength { length: usize },

  /// There was no `IHDR` chunk at all.
  MissingHeader,

  /// Only 8 bits per channel is supported.
  UnsupportedBitDepth(u8),

  /// Indexed color images are not supported.
  UnsupportedColorType(u8),

  /// Interlaced images are not supported.
  UnsupportedInterlace(u8),

  /// A scanline used a filter type other than None, Sub, or Up.
  UnsupportedFilter { filter_type: u8, row: u32 },

  /// The decompressed image data isn't the size the header calls for.
  ScanlineLengthMismatch { expected: usize, actual: usize },

  /// The header's dimensions overflow the size math.
  DimensionsTooLarge,

  /// The zlib stream couldn't be inflated.
  Decompression,

  /// The pixel data couldn't be deflated.
  Compression,
}

impl core::fmt::Display for CodecError {
  fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
    match self {
      Self::PreambleMismatch => write!(f, "no valid PNG preamble"),
      Self::ChunkStructure { offset, length: Some(length) } => {
        write!(f, "invalid chunk length ({length}) at byte {offset}")
      }
      Self::ChunkStructure { offset, length: None } => {
        write!(f, "truncated chunk length at byte {offset}")
      }
      Self::ChecksumMismatch { chunk_type } => {
        write!(f, "CRC mismatch in chunk of type {chunk_type}")
      }
      Self::StreamLengthMismatch { parsed, actual } => {
        write!(f, "parsed length ({parsed}) does not match buffer length ({actual})")
      }
      Self::HeaderLength { length } => {
        write!(f, "IHDR chunk data length ({length}) is not 13")
      }
      Self::MissingHeader => write!(f, "no IHDR chunk"),
      Self::UnsupportedBitDepth(depth) => write!(f, "unsupported bit depth {depth}"),
      Self::UnsupportedColorType(ty) => write!(f, "unsupported color type {ty}"),
      Self::UnsupportedInterlace(method) => write!(f, "unsupported interlace method {method}"),
      Self::UnsupportedFilter { filter_type, row } => {
        write!(f, "unsupported filter type {filter_type} on scanline {row}")
      }
      Self::ScanlineLengthMismatch { expected, actual } => {
        write!(f, "decompressed length ({actual}) does not match expected length ({expected})")
      }
      Self::DimensionsTooLarge => write!(f, "image dimensions are too large"),
      Self::Decompression => write!(f, "failed to inflate image data"),
      Self::Compression => write!(f, "failed to deflate image data"),
    }
  }
}

impl core::error::Error for CodecError {}

impl From<TryFromIntError> for CodecError {
  #[inline]
  fn from(_: TryFromIntError) -> Self {
    Self::DimensionsTooLarge
  }
}
