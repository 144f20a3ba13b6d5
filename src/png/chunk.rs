use alloc::vec::Vec;
use core::fmt::Write;

use super::*;
use crate::CodecError;

/// Bytes of framing around each chunk's data: length, type, and CRC.
pub const CHUNK_OVERHEAD: usize = 12;

/// A PNG chunk type tag, such as `IHDR`.
///
/// The tag is supposed to be ASCII letters but that isn't enforced, the
/// `Debug` and `Display` impls just `as` cast each byte into a character.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(transparent)]
pub struct PngChunkTy(pub [u8; 4]);
#[allow(nonstandard_style)]
impl PngChunkTy {
  pub const IHDR: Self = Self(*b"IHDR");
  pub const IDAT: Self = Self(*b"IDAT");
  pub const IEND: Self = Self(*b"IEND");

  /// Critical chunks have an uppercase first letter.
  #[inline]
  #[must_use]
  pub const fn is_critical(self) -> bool {
    (self.0[0] & 32) == 0
  }
}
impl core::fmt::Debug for PngChunkTy {
  fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
    f.write_char('\"')?;
    core::fmt::Display::fmt(self, f)?;
    f.write_char('\"')
  }
}
impl core::fmt::Display for PngChunkTy {
  fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
    for ch in self.0.iter().copied().map(|u| u as char) {
      f.write_char(ch)?;
    }
    Ok(())
  }
}

/// A single chunk borrowed out of PNG bytes, with its CRC already checked.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PngChunk<'b> {
  pub(crate) ty: PngChunkTy,
  pub(crate) data: &'b [u8],
  pub(crate) declared_crc: u32,
}
impl core::fmt::Debug for PngChunk<'_> {
  #[inline]
  fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
    f.debug_struct("PngChunk")
      .field("ty", &self.ty)
      .field("data", &(&self.data[..self.data.len().min(12)], self.data.len()))
      .field("declared_crc", &self.declared_crc)
      .finish()
  }
}
impl<'b> PngChunk<'b> {
  #[inline]
  #[must_use]
  pub const fn ty(&self) -> PngChunkTy {
    self.ty
  }
  #[inline]
  #[must_use]
  pub const fn data(&self) -> &'b [u8] {
    self.data
  }
  #[inline]
  #[must_use]
  pub const fn declared_crc(&self) -> u32 {
    self.declared_crc
  }
  #[inline]
  #[must_use]
  pub fn compute_actual_crc(&self) -> u32 {
    png_crc(self.ty.0.iter().copied().chain(self.data.iter().copied()))
  }
}

/// Reads the chunk that starts at `offset`.
///
/// On success you get the chunk and the offset of whatever follows it.
///
/// ## Failure
/// * [`CodecError::ChunkStructure`] if the length, type, data, and CRC don't
///   all fit within `bytes`.
/// * [`CodecError::ChecksumMismatch`] if the stored CRC is wrong.
pub fn read_chunk(bytes: &[u8], offset: usize) -> Result<(PngChunk<'_>, usize), CodecError> {
  let length = match bytes.get(offset..).and_then(|rest| rest.get(..4)) {
    Some(len_bytes) => u32::from_be_bytes(len_bytes.try_into().unwrap()),
    None => return Err(CodecError::ChunkStructure { offset, length: None }),
  };
  let next_offset = offset
    .checked_add(length as usize)
    .and_then(|end| end.checked_add(CHUNK_OVERHEAD))
    .filter(|end| *end <= bytes.len())
    .ok_or(CodecError::ChunkStructure { offset, length: Some(length) })?;
  let chunk = &bytes[offset + 4..next_offset];
  let (ty_bytes, rest) = chunk.split_at(4);
  let (data, crc_bytes) = rest.split_at(length as usize);
  let ty = PngChunkTy(ty_bytes.try_into().unwrap());
  let declared_crc = u32::from_be_bytes(crc_bytes.try_into().unwrap());
  let png_chunk = PngChunk { ty, data, declared_crc };
  if png_chunk.compute_actual_crc() != declared_crc {
    return Err(CodecError::ChecksumMismatch { chunk_type: ty });
  }
  Ok((png_chunk, next_offset))
}

/// Appends a complete chunk (length, type, data, CRC) to `buf`.
///
/// Returns the offset just past the written CRC, which is also the new length
/// of `buf`.
///
/// ## Failure
/// * [`CodecError::DimensionsTooLarge`] if `data` is longer than a chunk can
///   declare.
pub fn write_chunk(ty: PngChunkTy, data: &[u8], buf: &mut Vec<u8>) -> Result<usize, CodecError> {
  let length = u32::try_from(data.len())?;
  buf.reserve(data.len() + CHUNK_OVERHEAD);
  buf.extend_from_slice(&length.to_be_bytes());
  buf.extend_from_slice(&ty.0);
  buf.extend_from_slice(data);
  let crc = png_crc(ty.0.iter().copied().chain(data.iter().copied()));
  buf.extend_from_slice(&crc.to_be_bytes());
  Ok(buf.len())
}

/// An iterator that produces successive checked chunks from PNG bytes.
///
/// * The signature is checked on the first call to `next`.
/// * After the first error the iterator is fused and only returns `None`.
/// * Running out of bytes exactly at a chunk boundary ends the iteration.
#[derive(Debug, Clone)]
pub struct PngChunkIter<'b> {
  bytes: &'b [u8],
  offset: usize,
  failed: bool,
}
impl<'b> PngChunkIter<'b> {
  /// Pass the full PNG bytes, including the signature.
  #[inline]
  #[must_use]
  pub const fn new(bytes: &'b [u8]) -> Self {
    Self { bytes, offset: 0, failed: false }
  }

  /// Offset of the next unread byte.
  #[inline]
  #[must_use]
  pub const fn offset(&self) -> usize {
    self.offset
  }
}
impl<'b> Iterator for PngChunkIter<'b> {
  type Item = Result<PngChunk<'b>, CodecError>;

  fn next(&mut self) -> Option<Self::Item> {
    if self.failed {
      return None;
    }
    if self.offset == 0 {
      if !is_png_header_correct(self.bytes) {
        self.failed = true;
        return Some(Err(CodecError::PreambleMismatch));
      }
      self.offset = PNG_SIGNATURE.len();
    }
    if self.offset >= self.bytes.len() {
      return None;
    }
    match read_chunk(self.bytes, self.offset) {
      Ok((chunk, next_offset)) => {
        self.offset = next_offset;
        Some(Ok(chunk))
      }
      Err(e) => {
        self.failed = true;
        Some(Err(e))
      }
    }
  }
}
