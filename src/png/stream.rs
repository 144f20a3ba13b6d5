use alloc::vec::Vec;

use super::*;
use crate::CodecError;

/// The parts of a PNG this codec needs: its header and all of its compressed
/// image data joined together.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PngStream {
  pub header: IHDR,
  /// Every `IDAT` chunk's data, concatenated in file order.
  pub idat: Vec<u8>,
}
impl PngStream {
  /// Parses an entire PNG datastream.
  ///
  /// * Every chunk must have a correct CRC, including chunks that are
  ///   otherwise ignored.
  /// * Chunks must exactly fill the buffer after the signature.
  /// * If there's more than one `IHDR` the last one wins. Chunk order is not
  ///   checked.
  pub fn parse(bytes: &[u8]) -> Result<Self, CodecError> {
    let mut header: Option<IHDR> = None;
    let mut idat: Vec<u8> = Vec::new();
    let mut it = PngChunkIter::new(bytes);
    for chunk in it.by_ref() {
      let chunk = chunk?;
      match chunk.ty() {
        PngChunkTy::IHDR => header = Some(IHDR::try_from(chunk.data())?),
        PngChunkTy::IDAT => idat.extend_from_slice(chunk.data()),
        _ => (),
      }
    }
    if it.offset() != bytes.len() {
      return Err(CodecError::StreamLengthMismatch { parsed: it.offset(), actual: bytes.len() });
    }
    let header = header.ok_or(CodecError::MissingHeader)?;
    Ok(Self { header, idat })
  }

  /// Writes a minimal PNG: the signature, `IHDR`, one `IDAT`, and `IEND`.
  ///
  /// The `idat` bytes are written as a single chunk no matter how long they
  /// are.
  pub fn write(&self) -> Result<Vec<u8>, CodecError> {
    let mut out = Vec::with_capacity(
      PNG_SIGNATURE.len() + IHDR::DATA_LEN + self.idat.len() + 3 * CHUNK_OVERHEAD,
    );
    out.extend_from_slice(&PNG_SIGNATURE);
    write_chunk(PngChunkTy::IHDR, &self.header.to_bytes(), &mut out)?;
    write_chunk(PngChunkTy::IDAT, &self.idat, &mut out)?;
    write_chunk(PngChunkTy::IEND, &[], &mut out)?;
    Ok(out)
  }
}
