use alloc::vec::Vec;

use crate::{
  png::{filter_as_none, unfilter_decompressed_data, PngStream, IHDR},
  transform::apply_demo_colors,
  CodecError, Compressor,
};

/// Checks the header for the image features this codec refuses to handle.
///
/// Greyscale color types get through here, but they'll fail the scanline
/// length check later on since they have fewer bytes per pixel than the
/// alpha-bit rule assumes.
pub fn check_header_supported(header: &IHDR) -> Result<(), CodecError> {
  if header.bit_depth != 8 {
    return Err(CodecError::UnsupportedBitDepth(header.bit_depth));
  }
  if (header.color_type & 1) != 0 {
    return Err(CodecError::UnsupportedColorType(header.color_type));
  }
  if header.interlace_method != 0 {
    return Err(CodecError::UnsupportedInterlace(header.interlace_method));
  }
  Ok(())
}

/// Transforms PNG bytes into new PNG bytes using the given compressor.
///
/// The steps, each of which can abort the whole call:
/// 1) Check the signature and parse every chunk (CRCs included).
/// 2) Take the header, and gather all `IDAT` data into one zlib stream.
/// 3) Inflate, then unfilter the scanlines in place.
/// 4) Apply the [demo colors](crate::transform).
/// 5) Mark every row as unfiltered, deflate, and write a PNG with exactly one
///    `IHDR`, one `IDAT`, and an `IEND`.
pub fn transform_png_with<C: Compressor + ?Sized>(
  compressor: &C, bytes: &[u8],
) -> Result<Vec<u8>, CodecError> {
  let PngStream { header, idat } = PngStream::parse(bytes)?;
  check_header_supported(&header)?;
  let expected = header.get_zlib_decompression_requirement()?;

  let mut scanlines = compressor.inflate(&idat, expected)?;
  unfilter_decompressed_data(&header, &mut scanlines)?;
  apply_demo_colors(&header, &mut scanlines)?;
  filter_as_none(&header, &mut scanlines)?;

  let idat = compressor.deflate(&scanlines)?;
  PngStream { header, idat }.write()
}

/// Transforms PNG bytes into new PNG bytes using [`MinizCompressor`](crate::MinizCompressor)
/// at its default level.
#[cfg(feature = "miniz_oxide")]
#[cfg_attr(docs_rs, doc(cfg(feature = "miniz_oxide")))]
#[inline]
pub fn transform_png(bytes: &[u8]) -> Result<Vec<u8>, CodecError> {
  transform_png_with(&crate::MinizCompressor::default(), bytes)
}
