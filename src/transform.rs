//! The fixed color effect applied to every pixel.
//!
//! Despite the crate's name nothing is resized. Each channel is scaled by a
//! constant factor instead:
//!
//! * red is multiplied by `0.1`
//! * green is multiplied by `2`
//! * blue is multiplied by `3`
//! * alpha (if present) is left alone
//!
//! Results are truncated toward zero and then wrapped into a byte, so a green
//! of 200 becomes `400 % 256 = 144`, not 255.

use bytemuck::cast_slice_mut;

use crate::{png::IHDR, CodecError, RGB8, RGBA8};

pub const RED_SCALE: f64 = 0.1;
pub const GREEN_SCALE: f64 = 2.0;
pub const BLUE_SCALE: f64 = 3.0;

/// Keeps the integer part of `x`, wrapped into a byte.
#[inline]
#[must_use]
pub fn truncate_u8(x: f64) -> u8 {
  // `as u32` drops the fraction, then `as u8` keeps the low 8 bits
  x as u32 as u8
}

#[inline]
#[must_use]
pub fn scale_rgb(RGB8 { r, g, b }: RGB8) -> RGB8 {
  RGB8 {
    r: truncate_u8(f64::from(r) * RED_SCALE),
    g: truncate_u8(f64::from(g) * GREEN_SCALE),
    b: truncate_u8(f64::from(b) * BLUE_SCALE),
  }
}

#[inline]
#[must_use]
pub fn scale_rgba(RGBA8 { r, g, b, a }: RGBA8) -> RGBA8 {
  let RGB8 { r, g, b } = scale_rgb(RGB8 { r, g, b });
  RGBA8 { r, g, b, a }
}

/// Applies the color effect to unfiltered scanline data in place.
///
/// The data must be unfiltered already (every filter byte is skipped, not
/// checked), and exactly `height` rows long.
pub fn apply_demo_colors(header: &IHDR, unfiltered: &mut [u8]) -> Result<(), CodecError> {
  let expected = header.get_zlib_decompression_requirement()?;
  if unfiltered.len() != expected {
    return Err(CodecError::ScanlineLengthMismatch { expected, actual: unfiltered.len() });
  }
  let bytes_per_filterline = header.bytes_per_filterline()?;
  for line in unfiltered.chunks_exact_mut(bytes_per_filterline) {
    let pixels = &mut line[1..];
    if header.bytes_per_pixel() == 4 {
      cast_slice_mut::<u8, RGBA8>(pixels).iter_mut().for_each(|p| *p = scale_rgba(*p));
    } else {
      cast_slice_mut::<u8, RGB8>(pixels).iter_mut().for_each(|p| *p = scale_rgb(*p));
    }
  }
  Ok(())
}

#[test]
fn test_truncate_u8_wraps() {
  assert_eq!(truncate_u8(10.000000000000002), 10);
  assert_eq!(truncate_u8(25.5), 25);
  assert_eq!(truncate_u8(400.0), 144);
  assert_eq!(truncate_u8(765.0), 253);
  assert_eq!(truncate_u8(0.0), 0);
}

#[test]
fn test_scale_rgba_reference_pixel() {
  let out = scale_rgba(RGBA8 { r: 100, g: 200, b: 90, a: 255 });
  assert_eq!(out, RGBA8 { r: 10, g: 144, b: 14, a: 255 });
}

#[test]
fn test_scale_rgb_extremes() {
  assert_eq!(scale_rgb(RGB8 { r: 255, g: 255, b: 255 }), RGB8 { r: 25, g: 254, b: 253 });
  assert_eq!(scale_rgb(RGB8 { r: 9, g: 128, b: 86 }), RGB8 { r: 0, g: 0, b: 2 });
}

#[test]
fn test_apply_demo_colors_skips_filter_bytes() {
  let header = IHDR {
    width: 2,
    height: 2,
    bit_depth: 8,
    color_type: 6,
    compression_method: 0,
    filter_method: 0,
    interlace_method: 0,
  };
  let mut data = [
    0, 100, 200, 90, 255, 50, 10, 1, 7, //
    0, 0, 0, 0, 0, 255, 255, 255, 128,
  ];
  apply_demo_colors(&header, &mut data).unwrap();
  assert_eq!(
    data,
    [
      0, 10, 144, 14, 255, 5, 20, 3, 7, //
      0, 0, 0, 0, 0, 25, 254, 253, 128,
    ]
  );
}

#[test]
fn test_apply_demo_colors_rgb() {
  let header = IHDR {
    width: 1,
    height: 1,
    bit_depth: 8,
    color_type: 2,
    compression_method: 0,
    filter_method: 0,
    interlace_method: 0,
  };
  let mut data = [0, 100, 200, 90];
  apply_demo_colors(&header, &mut data).unwrap();
  assert_eq!(data, [0, 10, 144, 14]);
}
