use super::*;
use crate::CodecError;

fn check_scanline_len(header: &IHDR, data: &[u8]) -> Result<usize, CodecError> {
  let expected = header.get_zlib_decompression_requirement()?;
  if data.len() != expected {
    return Err(CodecError::ScanlineLengthMismatch { expected, actual: data.len() });
  }
  header.bytes_per_filterline()
}

/// Unfilters inflated image data in place.
///
/// Rows are processed top to bottom, and each row's filter byte is reset to 0
/// ("None") once that row is done. Calling this a second time on the same
/// data does nothing.
///
/// * 0 (None): no change.
/// * 1 (Sub): each byte adds the already unfiltered byte one pixel to its
///   left. Bytes of the first pixel have no left neighbor and stay as-is.
/// * 2 (Up): each byte adds the byte directly above it in the already
///   unfiltered previous row. The first row has no row above and stays as-is.
///
/// All adds wrap at 256.
///
/// ## Failure
/// * [`CodecError::ScanlineLengthMismatch`] if `decompressed` isn't exactly
///   `height` rows long. Nothing is modified in this case.
/// * [`CodecError::UnsupportedFilter`] for filter types 3 (Average), 4
///   (Paeth), or any unknown value. Rows before the bad row will already have
///   been unfiltered.
pub fn unfilter_decompressed_data(header: &IHDR, decompressed: &mut [u8]) -> Result<(), CodecError> {
  let bytes_per_filterline = check_scanline_len(header, decompressed)?;
  let bpp = header.bytes_per_pixel();

  let mut prev_pixels: Option<&[u8]> = None;
  for (y, line) in decompressed.chunks_exact_mut(bytes_per_filterline).enumerate() {
    let (f, pixels) = line.split_at_mut(1);
    let f = &mut f[0];
    match *f {
      0 => {
        // None
      }
      1 => {
        // Sub
        for i in bpp..pixels.len() {
          pixels[i] = pixels[i].wrapping_add(pixels[i - bpp]);
        }
      }
      2 => {
        // Up
        if let Some(b_pixels) = prev_pixels {
          pixels.iter_mut().zip(b_pixels.iter().copied()).for_each(|(p, b)| *p = p.wrapping_add(b));
        }
      }
      filter_type => {
        return Err(CodecError::UnsupportedFilter { filter_type, row: y as u32 });
      }
    }
    *f = 0;
    let pixels: &[u8] = pixels;
    prev_pixels = Some(pixels);
  }
  Ok(())
}

/// Prepares unfiltered image data for compression.
///
/// No filter is ever chosen for output, every row is simply marked as filter
/// type 0 ("None") and the pixel bytes are left exactly as they are. The
/// length isn't checked again here, any partial row at the end is left alone.
pub fn filter_as_none(header: &IHDR, unfiltered: &mut [u8]) -> Result<(), CodecError> {
  let bytes_per_filterline = header.bytes_per_filterline()?;
  unfiltered.chunks_exact_mut(bytes_per_filterline).for_each(|line| line[0] = 0);
  Ok(())
}

#[cfg(test)]
fn rgb_header(width: u32, height: u32) -> IHDR {
  IHDR {
    width,
    height,
    bit_depth: 8,
    color_type: 2,
    compression_method: 0,
    filter_method: 0,
    interlace_method: 0,
  }
}

#[test]
fn test_unfilter_none_is_unchanged() {
  let header = rgb_header(2, 1);
  let mut data = [0, 10, 20, 30, 250, 251, 252];
  let before = data;
  unfilter_decompressed_data(&header, &mut data).unwrap();
  assert_eq!(data, before);
}

#[test]
fn test_unfilter_sub() {
  let header = rgb_header(2, 1);
  let mut data = [1, 10, 20, 200, 5, 250, 100];
  unfilter_decompressed_data(&header, &mut data).unwrap();
  // 200 + 100 wraps to 44
  assert_eq!(data, [0, 10, 20, 200, 15, 14, 44]);
}

#[test]
fn test_unfilter_sub_uses_updated_left_bytes() {
  let header = rgb_header(3, 1);
  let mut data = [1, 1, 2, 3, 1, 1, 1, 1, 1, 1];
  unfilter_decompressed_data(&header, &mut data).unwrap();
  assert_eq!(data, [0, 1, 2, 3, 2, 3, 4, 3, 4, 5]);
}

#[test]
fn test_unfilter_up() {
  let header = rgb_header(2, 2);
  let mut data = [
    2, 10, 20, 30, 40, 50, 250, //
    2, 1, 2, 3, 4, 5, 10,
  ];
  unfilter_decompressed_data(&header, &mut data).unwrap();
  assert_eq!(
    data,
    [
      0, 10, 20, 30, 40, 50, 250, //
      0, 11, 22, 33, 44, 55, 4,
    ]
  );
}

#[test]
fn test_unfilter_up_after_sub_sees_unfiltered_row() {
  let header = rgb_header(2, 2);
  let mut data = [
    1, 1, 1, 1, 1, 1, 1, //
    2, 0, 0, 0, 0, 0, 0,
  ];
  unfilter_decompressed_data(&header, &mut data).unwrap();
  assert_eq!(&data[7..], &[0, 1, 1, 1, 2, 2, 2]);
}

#[test]
fn test_unfilter_rgba_stride() {
  let mut header = rgb_header(2, 1);
  header.color_type = 6;
  let mut data = [1, 1, 2, 3, 4, 1, 1, 1, 1];
  unfilter_decompressed_data(&header, &mut data).unwrap();
  assert_eq!(data, [0, 1, 2, 3, 4, 2, 3, 4, 5]);
}

#[test]
fn test_unfilter_rejects_other_filters() {
  for filter_type in [3_u8, 4, 5, 200] {
    let header = rgb_header(1, 2);
    let mut data = [0, 1, 2, 3, filter_type, 4, 5, 6];
    assert_eq!(
      unfilter_decompressed_data(&header, &mut data),
      Err(CodecError::UnsupportedFilter { filter_type, row: 1 })
    );
  }
}

#[test]
fn test_unfilter_wrong_length() {
  let header = rgb_header(2, 2);
  let mut data = [0_u8; 13];
  assert_eq!(
    unfilter_decompressed_data(&header, &mut data),
    Err(CodecError::ScanlineLengthMismatch { expected: 14, actual: 13 })
  );
}

#[test]
fn test_filter_as_none_marks_rows() {
  let header = rgb_header(1, 2);
  let mut data = [1, 9, 9, 9, 2, 8, 8, 8];
  filter_as_none(&header, &mut data).unwrap();
  assert_eq!(data, [0, 9, 9, 9, 0, 8, 8, 8]);
}

#[test]
fn test_filter_as_none_only_touches_whole_rows() {
  let header = rgb_header(1, 3);
  let mut data = [2, 9, 9, 9, 1, 8, 8, 8, 4, 7];
  filter_as_none(&header, &mut data).unwrap();
  assert_eq!(data, [0, 9, 9, 9, 0, 8, 8, 8, 4, 7]);
}
