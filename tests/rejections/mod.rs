use thumbnail::{
  png::{PngChunkIter, PngChunkTy},
  service::respond_to_upload_with,
  transform_png, transform_png_with, CodecError, Compressor, MinizCompressor,
};

use super::*;

fn one_pixel_rgb() -> Vec<u8> {
  PngBytes::new().ihdr(1, 1, 8, 2, 0).chunk(PngChunkTy::IDAT, &zlib(&[0, 1, 2, 3])).iend().0
}

#[test]
fn test_random_bytes_never_panic() {
  for _ in 0..10 {
    let v = rand_bytes(1024);
    for _ in PngChunkIter::new(&v) {
      //
    }
    assert!(transform_png(&v).is_err());
  }
  // random bytes behind a correct signature
  for _ in 0..10 {
    let mut v = PNG_SIGNATURE.to_vec();
    v.extend(rand_bytes(256));
    assert!(transform_png(&v).is_err());
  }
}

#[test]
fn test_bad_preamble() {
  let mut input = one_pixel_rgb();
  input[1] = b'J';
  assert_eq!(transform_png(&input), Err(CodecError::PreambleMismatch));
  assert_eq!(transform_png(&[]), Err(CodecError::PreambleMismatch));
  assert_eq!(transform_png(&PNG_SIGNATURE[..7]), Err(CodecError::PreambleMismatch));
}

#[test]
fn test_tampered_crc() {
  let input = one_pixel_rgb();
  let idat_crc_at = 8 + 25 + 4 + 4 + (input.len() - 8 - 25 - 12 - 12);
  for at in [8 + 21, idat_crc_at, input.len() - 1] {
    let mut bad = input.clone();
    bad[at] = bad[at].wrapping_add(1);
    assert!(
      matches!(transform_png(&bad), Err(CodecError::ChecksumMismatch { .. })),
      "byte {at}"
    );
  }
}

#[test]
fn test_truncated_input() {
  let input = one_pixel_rgb();
  let chunk_ends = [8 + 25, input.len() - 12];
  for len in 8 + 1..input.len() {
    if chunk_ends.contains(&len) {
      continue;
    }
    match transform_png(&input[..len]) {
      Err(CodecError::ChunkStructure { .. } | CodecError::StreamLengthMismatch { .. }) => (),
      other => panic!("len {len}: {other:?}"),
    }
  }
}

#[test]
fn test_trailing_garbage() {
  let mut input = one_pixel_rgb();
  let end = input.len();
  input.extend_from_slice(&[0; 3]);
  assert_eq!(
    transform_png(&input),
    Err(CodecError::ChunkStructure { offset: end, length: None })
  );
  // a zero length chunk of zero bytes still has to pass its CRC
  input.extend_from_slice(&[0; 9]);
  assert_eq!(
    transform_png(&input),
    Err(CodecError::ChecksumMismatch { chunk_type: PngChunkTy([0; 4]) })
  );
}

#[test]
fn test_unsupported_filters() {
  for filter_type in [3_u8, 4, 5, 255] {
    let raw = [0, 1, 2, 3, filter_type, 4, 5, 6];
    let input = PngBytes::new()
      .ihdr(1, 2, 8, 2, 0)
      .chunk(PngChunkTy::IDAT, &zlib(&raw))
      .iend()
      .0;
    assert_eq!(
      transform_png(&input),
      Err(CodecError::UnsupportedFilter { filter_type, row: 1 })
    );
  }
}

#[test]
fn test_average_and_paeth_rows() {
  // 2x2 RGB, a real Average or Paeth row under a plain first row
  for filter_type in [3_u8, 4] {
    let raw = [
      0, 10, 20, 30, 40, 50, 60, //
      filter_type, 5, 10, 15, 20, 25, 30,
    ];
    let input = PngBytes::new()
      .ihdr(2, 2, 8, 2, 0)
      .chunk(PngChunkTy::IDAT, &zlib(&raw))
      .iend()
      .0;
    assert_eq!(raw_filter_bytes(&input), [0, filter_type]);
    assert_eq!(
      transform_png(&input),
      Err(CodecError::UnsupportedFilter { filter_type, row: 1 })
    );
  }
  // and as the very first row
  let raw = [4, 1, 2, 3, 0, 4, 5, 6];
  let input = PngBytes::new()
    .ihdr(1, 2, 8, 2, 0)
    .chunk(PngChunkTy::IDAT, &zlib(&raw))
    .iend()
    .0;
  assert_eq!(transform_png(&input), Err(CodecError::UnsupportedFilter { filter_type: 4, row: 0 }));
}

#[test]
fn test_unsupported_headers() {
  let idat = zlib(&[0; 16]);
  let cases = [
    (PngBytes::new().ihdr(1, 1, 16, 2, 0), CodecError::UnsupportedBitDepth(16)),
    (PngBytes::new().ihdr(1, 1, 4, 0, 0), CodecError::UnsupportedBitDepth(4)),
    (PngBytes::new().ihdr(1, 1, 8, 3, 0), CodecError::UnsupportedColorType(3)),
    (PngBytes::new().ihdr(1, 1, 8, 2, 1), CodecError::UnsupportedInterlace(1)),
  ];
  for (builder, err) in cases {
    let input = builder.chunk(PngChunkTy::IDAT, &idat).iend().0;
    assert_eq!(transform_png(&input), Err(err));
  }
}

#[test]
fn test_header_problems() {
  let no_header = PngBytes::new().chunk(PngChunkTy::IDAT, &zlib(&[0, 1, 2, 3])).iend().0;
  assert_eq!(transform_png(&no_header), Err(CodecError::MissingHeader));

  let short_header = PngBytes::new().chunk(PngChunkTy::IHDR, &[0; 12]).iend().0;
  assert_eq!(transform_png(&short_header), Err(CodecError::HeaderLength { length: 12 }));
}

#[test]
fn test_greyscale_is_mismeasured() {
  // a real 2x1 greyscale image only has 2 pixel bytes per row, but the alpha
  // bit rule expects 6
  let input = PngBytes::new()
    .ihdr(2, 1, 8, 0, 0)
    .chunk(PngChunkTy::IDAT, &zlib(&[0, 50, 60]))
    .iend()
    .0;
  assert_eq!(
    transform_png(&input),
    Err(CodecError::ScanlineLengthMismatch { expected: 7, actual: 3 })
  );
}

#[test]
fn test_bad_zlib_data() {
  let input = PngBytes::new().ihdr(1, 1, 8, 2, 0).chunk(PngChunkTy::IDAT, &[1, 2, 3]).iend().0;
  assert_eq!(transform_png(&input), Err(CodecError::Decompression));
  let input = PngBytes::new().ihdr(1, 1, 8, 2, 0).iend().0;
  assert_eq!(transform_png(&input), Err(CodecError::Decompression));
}

#[test]
fn test_too_much_image_data() {
  let input = PngBytes::new()
    .ihdr(1, 1, 8, 2, 0)
    .chunk(PngChunkTy::IDAT, &zlib(&[0; 5000]))
    .iend()
    .0;
  assert!(matches!(
    transform_png(&input),
    Err(CodecError::ScanlineLengthMismatch { expected: 4, actual }) if actual > 4
  ));
}

struct BrokenDeflate;
impl Compressor for BrokenDeflate {
  fn inflate(&self, zlib: &[u8], max_len: usize) -> Result<Vec<u8>, CodecError> {
    MinizCompressor::default().inflate(zlib, max_len)
  }
  fn deflate(&self, _raw: &[u8]) -> Result<Vec<u8>, CodecError> {
    Err(CodecError::Compression)
  }
}

#[test]
fn test_compressor_failure() {
  assert_eq!(transform_png_with(&BrokenDeflate, &one_pixel_rgb()), Err(CodecError::Compression));
  let response = respond_to_upload_with(&BrokenDeflate, &one_pixel_rgb());
  assert_eq!(response.status, 503);
  assert_eq!(response.body, b"Error making thumbnail: failed to deflate image data");
}
