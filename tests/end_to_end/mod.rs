use thumbnail::{
  png::{PngChunkIter, PngChunkTy, PngStream},
  service::{respond_to_upload, PNG_CONTENT_TYPE},
  transform_png,
};

use super::*;

fn chunk_types(bytes: &[u8]) -> Vec<PngChunkTy> {
  PngChunkIter::new(bytes).map(|c| c.unwrap().ty()).collect()
}

/// 2x3 RGB: Sub, then Up, then None.
const RGB_SUB_UP_NONE: [u8; 21] = [
  1, 10, 20, 200, 5, 250, 100, //
  2, 1, 2, 3, 4, 5, 10, //
  0, 7, 8, 9, 1, 2, 3,
];
const RGB_SUB_UP_NONE_PIXELS: [u8; 18] = [
  10, 20, 200, 15, 14, 44, //
  11, 22, 203, 19, 19, 54, //
  7, 8, 9, 1, 2, 3,
];

/// 2x2 RGBA: Up on the first row, then Sub.
const RGBA_UP_SUB: [u8; 18] = [
  2, 100, 200, 90, 255, 1, 2, 3, 4, //
  1, 10, 20, 30, 40, 250, 250, 250, 250,
];
const RGBA_UP_SUB_PIXELS: [u8; 16] = [
  100, 200, 90, 255, 1, 2, 3, 4, //
  10, 20, 30, 40, 4, 14, 24, 34,
];

fn rgba_up_sub_png() -> Vec<u8> {
  PngBytes::new().ihdr(2, 2, 8, 6, 0).chunk(PngChunkTy::IDAT, &zlib(&RGBA_UP_SUB)).iend().0
}

#[test]
fn test_one_pixel_rgb() {
  let input = PngBytes::new()
    .ihdr(1, 1, 8, 2, 0)
    .chunk(PngChunkTy::IDAT, &zlib(&[0, 100, 200, 90]))
    .iend()
    .0;
  let output = transform_png(&input).unwrap();

  let (info, pixels) = decode_with_png_crate(&output);
  assert_eq!(info.width, 1);
  assert_eq!(info.height, 1);
  assert_eq!(info.color_type, ::png::ColorType::Rgb);
  assert_eq!(info.bit_depth, ::png::BitDepth::Eight);
  assert_eq!(pixels, [10, 144, 14]);
}

#[test]
fn test_one_pixel_rgba_keeps_alpha() {
  let input = PngBytes::new()
    .ihdr(1, 1, 8, 6, 0)
    .chunk(PngChunkTy::IDAT, &zlib(&[0, 100, 200, 90, 255]))
    .iend()
    .0;
  let (info, pixels) = decode_with_png_crate(&transform_png(&input).unwrap());
  assert_eq!(info.color_type, ::png::ColorType::Rgba);
  assert_eq!(pixels, [10, 144, 14, 255]);
}

#[test]
fn test_rgb_sub_up_none_rows() {
  let input = PngBytes::new()
    .ihdr(2, 3, 8, 2, 0)
    .chunk(PngChunkTy::IDAT, &zlib(&RGB_SUB_UP_NONE))
    .iend()
    .0;
  assert_eq!(raw_filter_bytes(&input), [1, 2, 0]);
  // the independent decoder agrees on what the input pixels are
  assert_eq!(decode_with_png_crate(&input).1, RGB_SUB_UP_NONE_PIXELS);

  let output = transform_png(&input).unwrap();
  assert_eq!(chunk_types(&output), [PngChunkTy::IHDR, PngChunkTy::IDAT, PngChunkTy::IEND]);
  assert_eq!(PngStream::parse(&output).unwrap().header, PngStream::parse(&input).unwrap().header);
  assert_eq!(raw_filter_bytes(&output), [0, 0, 0]);

  let (info, decoded) = decode_with_png_crate(&output);
  assert_eq!((info.width, info.height, info.color_type), (2, 3, ::png::ColorType::Rgb));
  assert_eq!(decoded, expected_colors(&RGB_SUB_UP_NONE_PIXELS, 3));
}

#[test]
fn test_rgba_up_sub_rows() {
  let input = rgba_up_sub_png();
  assert_eq!(raw_filter_bytes(&input), [2, 1]);
  assert_eq!(decode_with_png_crate(&input).1, RGBA_UP_SUB_PIXELS);

  let output = transform_png(&input).unwrap();
  assert_eq!(chunk_types(&output), [PngChunkTy::IHDR, PngChunkTy::IDAT, PngChunkTy::IEND]);
  assert_eq!(raw_filter_bytes(&output), [0, 0]);

  let (info, decoded) = decode_with_png_crate(&output);
  assert_eq!(info.color_type, ::png::ColorType::Rgba);
  assert_eq!(decoded, expected_colors(&RGBA_UP_SUB_PIXELS, 4));
  // alpha is untouched
  assert_eq!([decoded[3], decoded[7], decoded[11], decoded[15]], [255, 4, 40, 34]);
}

#[test]
fn test_png_crate_inputs() {
  use ::png::ColorType;
  let (width, height) = (7, 5);
  for (color, bpp) in [(ColorType::Rgb, 3), (ColorType::Rgba, 4)] {
    let pixels = pattern_bytes(width as usize * height as usize * bpp);
    let input = encode_with_png_crate(width, height, color, &pixels);
    let output = transform_png(&input).unwrap();

    let (info, decoded) = decode_with_png_crate(&output);
    assert_eq!((info.width, info.height, info.color_type), (width, height, color));
    assert_eq!(decoded, expected_colors(&pixels, bpp), "{color:?}");
  }
}

#[test]
fn test_many_idat_chunks_become_one() {
  let compressed = zlib(&RGB_SUB_UP_NONE);
  let (a, rest) = compressed.split_at(3);
  let (b, c) = rest.split_at(rest.len() / 2);
  let input = PngBytes::new()
    .ihdr(2, 3, 8, 2, 0)
    .chunk(PngChunkTy(*b"sRGB"), &[0])
    .chunk(PngChunkTy::IDAT, a)
    .chunk(PngChunkTy::IDAT, b)
    .chunk(PngChunkTy::IDAT, c)
    .chunk(PngChunkTy(*b"tEXt"), b"Comment\0after the data")
    .iend()
    .0;
  let output = transform_png(&input).unwrap();
  assert_eq!(chunk_types(&output), [PngChunkTy::IHDR, PngChunkTy::IDAT, PngChunkTy::IEND]);
  let (_, decoded) = decode_with_png_crate(&output);
  assert_eq!(decoded, expected_colors(&RGB_SUB_UP_NONE_PIXELS, 3));
}

#[test]
fn test_output_is_valid_input_again() {
  let once = transform_png(&rgba_up_sub_png()).unwrap();
  let twice = transform_png(&once).unwrap();
  let (_, decoded) = decode_with_png_crate(&twice);
  assert_eq!(decoded, expected_colors(&expected_colors(&RGBA_UP_SUB_PIXELS, 4), 4));
}

#[test]
fn test_upload_response_success() {
  let input = rgba_up_sub_png();
  let response = respond_to_upload(&input);
  assert!(response.is_success());
  assert_eq!(response.status, 200);
  assert_eq!(response.content_type, PNG_CONTENT_TYPE);
  assert_eq!(response.body, transform_png(&input).unwrap());
}
