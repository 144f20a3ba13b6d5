use crate::CodecError;

/// `IHDR`: Image header
///
/// Every field is kept exactly as stored so that the header can be written
/// back out unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct IHDR {
  /// width in pixels
  pub width: u32,
  /// height in pixels
  pub height: u32,
  /// bits per channel
  pub bit_depth: u8,
  /// bit flags: 1 (palette used), 2 (color used), 4 (alpha channel used).
  pub color_type: u8,
  /// always 0 (deflate) in valid PNGs
  pub compression_method: u8,
  /// always 0 (adaptive filtering) in valid PNGs
  pub filter_method: u8,
  /// 0 (none) or 1 (Adam7)
  pub interlace_method: u8,
}
impl IHDR {
  /// Number of bytes in an `IHDR` chunk's data.
  pub const DATA_LEN: usize = 13;

  /// Bytes per pixel, from the alpha flag alone.
  ///
  /// This is 4 when `color_type` has the alpha bit set and 3 otherwise. The
  /// palette and color bits are not looked at, so greyscale images are
  /// treated as if they were RGB.
  #[inline]
  #[must_use]
  pub const fn bytes_per_pixel(&self) -> usize {
    if (self.color_type & 4) != 0 {
      4
    } else {
      3
    }
  }

  /// The filter byte plus one row of pixel bytes.
  #[inline]
  pub fn bytes_per_filterline(&self) -> Result<usize, CodecError> {
    usize::try_from(self.width)?
      .checked_mul(self.bytes_per_pixel())
      .and_then(|pixel_bytes| pixel_bytes.checked_add(1))
      .ok_or(CodecError::DimensionsTooLarge)
  }

  /// Gets the exact size of the inflated image data.
  #[inline]
  pub fn get_zlib_decompression_requirement(&self) -> Result<usize, CodecError> {
    self
      .bytes_per_filterline()?
      .checked_mul(usize::try_from(self.height)?)
      .ok_or(CodecError::DimensionsTooLarge)
  }

  /// Encodes the header as `IHDR` chunk data.
  #[must_use]
  pub const fn to_bytes(&self) -> [u8; Self::DATA_LEN] {
    let [w0, w1, w2, w3] = self.width.to_be_bytes();
    let [h0, h1, h2, h3] = self.height.to_be_bytes();
    [
      w0,
      w1,
      w2,
      w3,
      h0,
      h1,
      h2,
      h3,
      self.bit_depth,
      self.color_type,
      self.compression_method,
      self.filter_method,
      self.interlace_method,
    ]
  }
}
impl TryFrom<&[u8]> for IHDR {
  type Error = CodecError;
  fn try_from(value: &[u8]) -> Result<Self, Self::Error> {
    match *value {
      [w0, w1, w2, w3, h0, h1, h2, h3, bit_depth, color_type, compression_method, filter_method, interlace_method] => {
        Ok(Self {
          width: u32::from_be_bytes([w0, w1, w2, w3]),
          height: u32::from_be_bytes([h0, h1, h2, h3]),
          bit_depth,
          color_type,
          compression_method,
          filter_method,
          interlace_method,
        })
      }
      _ => Err(CodecError::HeaderLength { length: value.len() }),
    }
  }
}

#[test]
fn test_ihdr_field_order() {
  let data: [u8; 13] = [0, 0, 1, 2, 0, 0, 0, 3, 8, 6, 0, 0, 0];
  let ihdr = IHDR::try_from(&data[..]).unwrap();
  assert_eq!(ihdr.width, 258);
  assert_eq!(ihdr.height, 3);
  assert_eq!(ihdr.bit_depth, 8);
  assert_eq!(ihdr.color_type, 6);
  assert_eq!(ihdr.bytes_per_pixel(), 4);
  assert_eq!(ihdr.bytes_per_filterline(), Ok(1 + 258 * 4));
  assert_eq!(ihdr.get_zlib_decompression_requirement(), Ok(3 * (1 + 258 * 4)));
  assert_eq!(ihdr.to_bytes(), data);
}

#[test]
fn test_ihdr_wrong_length() {
  assert_eq!(IHDR::try_from(&[0_u8; 12][..]), Err(CodecError::HeaderLength { length: 12 }));
  assert_eq!(IHDR::try_from(&[0_u8; 14][..]), Err(CodecError::HeaderLength { length: 14 }));
  assert_eq!(IHDR::try_from(&[0_u8; 0][..]), Err(CodecError::HeaderLength { length: 0 }));
}

#[test]
fn test_ihdr_alpha_bit_heuristic() {
  let mut ihdr = IHDR::try_from(&[0_u8, 0, 0, 1, 0, 0, 0, 1, 8, 2, 0, 0, 0][..]).unwrap();
  assert_eq!(ihdr.bytes_per_pixel(), 3);
  // greyscale+alpha only has the alpha bit, and that's all that's checked
  ihdr.color_type = 4;
  assert_eq!(ihdr.bytes_per_pixel(), 4);
  ihdr.color_type = 0;
  assert_eq!(ihdr.bytes_per_pixel(), 3);
}

#[test]
fn test_ihdr_size_overflow() {
  let ihdr = IHDR {
    width: u32::MAX,
    height: u32::MAX,
    bit_depth: 8,
    color_type: 6,
    compression_method: 0,
    filter_method: 0,
    interlace_method: 0,
  };
  assert_eq!(ihdr.get_zlib_decompression_requirement(), Err(CodecError::DimensionsTooLarge));
}
