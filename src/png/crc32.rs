/// Reversed form of the CRC-32 polynomial used by PNG (and zlib, gzip, ...).
pub const CRC32_POLYNOMIAL: u32 = 0xEDB8_8320;

/// Remainder of each possible low byte, so the update step is one lookup per
/// input byte.
const CRC_TABLE: [u32; 256] = make_crc_table();

const fn make_crc_table() -> [u32; 256] {
  let mut table = [0_u32; 256];
  let mut byte = 0;
  while byte < table.len() {
    let mut rem = byte as u32;
    let mut bit = 0;
    while bit < 8 {
      rem = if (rem & 1) != 0 { CRC32_POLYNOMIAL ^ (rem >> 1) } else { rem >> 1 };
      bit += 1;
    }
    table[byte] = rem;
    byte += 1;
  }
  table
}

/// Folds more bytes into a running (not yet inverted) CRC register.
fn update_crc(register: u32, bytes: impl Iterator<Item = u8>) -> u32 {
  bytes.fold(register, |reg, byte| CRC_TABLE[usize::from(reg as u8 ^ byte)] ^ (reg >> 8))
}

/// CRC-32 (ISO-HDLC) of a stream of bytes, as used by PNG chunks.
#[inline]
#[must_use]
pub fn png_crc(bytes: impl Iterator<Item = u8>) -> u32 {
  !update_crc(u32::MAX, bytes)
}

/// CRC-32 (ISO-HDLC) of a byte slice.
#[inline]
#[must_use]
pub fn crc32(bytes: &[u8]) -> u32 {
  png_crc(bytes.iter().copied())
}

#[test]
fn test_crc32_reference_values() {
  assert_eq!(crc32(&[]), 0);
  assert_eq!(crc32(b"123456789"), 0xCBF4_3926);
  assert_eq!(crc32(b"a"), 0xE8B7_BE43);
  assert_eq!(crc32(b"The quick brown fox jumps over the lazy dog"), 0x414F_A339);
}

#[test]
fn test_crc32_known_png_chunks() {
  // every PNG ends with these exact bytes: the CRC of a bare "IEND"
  assert_eq!(crc32(b"IEND"), 0xAE42_6082);
  // a 1x1 8-bit RGBA header
  let ihdr: [u8; 17] = [
    b'I', b'H', b'D', b'R', 0, 0, 0, 1, 0, 0, 0, 1, 8, 6, 0, 0, 0,
  ];
  assert_eq!(crc32(&ihdr), 0x1F15_C489);
}

#[test]
fn test_png_crc_matches_split_input() {
  let joined = png_crc(b"IDAT".iter().copied().chain([1_u8, 2, 3].iter().copied()));
  assert_eq!(joined, crc32(&[b'I', b'D', b'A', b'T', 1, 2, 3]));
}

#[test]
fn test_crc_table_entries() {
  assert_eq!(CRC_TABLE[0], 0);
  assert_eq!(CRC_TABLE[1], 0x7707_3096);
  assert_eq!(CRC_TABLE[128], CRC32_POLYNOMIAL);
  assert_eq!(CRC_TABLE[255], 0x2D02_EF8D);
}
