//! Holds all the tools for reading and writing PNG data.
//!
//! * [Portable Network Graphics Specification (Second Edition)][png-spec]
//!
//! [png-spec]: https://www.w3.org/TR/2003/REC-PNG-20031110/
//!
//! The general format of a PNG is an 8 byte signature followed by "chunks".
//! Each chunk is a big-endian `u32` length, a 4 byte type tag, that many bytes
//! of data, and a CRC-32 of the type tag and data. This codec cares about
//! three chunk types:
//! * **Header** (`IHDR`) - The image's dimensions and pixel format.
//! * **Image Data** (`IDAT`) - One or more chunks of compressed data. All of
//!   the compressed data forms a single zlib data stream, in the order the
//!   chunks appear.
//! * **End** (`IEND`) - The empty chunk that closes the stream.
//!
//! All other chunk types still have their CRC checked, but are then skipped.
//!
//! ## Strictness
//!
//! Unlike a general purpose decoder, this module does *not* try to recover
//! from damaged data. A wrong signature, a chunk running off the end of the
//! buffer, a bad CRC, or trailing bytes after the last chunk are all errors.
//!
//! Once inflated, the image data is a series of scanlines, each with an extra
//! byte on the front saying which filter was used for that line. Only the
//! None, Sub, and Up filters are supported; see [`unfilter_decompressed_data`].

mod crc32;
pub use crc32::*;

mod chunk;
pub use chunk::*;

mod ihdr;
pub use ihdr::*;

mod stream;
pub use stream::*;

mod unfilter;
pub use unfilter::*;


/// The first eight bytes of a PNG datastream should match these bytes.
pub const PNG_SIGNATURE: [u8; 8] = [137, 80, 78, 71, 13, 10, 26, 10];

/// Checks if the PNG's initial 8 bytes are correct.
///
/// * If this is the case, the rest of the bytes are very likely PNG data.
/// * If this is *not* the case, the rest of the bytes are very likely *not* PNG
///   data.
#[inline]
#[must_use]
pub const fn is_png_header_correct(bytes: &[u8]) -> bool {
  matches!(bytes, [137, 80, 78, 71, 13, 10, 26, 10, ..])
}
