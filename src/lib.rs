#![no_std]
#![cfg_attr(docs_rs, feature(doc_cfg))]

//! A crate that turns one PNG into another.
//!
//! The input PNG is checked (signature, chunk lengths, chunk CRCs), its image
//! data is inflated and unfiltered, every pixel goes through a fixed color
//! scaling, and then a fresh PNG is written out with a single `IDAT` chunk.
//!
//! Only 8-bit, non-interlaced, non-indexed images using the None, Sub, and Up
//! scanline filters are accepted. Anything else is an error.
//!
//! ```no_run
//! let input: &[u8] = unimplemented!("png bytes from somewhere");
//! let output: Vec<u8> = thumbnail::transform_png(input)?;
//! # Ok::<(), thumbnail::CodecError>(())
//! ```

extern crate alloc;

#[cfg(target_pointer_width = "16")]
compile_error!("this crate assumes 32-bit or bigger pointers!");

mod error;
pub use error::*;

pub mod pixel_formats;
pub use pixel_formats::*;

pub mod png;

pub mod transform;

pub mod zlib;
pub use zlib::*;

mod codec;
pub use codec::*;

pub mod service;
