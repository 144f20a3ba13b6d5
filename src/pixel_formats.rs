//! Module for pixel formats.
//!
//! Only the two layouts the codec ever sees are here: 8-bit RGB and 8-bit
//! RGBA. Both are plain byte structs, so a scanline's pixel bytes can be viewed
//! as a slice of pixels with [`bytemuck::cast_slice_mut`] and no copying.

use bytemuck::{Pod, Zeroable};

/// An RGB pixel with 8 bits per channel.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[derive(Pod, Zeroable)]
#[repr(C)]
pub struct RGB8 {
  pub r: u8,
  pub g: u8,
  pub b: u8,
}

/// An RGBA pixel with 8 bits per channel.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[derive(Pod, Zeroable)]
#[repr(C)]
pub struct RGBA8 {
  pub r: u8,
  pub g: u8,
  pub b: u8,
  pub a: u8,
}
