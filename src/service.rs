//! What an upload endpoint should send back for a request body.
//!
//! There's no server in this crate. A transport buffers the whole request
//! body, calls [`respond_to_upload`], and copies the status, content type, and
//! body into its own response type.

use alloc::{format, vec::Vec};

use crate::{transform_png_with, CodecError, Compressor};

pub const PNG_CONTENT_TYPE: &str = "image/png";
pub const ERROR_CONTENT_TYPE: &str = "text/plain; charset=utf-8";

/// Status used for a successful transform.
pub const STATUS_OK: u16 = 200;
/// Status used for every failed transform.
pub const STATUS_UNAVAILABLE: u16 = 503;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadResponse {
  pub status: u16,
  pub content_type: &'static str,
  pub body: Vec<u8>,
}
impl UploadResponse {
  #[inline]
  #[must_use]
  pub fn is_success(&self) -> bool {
    self.status == STATUS_OK
  }
}
impl From<Result<Vec<u8>, CodecError>> for UploadResponse {
  fn from(result: Result<Vec<u8>, CodecError>) -> Self {
    match result {
      Ok(png) => Self { status: STATUS_OK, content_type: PNG_CONTENT_TYPE, body: png },
      Err(e) => Self {
        status: STATUS_UNAVAILABLE,
        content_type: ERROR_CONTENT_TYPE,
        body: format!("Error making thumbnail: {e}").into_bytes(),
      },
    }
  }
}

/// Runs the transform on a fully buffered request body.
pub fn respond_to_upload_with<C: Compressor + ?Sized>(compressor: &C, body: &[u8]) -> UploadResponse {
  UploadResponse::from(transform_png_with(compressor, body))
}

/// Runs the transform on a fully buffered request body with the default
/// compressor.
#[cfg(feature = "miniz_oxide")]
#[cfg_attr(docs_rs, doc(cfg(feature = "miniz_oxide")))]
#[inline]
pub fn respond_to_upload(body: &[u8]) -> UploadResponse {
  respond_to_upload_with(&crate::MinizCompressor::default(), body)
}

#[cfg(all(test, feature = "miniz_oxide"))]
#[test]
fn test_respond_to_non_png() {
  let response = respond_to_upload(b"GIF89a");
  assert!(!response.is_success());
  assert_eq!(response.status, 503);
  assert_eq!(response.content_type, ERROR_CONTENT_TYPE);
  assert_eq!(response.body, b"Error making thumbnail: no valid PNG preamble");
}
