//! Codec error types

/// A convenience wrapper of `Result` that relies on [`Error`] to hold errors
pub type Result<T> = std::result::Result<T, Error>;

/// This crate's Error type
#[derive(Debug, thiserror::Error)]
pub enum Error {
  /// The record could not be written into the output buffer.
  #[error("Protobuf encoding failure: {0}")]
  EncodeFailure(#[from] prost::EncodeError),
  /// The payload could not be parsed against the `Test` schema.
  #[error("Malformed payload: {0}")]
  MalformedPayload(#[from] prost::DecodeError),
}
