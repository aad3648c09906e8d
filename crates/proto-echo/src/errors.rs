//! Library-specific error types

use std::path::PathBuf;

/// A convenience wrapper of `Result` that relies on [`Error`] to hold errors
pub type Result<T> = std::result::Result<T, Error>;

/// One variant per stage of the echo pipeline. Every one of them is fatal.
#[derive(Debug, thiserror::Error)]
pub enum Error {
  /// The WebAssembly module could not be read from disk.
  #[error("Cannot read WebAssembly module '{}': {}", .path.display(), .source)]
  Io {
    /// Path that was being read
    path: PathBuf,
    /// Underlying I/O error
    #[source]
    source: std::io::Error,
  },
  /// The module could not be compiled or linked.
  #[error("Computation unit initialization failed: {0}")]
  UnitInit(#[source] wasmtime_unit::errors::Error),
  /// The module could not be instantiated or its start functions failed.
  #[error("Computation unit instantiation failed: {0}")]
  Instantiation(#[source] wapc::errors::Error),
  /// The request record could not be encoded.
  #[error("Encoding the request failed: {0}")]
  Encode(#[source] wapc_protobuf::errors::Error),
  /// The guest operation is missing, trapped or reported an error.
  #[error("Invocation of '{operation}' failed: {source}")]
  InvocationFailed {
    /// Operation that was invoked
    operation: String,
    /// Error reported by the waPC host
    #[source]
    source: wapc::errors::Error,
  },
  /// The reply could not be decoded as a `Test` record.
  #[error("Decoding the reply failed: {0}")]
  MalformedPayload(#[source] wapc_protobuf::errors::Error),
  /// The decoded record could not be rendered.
  #[error("Rendering the reply failed: {0}")]
  Render(#[from] serde_json::Error),
}

impl From<wapc_protobuf::errors::Error> for Error {
  fn from(e: wapc_protobuf::errors::Error) -> Self {
    match e {
      wapc_protobuf::errors::Error::EncodeFailure(_) => Error::Encode(e),
      wapc_protobuf::errors::Error::MalformedPayload(_) => Error::MalformedPayload(e),
    }
  }
}
