/// A convenience wrapper of `Result` that relies on
/// [`wasmtime_unit::errors::Error`](crate::errors::Error)
/// to hold errors
pub(crate) type Result<T> = std::result::Result<T, Error>;

/// This crate's Error type
#[derive(thiserror::Error, Debug)]
pub enum Error {
  /// One of the guest start functions failed
  #[error("Initialization failed: {0}")]
  InitializationFailed(String),

  /// The guest call function was not exported by the guest.
  #[error("Guest call function (__guest_call) not exported by wasm module.")]
  GuestCallNotFound,

  /// A guest call was attempted before the module was instantiated
  #[error("Guest call attempted before the module was initialized")]
  NotInitialized,

  /// Replacing the running module is not supported by this provider
  #[error("Module replacement is not supported by the wasmtime unit provider")]
  ReplaceUnsupported,

  /// Error caused when a host function cannot be registered into a wasmtime::Linker
  #[error("Linker cannot register function '{func}': {err}")]
  LinkerFuncDef {
    /// wasm function that was being defined
    func: String,
    /// error reported
    err: String,
  },

  /// Error caused by an invalid configuration of the [`WasmtimeUnitBuilder`](crate::WasmtimeUnitBuilder)
  #[error("Invalid WasmtimeUnitBuilder configuration: {0}")]
  BuilderInvalidConfig(String),

  /// Error reported by wasmtime while compiling, linking or instantiating
  // `wasmtime::Error` is not a `std::error::Error`, so only its rendering is kept
  #[error("Wasmtime failure: {0}")]
  Wasmtime(String),
}

impl From<wasmtime::Error> for Error {
  fn from(e: wasmtime::Error) -> Self {
    Error::Wasmtime(format!("{:#}", e))
  }
}

impl From<Error> for wapc::errors::Error {
  fn from(e: Error) -> Self {
    wapc::errors::Error::ProviderFailure(Box::new(e))
  }
}
