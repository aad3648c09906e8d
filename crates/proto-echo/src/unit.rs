use std::path::Path;

use log::{debug, warn};
use wapc::WapcHost;
use wasmtime_unit::WasmtimeUnitBuilder;

use crate::errors::{Error, Result};

/// A sandboxed program exposing named operations over opaque byte payloads.
///
/// Releasing the unit is tied to `Drop`: whatever the unit holds is freed when the
/// value goes out of scope, on success and error paths alike.
pub trait ComputationUnit {
  /// Runs `operation` with `payload` and returns the bytes the unit answered with.
  fn invoke(&self, operation: &str, payload: &[u8]) -> Result<Vec<u8>>;
}

impl<U: ComputationUnit + ?Sized> ComputationUnit for &U {
  fn invoke(&self, operation: &str, payload: &[u8]) -> Result<Vec<u8>> {
    (**self).invoke(operation, payload)
  }
}

impl<U: ComputationUnit + ?Sized> ComputationUnit for Box<U> {
  fn invoke(&self, operation: &str, payload: &[u8]) -> Result<Vec<u8>> {
    (**self).invoke(operation, payload)
  }
}

/// A waPC guest module running in wasmtime
///
/// The guest gets a single capability: messages it writes with `__console_log` are
/// passed to the console sink given at construction. Any `__host_call` is rejected.
#[derive(Debug)]
pub struct WapcUnit {
  host: WapcHost,
}

impl WapcUnit {
  /// Reads the module at `path` and instantiates it.
  pub fn from_file<P, F>(path: P, console: F) -> Result<Self>
  where
    P: AsRef<Path>,
    F: Fn(&str) + Send + Sync + 'static,
  {
    let path = path.as_ref();
    let module_bytes = std::fs::read(path).map_err(|source| Error::Io {
      path: path.to_path_buf(),
      source,
    })?;
    debug!("read {} bytes of WebAssembly from {}", module_bytes.len(), path.display());
    Self::from_bytes(&module_bytes, console)
  }

  /// Compiles `module_bytes` (binary or WAT text) and instantiates it.
  ///
  /// Compilation and linking failures are reported as [`Error::UnitInit`]; failures
  /// while instantiating or running the guest start functions as
  /// [`Error::Instantiation`].
  pub fn from_bytes<F>(module_bytes: &[u8], console: F) -> Result<Self>
  where
    F: Fn(&str) + Send + Sync + 'static,
  {
    let engine = WasmtimeUnitBuilder::new()
      .module_bytes(module_bytes)
      .console_sink(console)
      .build()
      .map_err(Error::UnitInit)?;

    let host = WapcHost::new(Box::new(engine), Some(Box::new(reject_host_call))).map_err(Error::Instantiation)?;
    debug!("computation unit {} instantiated", host.id());

    Ok(Self { host })
  }

  /// Identifier the waPC host assigned to this module
  #[must_use]
  pub fn id(&self) -> u64 {
    self.host.id()
  }
}

impl ComputationUnit for WapcUnit {
  fn invoke(&self, operation: &str, payload: &[u8]) -> Result<Vec<u8>> {
    debug!("invoking '{}' on unit {} with {} bytes", operation, self.id(), payload.len());
    self.host.call(operation, payload).map_err(|source| Error::InvocationFailed {
      operation: operation.to_owned(),
      source,
    })
  }
}

impl Drop for WapcUnit {
  fn drop(&mut self) {
    debug!("releasing computation unit {}", self.host.id());
  }
}

fn reject_host_call(
  id: u64,
  bd: &str,
  ns: &str,
  op: &str,
  payload: &[u8],
) -> std::result::Result<Vec<u8>, Box<dyn std::error::Error + Send + Sync>> {
  warn!(
    "Guest {} invoked '{}->{}:{}' with {} bytes; host calls are not supported",
    id,
    bd,
    ns,
    op,
    payload.len()
  );
  Err(format!("host call '{}->{}:{}' rejected", bd, ns, op).into())
}
