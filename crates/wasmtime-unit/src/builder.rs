use std::sync::Arc;

use log::info;
use wasmtime::{Engine, Linker, Module};

use crate::errors::{Error, Result};
use crate::store::UnitStore;
use crate::{callbacks, ConsoleSink, WasmtimeUnit};

/// Used to build [`WasmtimeUnit`](crate::WasmtimeUnit) instances.
#[allow(missing_debug_implementations)]
#[derive(Default)]
pub struct WasmtimeUnitBuilder<'a> {
  engine: Option<Engine>,
  module_bytes: Option<&'a [u8]>,
  console: Option<Arc<ConsoleSink>>,
}

impl<'a> WasmtimeUnitBuilder<'a> {
  /// Create a builder instance
  #[must_use]
  pub fn new() -> Self {
    Self::default()
  }

  /// Provide contents of the WebAssembly module, either binary or WAT text
  #[must_use]
  pub fn module_bytes(mut self, module_bytes: &'a [u8]) -> Self {
    self.module_bytes = Some(module_bytes);
    self
  }

  /// Provide a preinitialized [`wasmtime::Engine`]
  #[must_use]
  pub fn engine(mut self, engine: Engine) -> Self {
    self.engine = Some(engine);
    self
  }

  /// Receive every message the guest writes through `__console_log`
  ///
  /// Without a sink, messages are emitted with `log::info!`.
  #[must_use]
  pub fn console_sink<F>(mut self, sink: F) -> Self
  where
    F: Fn(&str) + Send + Sync + 'static,
  {
    let sink: Arc<ConsoleSink> = Arc::new(sink);
    self.console = Some(sink);
    self
  }

  /// Compile the module, link the waPC host functions and create a [`WasmtimeUnit`]
  ///
  /// The module is instantiated later, when the unit is handed to a `WapcHost`.
  pub fn build(self) -> Result<WasmtimeUnit> {
    let module_bytes = self
      .module_bytes
      .ok_or_else(|| Error::BuilderInvalidConfig("`module_bytes` has not been provided".to_owned()))?;

    let engine = match self.engine {
      Some(engine) => engine,
      None => Engine::new(&wasmtime::Config::default())?,
    };
    let module = Module::new(&engine, module_bytes)?;

    let mut linker: Linker<UnitStore> = Linker::new(&engine);
    callbacks::add_to_linker(&mut linker)?;
    let instance_pre = linker.instantiate_pre(&module)?;

    let console = self.console.unwrap_or_else(default_console_sink);
    Ok(WasmtimeUnit::new(engine, instance_pre, console))
  }
}

fn default_console_sink() -> Arc<ConsoleSink> {
  Arc::new(|msg: &str| info!("Guest module: {}", msg))
}
