use std::sync::Arc;

use log::{error, info};
use tracing::trace;
use wapc::{wapc_functions, ModuleState, WebAssemblyEngineProvider};
use wasmtime::{Engine, Instance, InstancePre, Store, TypedFunc};

use crate::errors::{Error, Result};
use crate::store::UnitStore;
use crate::ConsoleSink;

struct EngineInner {
  instance: Instance,
  guest_call_fn: TypedFunc<(i32, i32), i32>,
  host: Arc<ModuleState>,
}

/// A waPC engine provider that runs one pre-linked module inside wasmtime
///
/// Build it with [`WasmtimeUnitBuilder`](crate::WasmtimeUnitBuilder) and hand it to
/// [`wapc::WapcHost::new`], which instantiates the module through
/// [`WebAssemblyEngineProvider::init`].
#[allow(missing_debug_implementations)]
pub struct WasmtimeUnit {
  engine: Engine,
  store: Store<UnitStore>,
  instance_pre: InstancePre<UnitStore>,
  console: Arc<ConsoleSink>,
  inner: Option<EngineInner>,
}

impl WasmtimeUnit {
  pub(crate) fn new(engine: Engine, instance_pre: InstancePre<UnitStore>, console: Arc<ConsoleSink>) -> Self {
    let store = Store::new(&engine, UnitStore::new(None, console.clone()));
    Self {
      engine,
      store,
      instance_pre,
      console,
      inner: None,
    }
  }

  /// Runs the optional `_start` and `wapc_init` exports, in that order
  fn initialize(&mut self) -> Result<()> {
    let inner = self.inner.as_ref().ok_or(Error::NotInitialized)?;

    for starter in wapc_functions::REQUIRED_STARTS.iter() {
      if inner.instance.get_export(&mut self.store, starter).is_none() {
        continue;
      }
      trace!(function = starter, "calling init function");

      // the typed variant surfaces traps as `wasmtime::Trap` inside the error
      let starter_func: TypedFunc<(), ()> = inner.instance.get_typed_func(&mut self.store, starter)?;

      if let Err(err) = starter_func.call(&mut self.store, ()) {
        trace!(function = starter, ?err, "handling error returned by init function");
        return Err(Error::InitializationFailed(format!("{}: {}", starter, err)));
      }
    }
    Ok(())
  }
}

impl WebAssemblyEngineProvider for WasmtimeUnit {
  fn init(
    &mut self,
    host: Arc<ModuleState>,
  ) -> std::result::Result<(), Box<dyn std::error::Error + Send + Sync + 'static>> {
    // a fresh store now that the module state is known
    self.store = Store::new(&self.engine, UnitStore::new(Some(host.clone()), self.console.clone()));

    let instance = self.instance_pre.instantiate(&mut self.store).map_err(Error::from)?;
    let guest_call_fn = guest_call_fn(&mut self.store, &instance)?;
    self.inner = Some(EngineInner {
      instance,
      guest_call_fn,
      host,
    });
    self.initialize()?;
    Ok(())
  }

  fn call(
    &mut self,
    op_length: i32,
    msg_length: i32,
  ) -> std::result::Result<i32, Box<dyn std::error::Error + Send + Sync + 'static>> {
    let inner = self.inner.as_ref().ok_or(Error::NotInitialized)?;

    match inner.guest_call_fn.call(&mut self.store, (op_length, msg_length)) {
      Ok(result) => Ok(result),
      Err(err) => {
        error!("Failure invoking guest module handler: {:?}", err);
        inner.host.set_guest_error(err.to_string());
        Ok(0)
      }
    }
  }

  fn replace(&mut self, module: &[u8]) -> std::result::Result<(), Box<dyn std::error::Error + Send + Sync + 'static>> {
    info!(
      "Refusing to replace the running WebAssembly module with a new buffer of {} bytes",
      module.len()
    );
    Err(Box::new(Error::ReplaceUnsupported))
  }
}

// Resolved once per instantiation. This returns the `TypedFunc` that corresponds
// to the `__guest_call` export
fn guest_call_fn(store: &mut Store<UnitStore>, instance: &Instance) -> Result<TypedFunc<(i32, i32), i32>> {
  instance
    .get_typed_func::<(i32, i32), i32>(store, wapc_functions::GUEST_CALL)
    .map_err(|_| Error::GuestCallNotFound)
}
