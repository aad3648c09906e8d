use std::sync::Arc;

use wapc::ModuleState;

use crate::ConsoleSink;

/// Per-instance data handed to every host function through `Caller::data`
pub(crate) struct UnitStore {
  pub(crate) host: Option<Arc<ModuleState>>,
  pub(crate) console: Arc<ConsoleSink>,
}

impl UnitStore {
  pub(crate) fn new(host: Option<Arc<ModuleState>>, console: Arc<ConsoleSink>) -> Self {
    Self { host, console }
  }
}
