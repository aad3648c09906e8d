use log::debug;
use wapc_protobuf::{decode, encode, Test};

use crate::errors::Result;
use crate::unit::ComputationUnit;
use crate::PROTO_ECHO;

/// Sends payloads to a single named operation of a [`ComputationUnit`]
///
/// The invoker does not look at what comes back. Comparing the reply with the
/// request is up to the caller.
#[derive(Debug)]
pub struct EchoInvoker<U> {
  unit: U,
  operation: String,
}

impl<U: ComputationUnit> EchoInvoker<U> {
  /// Targets the `protoEcho` operation of `unit`
  pub fn new(unit: U) -> Self {
    Self::with_operation(unit, PROTO_ECHO)
  }

  /// Targets `operation` instead of `protoEcho`
  pub fn with_operation<S: Into<String>>(unit: U, operation: S) -> Self {
    Self {
      unit,
      operation: operation.into(),
    }
  }

  /// Name of the operation this invoker calls
  #[must_use]
  pub fn operation(&self) -> &str {
    &self.operation
  }

  /// Hands `payload` to the operation and returns its output bytes unchanged.
  pub fn invoke(&self, payload: &[u8]) -> Result<Vec<u8>> {
    self.unit.invoke(&self.operation, payload)
  }

  /// Encodes `record`, sends it through the operation and decodes the reply.
  pub fn round_trip(&self, record: &Test) -> Result<Test> {
    let payload = encode(record)?;
    debug!("encoded request: {} bytes", payload.len());

    let reply = self.invoke(&payload)?;
    debug!("'{}' replied with {} bytes", self.operation, reply.len());

    Ok(decode(&reply)?)
  }

  /// Gives the unit back, ending the invoker
  pub fn into_inner(self) -> U {
    self.unit
  }
}
