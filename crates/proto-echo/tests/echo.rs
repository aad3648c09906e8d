use std::sync::Arc;

use parking_lot::Mutex;
use proto_echo::{fixtures, report, ComputationUnit, EchoInvoker, Error, Test, WapcUnit, PROTO_ECHO};

const ECHO_GUEST: &str = include_str!("../../../wasm/wat/echo.wat");
const HOST_CALL_GUEST: &str = include_str!("../../../wasm/wat/host_call.wat");
const TRAP_GUEST: &str = include_str!("../../../wasm/wat/trap.wat");
const FAILING_INIT: &str = include_str!("../../../wasm/wat/failing_init.wat");
const NO_GUEST_CALL: &str = include_str!("../../../wasm/wat/no_guest_call.wat");
const UNKNOWN_IMPORT: &str = include_str!("../../../wasm/wat/unknown_import.wat");

fn echo_unit() -> (WapcUnit, Arc<Mutex<Vec<String>>>) {
  let console = Arc::new(Mutex::new(Vec::new()));
  let sink = console.clone();
  let unit = WapcUnit::from_bytes(ECHO_GUEST.as_bytes(), move |msg: &str| {
    sink.lock().push(msg.to_owned());
  })
  .unwrap();
  (unit, console)
}

#[test]
fn full_record_survives_the_round_trip() {
  let (unit, console) = echo_unit();
  let invoker = EchoInvoker::new(unit);

  let returned = invoker.round_trip(&fixtures::full()).unwrap();
  assert_eq!(returned, fixtures::full());
  assert_eq!(*console.lock(), vec!["init", "start protoEcho", "end protoEcho"]);
}

#[test]
fn minimal_record_survives_the_round_trip() {
  let (unit, _) = echo_unit();
  let invoker = EchoInvoker::new(unit);

  let returned = invoker.round_trip(&fixtures::minimal()).unwrap();
  assert_eq!(returned, fixtures::minimal());
  assert_eq!(returned.field_nested, None);

  let rendered = report::render(&returned).unwrap();
  assert!(rendered.contains("\"field_uint64\": 12345"));
  assert!(rendered.contains("\"field_nested\": null"));
}

#[test]
fn empty_payload_echoes_empty() {
  let (unit, _) = echo_unit();
  let invoker = EchoInvoker::new(unit);
  assert!(invoker.invoke(&[]).unwrap().is_empty());
  assert_eq!(invoker.round_trip(&Test::default()).unwrap(), Test::default());
}

#[test]
fn unit_serves_repeated_invocations() {
  let (unit, console) = echo_unit();
  let invoker = EchoInvoker::new(unit);
  for _ in 0..3 {
    assert_eq!(invoker.round_trip(&fixtures::full()).unwrap(), fixtures::full());
  }
  assert_eq!(console.lock().len(), 7);
}

#[test]
fn unknown_operation_fails_invocation() {
  let (unit, _) = echo_unit();
  let invoker = EchoInvoker::with_operation(unit, "protoEchoo");

  match invoker.round_trip(&fixtures::full()) {
    Err(Error::InvocationFailed { operation, source }) => {
      assert_eq!(operation, "protoEchoo");
      assert!(source.to_string().contains("Could not find function"));
    }
    other => panic!("unexpected result: {:?}", other),
  }
}

#[test]
fn host_calls_are_rejected() {
  let unit = WapcUnit::from_bytes(HOST_CALL_GUEST.as_bytes(), |_: &str| {}).unwrap();
  match unit.invoke(PROTO_ECHO, b"payload") {
    Err(Error::InvocationFailed { source, .. }) => {
      assert!(source.to_string().contains("rejected"), "{}", source);
    }
    other => panic!("unexpected result: {:?}", other),
  }
}

#[test]
fn trapping_guest_fails_invocation() {
  let unit = WapcUnit::from_bytes(TRAP_GUEST.as_bytes(), |_: &str| {}).unwrap();
  assert!(matches!(
    unit.invoke(PROTO_ECHO, b""),
    Err(Error::InvocationFailed { .. })
  ));
}

#[test]
fn invalid_bytecode_fails_unit_init() {
  let result = WapcUnit::from_bytes(b"definitely not wasm", |_: &str| {});
  assert!(matches!(result, Err(Error::UnitInit(_))));
}

#[test]
fn unresolved_import_fails_unit_init() {
  let result = WapcUnit::from_bytes(UNKNOWN_IMPORT.as_bytes(), |_: &str| {});
  assert!(matches!(result, Err(Error::UnitInit(_))));
}

#[test]
fn missing_guest_call_fails_instantiation() {
  let result = WapcUnit::from_bytes(NO_GUEST_CALL.as_bytes(), |_: &str| {});
  assert!(matches!(result, Err(Error::Instantiation(_))));
}

#[test]
fn trapping_init_fails_instantiation() {
  let result = WapcUnit::from_bytes(FAILING_INIT.as_bytes(), |_: &str| {});
  assert!(matches!(result, Err(Error::Instantiation(_))));
}

#[test]
fn missing_module_file_is_an_io_error() {
  let result = WapcUnit::from_file("no/such/module.wasm", |_: &str| {});
  match result {
    Err(err @ Error::Io { .. }) => {
      assert!(err.to_string().starts_with("Cannot read WebAssembly module 'no/such/module.wasm'"));
    }
    other => panic!("unexpected result: {:?}", other),
  }
}

#[test]
fn boxed_units_can_be_swapped() {
  struct Truncate;

  impl ComputationUnit for Truncate {
    fn invoke(&self, _operation: &str, payload: &[u8]) -> proto_echo::Result<Vec<u8>> {
      Ok(payload[..payload.len().saturating_sub(1)].to_vec())
    }
  }

  let units: Vec<Box<dyn ComputationUnit>> = vec![Box::new(echo_unit().0), Box::new(Truncate)];
  let payload = wapc_protobuf::encode(&fixtures::full()).unwrap();

  let echoed = EchoInvoker::new(&units[0]).invoke(&payload).unwrap();
  assert_eq!(echoed, payload);

  let truncated = EchoInvoker::new(&units[1]).round_trip(&fixtures::full());
  assert!(matches!(truncated, Err(Error::MalformedPayload(_))));
}

// Mirrors the Rust guest: decode, look at every field, encode again.
struct Reencode {
  seen: Mutex<Vec<String>>,
}

impl ComputationUnit for Reencode {
  fn invoke(&self, _operation: &str, payload: &[u8]) -> proto_echo::Result<Vec<u8>> {
    let record = wapc_protobuf::decode(payload)?;
    self.seen.lock().push(format!("field_uint64: {}", record.field_uint64));
    if let Some(nested) = &record.field_nested {
      self.seen.lock().push(format!("field_nested.foo: {}", nested.foo));
    }
    Ok(wapc_protobuf::encode(&record)?)
  }
}

#[test]
fn reencoding_unit_returns_identical_bytes() {
  let unit = Reencode {
    seen: Mutex::new(Vec::new()),
  };
  let invoker = EchoInvoker::new(&unit);

  for record in [fixtures::full(), fixtures::minimal()] {
    let request = wapc_protobuf::encode(&record).unwrap();
    assert_eq!(invoker.invoke(&request).unwrap(), request);
    assert_eq!(invoker.round_trip(&record).unwrap(), record);
  }

  let seen = unit.seen.lock();
  assert!(seen.contains(&"field_nested.foo: bar".to_owned()));
  assert_eq!(seen.iter().filter(|l| l.starts_with("field_uint64: 12345")).count(), 4);
}

#[test]
fn reencoding_unit_rejects_garbage() {
  let unit = Reencode {
    seen: Mutex::new(Vec::new()),
  };
  let result = EchoInvoker::new(&unit).invoke(&[0x0a, 0x05, 0x61]);
  assert!(matches!(result, Err(Error::MalformedPayload(_))));
  assert!(unit.seen.lock().is_empty());
}

// Needs `make guest` first.
#[test]
#[ignore]
fn compiled_guest_echoes_the_full_record() {
  let console = Arc::new(Mutex::new(Vec::new()));
  let sink = console.clone();
  let unit = WapcUnit::from_file(
    concat!(
      env!("CARGO_MANIFEST_DIR"),
      "/../../wasm/crates/proto-echo-guest/build/proto_echo_guest.wasm"
    ),
    move |msg: &str| sink.lock().push(msg.to_owned()),
  )
  .unwrap();

  let invoker = EchoInvoker::new(unit);
  assert_eq!(invoker.round_trip(&fixtures::full()).unwrap(), fixtures::full());

  let console = console.lock();
  assert_eq!(console.first().map(String::as_str), Some("start protoEcho"));
  assert_eq!(console.last().map(String::as_str), Some("end protoEcho"));
}
