use wapc_guest::prelude::*;
use wapc_protobuf::{decode, encode};

#[no_mangle]
pub extern "C" fn wapc_init() {
  register_function("protoEcho", proto_echo);
}

fn proto_echo(payload: &[u8]) -> CallResult {
  console_log("start protoEcho");
  let record = decode(payload)?;

  console_log(&format!("field_uint64: {}", record.field_uint64));
  console_log(&format!("field_uint32: {}", record.field_uint32));
  console_log(&format!("field_int64: {}", record.field_int64));
  console_log(&format!("field_int32: {}", record.field_int32));
  console_log(&format!("field_sint64: {}", record.field_sint64));
  console_log(&format!("field_sint32: {}", record.field_sint32));
  console_log(&format!("field_string: {}", record.field_string));
  console_log(&format!("field_bool: {}", record.field_bool));
  console_log(&format!("field_bytes: {:?}", record.field_bytes));
  console_log(&format!("field_float: {}", record.field_float));
  console_log(&format!("field_double: {}", record.field_double));
  console_log(&format!("field_fixed32: {}", record.field_fixed32));
  console_log(&format!("field_fixed64: {}", record.field_fixed64));
  console_log(&format!("field_sfixed32: {}", record.field_sfixed32));
  console_log(&format!("field_sfixed64: {}", record.field_sfixed64));
  match &record.field_nested {
    Some(nested) => console_log(&format!("field_nested.foo: {}", nested.foo)),
    None => console_log("field_nested: none"),
  }

  let reply = encode(&record)?;
  console_log("end protoEcho");
  Ok(reply)
}
