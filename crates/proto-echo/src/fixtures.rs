//! The records sent by the `proto-echo` binary

use wapc_protobuf::{Nested, Test};

/// Every field populated, including the nested record.
#[must_use]
pub fn full() -> Test {
  Test {
    field_uint64: 12345,
    field_uint32: 12346,
    field_int64: -12347,
    field_int32: -12348,
    field_sint64: -12349,
    field_sint32: -12350,
    field_string: "string".to_owned(),
    field_bool: true,
    field_bytes: b"bytes".to_vec(),
    field_float: 1234.5,
    field_double: 61234.5,
    field_fixed32: 1111,
    field_fixed64: 2222,
    field_sfixed32: -3333,
    field_sfixed64: -4444,
    field_nested: Some(Nested { foo: "bar".to_owned() }),
  }
}

/// Only `field_uint64` set; everything else keeps its default.
#[must_use]
pub fn minimal() -> Test {
  Test {
    field_uint64: 12345,
    ..Default::default()
  }
}
