use base64::Engine as _;
use serde::{Serialize, Serializer};

/// The record exchanged with the `protoEcho` operation.
///
/// Tags are fixed by the external `Test` schema. Scalars use implicit presence: a
/// field at its zero value is not written and decodes back to zero.
#[derive(Clone, PartialEq, prost::Message, Serialize)]
pub struct Test {
  /// Tag 1, `uint64`.
  #[prost(uint64, tag = "1")]
  pub field_uint64: u64,
  /// Tag 2, `uint32`.
  #[prost(uint32, tag = "2")]
  pub field_uint32: u32,
  /// Tag 3, `int64`. Negative values take ten bytes on the wire.
  #[prost(int64, tag = "3")]
  pub field_int64: i64,
  /// Tag 4, `int32`. Negative values are sign-extended to ten bytes.
  #[prost(int32, tag = "4")]
  pub field_int32: i32,
  /// Tag 5, `sint64` (zig-zag).
  #[prost(sint64, tag = "5")]
  pub field_sint64: i64,
  /// Tag 6, `sint32` (zig-zag).
  #[prost(sint32, tag = "6")]
  pub field_sint32: i32,
  /// Tag 7, UTF-8 `string`.
  #[prost(string, tag = "7")]
  pub field_string: String,
  /// Tag 8, `bool`.
  #[prost(bool, tag = "8")]
  pub field_bool: bool,
  /// Tag 9, `bytes`.
  #[prost(bytes = "vec", tag = "9")]
  #[serde(serialize_with = "as_base64")]
  pub field_bytes: Vec<u8>,
  /// Tag 10, `float`.
  #[prost(float, tag = "10")]
  pub field_float: f32,
  /// Tag 11, `double`.
  #[prost(double, tag = "11")]
  pub field_double: f64,
  /// Tag 12, `fixed32`.
  #[prost(fixed32, tag = "12")]
  pub field_fixed32: u32,
  /// Tag 13, `fixed64`.
  #[prost(fixed64, tag = "13")]
  pub field_fixed64: u64,
  /// Tag 14, `sfixed32`.
  #[prost(sfixed32, tag = "14")]
  pub field_sfixed32: i32,
  /// Tag 15, `sfixed64`.
  #[prost(sfixed64, tag = "15")]
  pub field_sfixed64: i64,
  /// Tag 16, embedded `Nested` message.
  #[prost(message, optional, tag = "16")]
  pub field_nested: Option<Nested>,
}

/// The sub-record carried in [`Test::field_nested`].
#[derive(Clone, PartialEq, Eq, prost::Message, Serialize)]
pub struct Nested {
  /// Tag 1, `string`.
  #[prost(string, tag = "1")]
  pub foo: String,
}

// protobuf's JSON mapping renders `bytes` as standard base64
fn as_base64<S: Serializer>(bytes: &[u8], serializer: S) -> Result<S::Ok, S::Error> {
  serializer.serialize_str(&base64::engine::general_purpose::STANDARD.encode(bytes))
}
