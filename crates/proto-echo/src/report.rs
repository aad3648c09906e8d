use wapc_protobuf::Test;

use crate::errors::Result;

/// Renders `record` as indented JSON.
///
/// Keys follow the schema's field order and every field is present, defaults
/// included. `field_bytes` is base64 and an absent `field_nested` is `null`.
pub fn render(record: &Test) -> Result<String> {
  Ok(serde_json::to_string_pretty(record)?)
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::fixtures;

  #[test]
  fn renders_every_field_in_schema_order() {
    let out = render(&fixtures::full()).unwrap();
    let keys = [
      "field_uint64",
      "field_uint32",
      "field_int64",
      "field_int32",
      "field_sint64",
      "field_sint32",
      "field_string",
      "field_bool",
      "field_bytes",
      "field_float",
      "field_double",
      "field_fixed32",
      "field_fixed64",
      "field_sfixed32",
      "field_sfixed64",
      "field_nested",
    ];
    let positions: Vec<usize> = keys
      .iter()
      .map(|k| out.find(&format!("\"{}\"", k)).unwrap())
      .collect();
    assert!(positions.windows(2).all(|w| w[0] < w[1]));

    assert!(out.contains("\"field_sint32\": -12350"));
    assert!(out.contains("\"field_bytes\": \"Ynl0ZXM=\""));
    assert!(out.contains("\"field_float\": 1234.5"));
    assert!(out.contains("\"foo\": \"bar\""));
    assert!(out.starts_with("{\n  \"field_uint64\": 12345,"));
  }

  #[test]
  fn renders_defaults_of_minimal_record() {
    let out = render(&fixtures::minimal()).unwrap();
    let json: serde_json::Value = serde_json::from_str(&out).unwrap();

    assert_eq!(json["field_uint64"], 12345);
    assert_eq!(json["field_uint32"], 0);
    assert_eq!(json["field_string"], "");
    assert_eq!(json["field_bool"], false);
    assert_eq!(json["field_bytes"], "");
    assert_eq!(json["field_double"], 0.0);
    assert!(json["field_nested"].is_null());
  }
}
