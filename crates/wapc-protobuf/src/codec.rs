use prost::Message;

use crate::errors::Result;
use crate::Test;

/// Serializes a [`Test`] record into protobuf bytes.
///
/// Fields are written in ascending tag order, so the same record always produces
/// the same bytes. Fields holding their default value are omitted.
pub fn encode(record: &Test) -> Result<Vec<u8>> {
  let mut buf = Vec::with_capacity(record.encoded_len());
  record.encode(&mut buf)?;
  Ok(buf)
}

/// Parses protobuf bytes into a [`Test`] record.
///
/// Unknown field numbers are skipped. Truncated values, invalid tags, length
/// prefixes running past the end of the payload, wire-type mismatches and invalid
/// UTF-8 strings fail with [`Error::MalformedPayload`](crate::errors::Error::MalformedPayload).
pub fn decode(payload: &[u8]) -> Result<Test> {
  Ok(Test::decode(payload)?)
}

/// Number of bytes [`encode`] produces for `record`.
#[must_use]
pub fn encoded_len(record: &Test) -> usize {
  record.encoded_len()
}
