#![deny(
  clippy::expect_used,
  clippy::explicit_deref_methods,
  clippy::option_if_let_else,
  clippy::cloned_instead_of_copied,
  clippy::implicit_clone,
  clippy::inefficient_to_string,
  clippy::map_unwrap_or,
  clippy::must_use_candidate,
  clippy::needless_pass_by_value,
  clippy::redundant_else,
  clippy::semicolon_if_nothing_returned,
  clippy::str_to_string,
  clippy::try_err,
  bad_style,
  dead_code,
  deprecated,
  improper_ctypes,
  missing_debug_implementations,
  no_mangle_generic_items,
  non_shorthand_field_patterns,
  overflowing_literals,
  path_statements,
  unconditional_recursion,
  unreachable_pub,
  unsafe_code,
  unused,
  unused_allocation,
  unused_comparisons,
  unused_parens,
  while_true,
  missing_docs
)]
#![doc = include_str!("../README.md")]

/// The crate's error module
pub mod errors;

mod codec;
mod record;

pub use codec::{decode, encode, encoded_len};
pub use record::{Nested, Test};
