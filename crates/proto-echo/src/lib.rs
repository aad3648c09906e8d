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
  missing_copy_implementations,
  missing_debug_implementations,
  no_mangle_generic_items,
  non_shorthand_field_patterns,
  overflowing_literals,
  path_statements,
  trivial_casts,
  trivial_numeric_casts,
  unconditional_recursion,
  unreachable_pub,
  unsafe_code,
  unused,
  unused_allocation,
  unused_comparisons,
  unused_import_braces,
  unused_parens,
  unused_qualifications,
  while_true,
  missing_docs
)]
#![doc = include_str!("../README.md")]

pub mod errors;
pub use errors::{Error, Result};

mod unit;
pub use unit::{ComputationUnit, WapcUnit};

mod echo;
pub use echo::EchoInvoker;

pub mod fixtures;

/// Rendering of decoded records
pub mod report;

pub use wapc_protobuf::{Nested, Test};

/// The operation a protoEcho guest registers
pub const PROTO_ECHO: &str = "protoEcho";

/// Module loaded when none is given on the command line
pub const DEFAULT_MODULE_PATH: &str = "assembly/hello.wasm";
