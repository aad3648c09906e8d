#![deny(
  clippy::expect_used,
  clippy::explicit_deref_methods,
  clippy::option_if_let_else,
  clippy::cloned_instead_of_copied,
  clippy::explicit_into_iter_loop,
  clippy::implicit_clone,
  clippy::inefficient_to_string,
  clippy::map_unwrap_or,
  clippy::must_use_candidate,
  clippy::needless_pass_by_value,
  clippy::redundant_else,
  clippy::semicolon_if_nothing_returned,
  clippy::too_many_lines,
  clippy::str_to_string,
  clippy::try_err,
  clippy::manual_assert,
  bad_style,
  clashing_extern_declarations,
  dead_code,
  deprecated,
  explicit_outlives_requirements,
  improper_ctypes,
  invalid_value,
  missing_copy_implementations,
  missing_debug_implementations,
  no_mangle_generic_items,
  non_shorthand_field_patterns,
  overflowing_literals,
  path_statements,
  trivial_bounds,
  trivial_casts,
  trivial_numeric_casts,
  type_alias_bounds,
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

mod callbacks;
mod store;

/// The crate's error module
pub mod errors;

mod builder;
pub use builder::WasmtimeUnitBuilder;

mod provider;
pub use provider::WasmtimeUnit;

// export wasmtime, so that consumers of this crate can use the very same version
pub use wasmtime;

/// Receiver for the messages a guest writes with `__console_log`
pub type ConsoleSink = dyn Fn(&str) + Send + Sync + 'static;
