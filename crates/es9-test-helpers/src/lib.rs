//! Shared test utilities for the ES-9 control codec.
//!
//! # Modules
//!
//! - [`mod@must`] - Unwrap helpers with `#[track_caller]`
//! - [`assertions`] - 7-bit payload checks, word-at-offset, approximate floats
//! - [`fixtures`] - Builders for synthetic configuration and mix dumps
//! - [`prelude`] - Convenience re-exports
//!
//! # Usage
//!
//! ```toml
//! [dev-dependencies]
//! es9-test-helpers = { workspace = true }
//! ```

#![deny(unsafe_op_in_unsafe_fn)]

pub mod assertions;
pub mod fixtures;
pub mod must;
pub mod prelude;

pub use must::*;
