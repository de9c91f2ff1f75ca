//! Everything an ES-9 integration test usually needs.
//!
//! ```rust,ignore
//! use es9_test_helpers::prelude::*;
//! ```

pub use crate::assertions::{assert_seven_bit, assert_word_at};
pub use crate::fixtures::{ConfigDumpFixture, MixDumpFixture, encode_words, i16_word};
pub use crate::must::{must, must_err, must_some, must_with};

/// Return type for tests that propagate errors with `?`.
pub type TestResult = Result<(), Box<dyn std::error::Error>>;
