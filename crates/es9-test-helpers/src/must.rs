//! `Result`/`Option` extraction for tests that must not use `unwrap()`.
//!
//! All helpers are `#[track_caller]`, so a failure points at the test line.

use std::fmt::Debug;

/// The `Ok` value of `result`.
///
/// ```rust
/// use es9_test_helpers::must;
///
/// let rate: Result<u32, &str> = Ok(48_000);
/// assert_eq!(must(rate), 48_000);
/// ```
///
/// # Panics
///
/// On `Err`, with the error's `Debug` output.
#[track_caller]
pub fn must<T, E: Debug>(result: Result<T, E>) -> T {
    result.unwrap_or_else(|err| panic!("must: expected Ok, got Err({err:?})"))
}

/// The `Some` value of `option`.
///
/// # Panics
///
/// On `None`, with `what` naming the missing value.
#[track_caller]
pub fn must_some<T>(option: Option<T>, what: &str) -> T {
    option.unwrap_or_else(|| panic!("must_some: {what} is None"))
}

/// The error of a result that is expected to fail.
///
/// # Panics
///
/// On `Ok`, with the value's `Debug` output.
#[track_caller]
pub fn must_err<T: Debug, E>(result: Result<T, E>) -> E {
    match result {
        Err(err) => err,
        Ok(value) => panic!("must_err: expected Err, got Ok({value:?})"),
    }
}

/// Like [`must`], prefixing the panic message with `context`.
///
/// # Panics
///
/// On `Err`.
#[track_caller]
pub fn must_with<T, E: Debug>(result: Result<T, E>, context: &str) -> T {
    result.unwrap_or_else(|err| panic!("{context}: {err:?}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ok_passes_through() {
        let code: Result<u8, String> = Ok(0x78);
        assert_eq!(must(code), 0x78);
        assert_eq!(must_with(Ok::<_, String>(3176i16), "dc offset"), 3176);
    }

    #[test]
    #[should_panic(expected = "expected Ok, got Err(\"truncated\")")]
    fn err_panics_with_debug() {
        must(Err::<u8, _>("truncated"));
    }

    #[test]
    fn err_is_extracted() {
        assert_eq!(must_err(Err::<u8, _>(8u32)), 8);
    }

    #[test]
    #[should_panic(expected = "must_err: expected Err, got Ok(719)")]
    fn unexpected_ok_panics() {
        must_err::<_, ()>(Ok(719usize));
    }

    #[test]
    #[should_panic(expected = "must_some: filter slot is None")]
    fn none_panics_with_name() {
        must_some::<u8>(None, "filter slot");
    }

    #[test]
    #[should_panic(expected = "set mix: ")]
    fn context_prefixes_message() {
        must_with(Err::<u8, _>("out of range"), "set mix");
    }
}
