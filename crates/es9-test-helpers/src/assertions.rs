//! Assertions for SysEx payloads and decoded floats.

use es9_sysex_common::{BYTES_PER_WORD, is_seven_bit, pack_word};

/// Assert that two floats differ by at most `tolerance`.
///
/// ```rust
/// use es9_test_helpers::assert_approx_eq;
///
/// assert_approx_eq!(22_000.0_f64, 21_999.9995, 0.001);
/// ```
#[macro_export]
macro_rules! assert_approx_eq {
    ($left:expr, $right:expr, $tolerance:expr $(,)?) => {{
        let (left, right, tolerance) = ($left, $right, $tolerance);
        let diff = (left - right).abs();
        if diff > tolerance {
            panic!("assert_approx_eq: {left:?} vs {right:?} differ by {diff:?} (tolerance {tolerance:?})");
        }
    }};
}

/// Assert that every byte of a SysEx payload has the top bit clear.
///
/// # Panics
///
/// At the first byte `>= 0x80`, naming its index.
#[track_caller]
pub fn assert_seven_bit(bytes: &[u8]) {
    if let Some((index, byte)) = bytes.iter().enumerate().find(|(_, b)| !is_seven_bit(**b)) {
        panic!("byte {index} is {byte:#04X}, not 7-bit clean");
    }
}

/// Assert that the triplet starting at byte `offset` packs to `expected`.
///
/// # Panics
///
/// If fewer than three bytes remain at `offset` or the word differs.
#[track_caller]
pub fn assert_word_at(bytes: &[u8], offset: usize, expected: u32) {
    match bytes.get(offset..offset + BYTES_PER_WORD) {
        Some(&[b0, b1, b2]) => {
            let word = pack_word(b0, b1, b2);
            assert_eq!(
                word, expected,
                "word at byte {offset} ({b0:02X} {b1:02X} {b2:02X})"
            );
        }
        _ => panic!("no word at byte {offset} of a {}-byte payload", bytes.len()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn approx_within_tolerance() {
        assert_approx_eq!(0.1_f64, 0.1000001, 1e-6);
    }

    #[test]
    #[should_panic(expected = "assert_approx_eq")]
    fn approx_outside_tolerance() {
        assert_approx_eq!(0.1_f64, 0.2, 1e-6);
    }

    #[test]
    fn seven_bit_payload_passes() {
        assert_seven_bit(&[0x00, 0x21, 0x27, 0x19, 0x7F]);
    }

    #[test]
    #[should_panic(expected = "byte 2 is 0xF7")]
    fn framing_byte_is_caught() {
        assert_seven_bit(&[0x00, 0x01, 0xF7]);
    }

    #[test]
    fn word_at_offset() {
        // 32768 -> 02 00 00
        assert_word_at(&[0x05, 0x02, 0x00, 0x00], 1, 32768);
    }

    #[test]
    #[should_panic(expected = "no word at byte 2")]
    fn word_past_end() {
        assert_word_at(&[0x00, 0x00, 0x00, 0x00], 2, 0);
    }
}
