//! Common 7-bit SysEx utilities for the ES-9 protocol implementation
//!
//! MIDI System-Exclusive data bytes only carry seven bits each. The ES-9
//! packs its wider values into groups of those bytes; this crate provides
//! the word codec and the payload reader/builder shared by the protocol
//! crate.

#![deny(unsafe_op_in_unsafe_fn)]
#![deny(clippy::unwrap_used)]

pub mod payload;
pub mod word;

pub use payload::*;
pub use word::*;

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SysexCommonError {
    #[error("Word index {index} out of range (payload holds {len} words)")]
    WordOutOfRange { index: usize, len: usize },

    #[error("Byte range {start}..{end} out of range (payload holds {len} bytes)")]
    ByteOutOfRange { start: usize, end: usize, len: usize },

    #[error("Byte 0x{0:02X} is not a 7-bit SysEx data byte")]
    NotSevenBit(u8),
}

pub type SysexCommonResult<T> = Result<T, SysexCommonError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_types() {
        let err = SysexCommonError::WordOutOfRange { index: 718, len: 12 };
        assert_eq!(
            format!("{}", err),
            "Word index 718 out of range (payload holds 12 words)"
        );

        let err = SysexCommonError::NotSevenBit(0xF7);
        assert_eq!(format!("{}", err), "Byte 0xF7 is not a 7-bit SysEx data byte");
    }
}
