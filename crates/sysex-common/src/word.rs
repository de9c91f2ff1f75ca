//! 21-bit word packing over 7-bit SysEx bytes.
//!
//! The ES-9 reports wide values as byte triplets `(b0, b1, b2)` carrying
//! `(b0 << 14) | (b1 << 7) | b2`. Outgoing values use the same 14/7/7 split,
//! with the top byte masked to the field width.

use crate::{SysexCommonError, SysexCommonResult};

/// Number of SysEx bytes carrying one word.
pub const BYTES_PER_WORD: usize = 3;

/// Largest value a decoded word can hold (`2^21 - 1`).
pub const WORD_MAX: u32 = (1 << 21) - 1;

/// Top-byte mask for fields the device treats as signed 16-bit.
///
/// Bits above bit 15 are discarded; callers validate the range first.
pub const SIGNED_16_TOP_MASK: u8 = 0x03;

/// Top-byte mask keeping a full 7-bit top byte.
pub const FULL_TOP_MASK: u8 = 0x7F;

/// Pack one byte triplet into a word.
pub fn pack_word(b0: u8, b1: u8, b2: u8) -> u32 {
    (u32::from(b0) << 14) | (u32::from(b1) << 7) | u32::from(b2)
}

/// Decode a byte stream into words, three bytes per word.
///
/// A trailing group of one or two bytes is dropped without error.
pub fn decode_words(bytes: &[u8]) -> Vec<u32> {
    bytes
        .chunks_exact(BYTES_PER_WORD)
        .map(|triplet| match *triplet {
            [b0, b1, b2] => pack_word(b0, b1, b2),
            _ => 0,
        })
        .collect()
}

/// Split `value` into the device's 14/7/7 byte triplet.
///
/// `byte0 = (value >> 14) & top_mask`, `byte1 = (value >> 7) & 0x7F`,
/// `byte2 = value & 0x7F`. Negative values are split from their two's
/// complement bit pattern.
pub fn encode_14_7_7(value: i32, top_mask: u8) -> [u8; 3] {
    let bits = u32::from_ne_bytes(value.to_ne_bytes());
    [
        ((bits >> 14) & u32::from(top_mask & 0x7F)) as u8,
        ((bits >> 7) & 0x7F) as u8,
        (bits & 0x7F) as u8,
    ]
}

/// Interpret the low 16 bits of a word as a two's-complement value.
pub fn word_to_i16(word: u32) -> i16 {
    i16::from_ne_bytes(((word & 0xFFFF) as u16).to_ne_bytes())
}

/// Combine a `hi << 7 | lo` byte pair.
pub fn decode_14_7(hi: u8, lo: u8) -> u16 {
    (u16::from(hi & 0x7F) << 7) | u16::from(lo & 0x7F)
}

/// Index-addressed view over a decoded word stream.
///
/// Every access is bounds-checked; reading past the end is an error, never
/// a default value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WordReader {
    words: Vec<u32>,
}

impl WordReader {
    pub fn new(words: impl Into<Vec<u32>>) -> Self {
        Self {
            words: words.into(),
        }
    }

    /// Decode `bytes` and wrap the resulting words.
    pub fn from_bytes(bytes: &[u8]) -> Self {
        Self::new(decode_words(bytes))
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    pub fn word(&self, index: usize) -> SysexCommonResult<u32> {
        self.words
            .get(index)
            .copied()
            .ok_or(SysexCommonError::WordOutOfRange {
                index,
                len: self.words.len(),
            })
    }

    /// Borrow `count` words starting at `start`.
    pub fn words(&self, start: usize, count: usize) -> SysexCommonResult<&[u32]> {
        let end = start.saturating_add(count);
        self.words
            .get(start..end)
            .ok_or(SysexCommonError::WordOutOfRange {
                index: end.saturating_sub(1),
                len: self.words.len(),
            })
    }

    /// Fail unless the stream holds at least `count` words.
    pub fn require(&self, count: usize) -> SysexCommonResult<()> {
        if self.words.len() < count {
            return Err(SysexCommonError::WordOutOfRange {
                index: count.saturating_sub(1),
                len: self.words.len(),
            });
        }
        Ok(())
    }

    pub fn as_slice(&self) -> &[u32] {
        &self.words
    }

    pub fn into_inner(self) -> Vec<u32> {
        self.words
    }
}
