//! SysEx payload building and raw byte access

use crate::word::encode_14_7_7;
use crate::{SysexCommonError, SysexCommonResult};

/// Return `true` if `byte` is a legal SysEx data byte (high bit clear).
pub fn is_seven_bit(byte: u8) -> bool {
    byte & 0x80 == 0
}

/// Borrow `len` raw bytes at `start`.
///
/// Used for the sections of a payload that are plain 7-bit bytes rather
/// than packed words.
pub fn byte_range(data: &[u8], start: usize, len: usize) -> SysexCommonResult<&[u8]> {
    let end = start.saturating_add(len);
    data.get(start..end).ok_or(SysexCommonError::ByteOutOfRange {
        start,
        end,
        len: data.len(),
    })
}

pub struct PayloadBuilder {
    buffer: Vec<u8>,
}

impl PayloadBuilder {
    pub fn new() -> Self {
        Self { buffer: Vec::new() }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            buffer: Vec::with_capacity(capacity),
        }
    }

    pub fn write_u8(&mut self, value: u8) -> SysexCommonResult<&mut Self> {
        if !is_seven_bit(value) {
            return Err(SysexCommonError::NotSevenBit(value));
        }
        self.buffer.push(value);
        Ok(self)
    }

    pub fn write_bool(&mut self, value: bool) -> &mut Self {
        self.buffer.push(u8::from(value));
        self
    }

    pub fn write_bytes(&mut self, data: &[u8]) -> SysexCommonResult<&mut Self> {
        if let Some(&bad) = data.iter().find(|&&b| !is_seven_bit(b)) {
            return Err(SysexCommonError::NotSevenBit(bad));
        }
        self.buffer.extend_from_slice(data);
        Ok(self)
    }

    /// Append the 14/7/7 split of `value`, see [`encode_14_7_7`].
    pub fn write_14_7_7(&mut self, value: i32, top_mask: u8) -> &mut Self {
        self.buffer.extend_from_slice(&encode_14_7_7(value, top_mask));
        self
    }

    pub fn into_inner(self) -> Vec<u8> {
        self.buffer
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.buffer
    }

    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }
}

impl Default for PayloadBuilder {
    fn default() -> Self {
        Self::new()
    }
}
