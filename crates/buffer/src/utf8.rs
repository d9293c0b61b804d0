// Chunk: docs/chunks/position_index - Codepoint and line translation

//! Non-validating UTF-8 codepoint units.
//!
//! A codepoint's length is taken from its leading byte alone. Continuation
//! bytes are never checked, so malformed input still splits into units:
//!
//! - `0xxxxxxx` is 1 byte
//! - `110xxxxx` is 2 bytes
//! - `1110xxxx` is 3 bytes
//! - `11110xxx` is 4 bytes
//! - anything else (stray continuation byte, `0xF8..=0xFF`) is a 1-byte unit
//!
//! A unit whose leading byte promises more bytes than remain in the document
//! is cut short at the document end.

use crate::gap_buffer::GapBuffer;

/// Returns the sequence length announced by a leading byte.
#[inline]
pub fn sequence_len(lead: u8) -> usize {
    match lead {
        0x00..=0x7f => 1,
        0xc0..=0xdf => 2,
        0xe0..=0xef => 3,
        0xf0..=0xf7 => 4,
        _ => 1,
    }
}

/// Returns true for `10xxxxxx` bytes.
#[inline]
pub fn is_continuation(byte: u8) -> bool {
    byte & 0xc0 == 0x80
}

/// One codepoint unit in the logical byte sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Codepoint {
    /// Logical byte offset of the unit's first byte.
    pub offset: usize,
    /// Number of bytes in the unit (1 to 4).
    pub len: usize,
}

impl Codepoint {
    /// Byte offset one past the end of this unit.
    pub fn end(&self) -> usize {
        self.offset + self.len
    }
}

/// Iterator over the codepoint units of a [`GapBuffer`].
///
/// Reads through the gap transparently and never moves it.
#[derive(Debug, Clone)]
pub struct Codepoints<'a> {
    buffer: &'a GapBuffer,
    offset: usize,
}

impl<'a> Codepoints<'a> {
    pub(crate) fn new(buffer: &'a GapBuffer, offset: usize) -> Self {
        Self { buffer, offset }
    }
}

impl Iterator for Codepoints<'_> {
    type Item = Codepoint;

    fn next(&mut self) -> Option<Codepoint> {
        let len = self.buffer.len();
        if self.offset >= len {
            return None;
        }

        let lead = self.buffer.byte_unchecked(self.offset);
        let unit_len = sequence_len(lead).min(len - self.offset);
        let unit = Codepoint {
            offset: self.offset,
            len: unit_len,
        };
        self.offset += unit_len;
        Some(unit)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.buffer.len().saturating_sub(self.offset);
        (remaining.div_ceil(4), Some(remaining))
    }
}

/// Decodes a unit's bytes into a `char`, or `None` if they are not valid UTF-8.
pub fn decode(bytes: &[u8]) -> Option<char> {
    let s = std::str::from_utf8(bytes).ok()?;
    let mut chars = s.chars();
    let ch = chars.next()?;
    chars.next().is_none().then_some(ch)
}
