// Chunk: docs/chunks/position_index - Codepoint and line translation

//! Position index: translation between byte offsets, codepoint indices, and
//! (line, byte column) positions.
//!
//! Every translation scans the logical bytes lazily (pre-gap then post-gap)
//! and is O(scanned length). Nothing here mutates the buffer or caches
//! results; see [`crate::LineIndex`] for a memoized line table.

use std::iter::FusedIterator;

use crate::error::{BufferError, Result};
use crate::gap_buffer::GapBuffer;
use crate::types::Position;
use crate::utf8::{self, Codepoints};

impl GapBuffer {
    /// Returns an iterator over all codepoint units.
    pub fn codepoints(&self) -> Codepoints<'_> {
        Codepoints::new(self, 0)
    }

    /// Returns an iterator over codepoint units, decoding from `offset`.
    ///
    /// `offset` is treated as a unit boundary whether or not it is one.
    pub fn codepoints_from(&self, offset: usize) -> Result<Codepoints<'_>> {
        let len = self.len();
        if offset > len {
            return Err(BufferError::OutOfRange { offset, len });
        }
        Ok(Codepoints::new(self, offset))
    }

    /// Returns the number of codepoint units in the buffer.
    pub fn codepoint_count(&self) -> usize {
        self.codepoints().count()
    }

    /// Returns the byte offset where codepoint `n` starts.
    ///
    /// `n == codepoint_count()` is accepted and maps to `len()`.
    pub fn codepoint_to_byte(&self, n: usize) -> Result<usize> {
        let mut count = 0;
        for unit in self.codepoints() {
            if count == n {
                return Ok(unit.offset);
            }
            count += 1;
        }

        if count == n {
            Ok(self.len())
        } else {
            Err(BufferError::CodepointOutOfRange { index: n, count })
        }
    }

    /// Returns the index of the codepoint unit containing byte `offset`.
    ///
    /// `offset == len()` maps to `codepoint_count()`.
    pub fn byte_to_codepoint(&self, offset: usize) -> Result<usize> {
        let len = self.len();
        if offset > len {
            return Err(BufferError::OutOfRange { offset, len });
        }

        let mut index = 0;
        for unit in self.codepoints() {
            if unit.end() > offset {
                return Ok(index);
            }
            index += 1;
        }
        Ok(index)
    }

    /// Decodes the codepoint unit starting at `offset`.
    ///
    /// Returns `Ok(None)` if the unit is not well-formed UTF-8.
    pub fn char_at(&self, offset: usize) -> Result<Option<char>> {
        let lead = self.byte_at(offset)?;
        let unit_len = utf8::sequence_len(lead).min(self.len() - offset);
        let bytes = self.slice(offset, unit_len)?;
        Ok(utf8::decode(&bytes))
    }

    /// Returns a lazy sequence of the byte offsets at which each line begins.
    ///
    /// Line 0 always starts at 0; every `'\n'` at offset `i` starts a line at
    /// `i + 1`. The iterator borrows the buffer, so it cannot outlive a
    /// mutation. Call again (or clone it) to restart.
    pub fn line_start_offsets(&self) -> LineStarts<'_> {
        LineStarts {
            buffer: self,
            next: Some(0),
        }
    }

    /// Returns the number of lines (always at least 1).
    pub fn line_count(&self) -> usize {
        self.line_start_offsets().count()
    }

    /// Returns the byte offset where `line` begins.
    pub fn line_to_byte(&self, line: usize) -> Result<usize> {
        let mut count = 0;
        for start in self.line_start_offsets() {
            if count == line {
                return Ok(start);
            }
            count += 1;
        }
        Err(BufferError::LineOutOfRange { line, count })
    }

    /// Returns the zero-based line and byte column of `offset`.
    ///
    /// `offset == len()` is accepted (the position after the last byte).
    pub fn byte_to_line_col(&self, offset: usize) -> Result<Position> {
        let len = self.len();
        if offset > len {
            return Err(BufferError::OutOfRange { offset, len });
        }

        let mut position = Position::default();
        for (line, start) in self.line_start_offsets().enumerate() {
            if start > offset {
                break;
            }
            position = Position::new(line, offset - start);
        }
        Ok(position)
    }
}

/// Lazy sequence of line-start byte offsets. See [`GapBuffer::line_start_offsets`].
#[derive(Debug, Clone)]
pub struct LineStarts<'a> {
    buffer: &'a GapBuffer,
    next: Option<usize>,
}

impl Iterator for LineStarts<'_> {
    type Item = usize;

    fn next(&mut self) -> Option<usize> {
        let start = self.next?;
        self.next = self.buffer.find_byte(b'\n', start).map(|nl| nl + 1);
        Some(start)
    }
}

impl FusedIterator for LineStarts<'_> {}
