// Chunk: docs/chunks/position_index - Codepoint and line translation

//! Memoized line-start table.
//!
//! [`GapBuffer::line_start_offsets`] rescans the document every time. A
//! cursor-owning collaborator that asks line questions after every keystroke
//! keeps one of these instead and adjusts it on each edit.

use crate::gap_buffer::GapBuffer;

/// Byte offsets where each line starts. `line_starts[0] == 0` always.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineIndex {
    line_starts: Vec<usize>,
}

impl LineIndex {
    /// Creates the index of an empty document (one empty line).
    pub fn new() -> Self {
        Self {
            line_starts: vec![0],
        }
    }

    /// Builds the index for `buffer`.
    pub fn from_buffer(buffer: &GapBuffer) -> Self {
        let mut index = Self::new();
        index.rebuild(buffer);
        index
    }

    /// Rescans `buffer` from scratch. O(n) in the document length.
    pub fn rebuild(&mut self, buffer: &GapBuffer) {
        self.line_starts.clear();
        self.line_starts.extend(buffer.line_start_offsets());
        tracing::debug!(lines = self.line_starts.len(), "line index rebuilt");
    }

    /// Returns the number of lines (at least 1).
    pub fn line_count(&self) -> usize {
        self.line_starts.len()
    }

    /// Returns the byte offset where `line` starts.
    pub fn line_start(&self, line: usize) -> Option<usize> {
        self.line_starts.get(line).copied()
    }

    /// Returns the byte offset where `line` ends, excluding its `'\n'`.
    ///
    /// `total_len` is the document length, which ends the last line.
    pub fn line_end(&self, line: usize, total_len: usize) -> Option<usize> {
        if line >= self.line_count() {
            return None;
        }
        match self.line_starts.get(line + 1) {
            Some(next) => Some(next - 1),
            None => Some(total_len),
        }
    }

    /// Returns the byte length of `line`, excluding its `'\n'`.
    pub fn line_len(&self, line: usize, total_len: usize) -> Option<usize> {
        let start = self.line_start(line)?;
        let end = self.line_end(line, total_len)?;
        Some(end - start)
    }

    /// Returns the line containing byte `offset`. O(log n).
    pub fn line_at_offset(&self, offset: usize) -> usize {
        match self.line_starts.binary_search(&offset) {
            Ok(line) => line,
            Err(line) => line.saturating_sub(1),
        }
    }

    /// Adjusts the table after `bytes` were inserted at `offset`.
    pub fn apply_insert(&mut self, offset: usize, bytes: &[u8]) {
        if bytes.is_empty() {
            return;
        }
        let line = self.line_at_offset(offset);

        for start in &mut self.line_starts[line + 1..] {
            *start += bytes.len();
        }

        let new_starts = bytes
            .iter()
            .enumerate()
            .filter(|&(_, &b)| b == b'\n')
            .map(|(i, _)| offset + i + 1);
        self.line_starts.splice(line + 1..line + 1, new_starts);
    }

    /// Adjusts the table after `count` bytes were removed at `offset`.
    ///
    /// Lines whose breaking `'\n'` lay inside the removed range disappear.
    pub fn apply_delete(&mut self, offset: usize, count: usize) {
        if count == 0 {
            return;
        }
        let end = offset + count;

        // A '\n' at i in [offset, end) started a line at i + 1 in (offset, end].
        let first = self.line_starts.partition_point(|&s| s <= offset);
        let last = self.line_starts.partition_point(|&s| s <= end);
        self.line_starts.drain(first..last);

        for start in &mut self.line_starts[first..] {
            *start -= count;
        }
    }

    /// Returns the raw table.
    pub fn line_starts(&self) -> &[usize] {
        &self.line_starts
    }
}

impl Default for LineIndex {
    fn default() -> Self {
        Self::new()
    }
}
