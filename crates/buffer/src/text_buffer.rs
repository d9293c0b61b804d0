// Chunk: docs/chunks/cursor_editing - Cursor-relative editing API

//! TextBuffer is the cursor-relative editing API used by the command loop.
//!
//! It combines a gap buffer (byte storage) with a memoized line index and
//! tracks the cursor as a byte offset. Each mutation returns `DirtyLines`
//! so the renderer can limit redraws.

use crate::error::{BufferError, Result};
use crate::gap_buffer::GapBuffer;
use crate::line_index::LineIndex;
use crate::types::{DirtyLines, Position};
use crate::utf8;

/// A gap buffer with a cursor and a line table kept in step with every edit.
#[derive(Debug, Clone)]
pub struct TextBuffer {
    buffer: GapBuffer,
    line_index: LineIndex,
    /// Byte offset of the cursor, always `<= buffer.len()`.
    cursor: usize,
    /// Mutation counter for sampling debug assertions (debug builds only).
    #[cfg(debug_assertions)]
    debug_mutation_count: u64,
}

impl TextBuffer {
    /// Creates a new empty text buffer.
    pub fn new() -> Self {
        Self::from_gap_buffer(GapBuffer::new())
    }

    /// Creates an empty text buffer whose storage starts at `capacity` bytes.
    pub fn with_capacity(capacity: usize) -> Self {
        Self::from_gap_buffer(GapBuffer::with_capacity(capacity))
    }

    /// Creates a text buffer holding `bytes`, cursor at the start.
    pub fn from_bytes(bytes: &[u8]) -> Self {
        Self::from_gap_buffer(GapBuffer::from_bytes(bytes))
    }

    /// Creates a text buffer holding `content`, cursor at the start.
    ///
    /// Not `FromStr`: loading text cannot fail, so a `Result` would be noise.
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(content: &str) -> Self {
        Self::from_bytes(content.as_bytes())
    }

    fn from_gap_buffer(buffer: GapBuffer) -> Self {
        let line_index = LineIndex::from_buffer(&buffer);
        Self {
            buffer,
            line_index,
            cursor: 0,
            #[cfg(debug_assertions)]
            debug_mutation_count: 0,
        }
    }

    // ==================== Accessors ====================

    /// Returns the underlying storage for position-index queries.
    pub fn buffer(&self) -> &GapBuffer {
        &self.buffer
    }

    /// Returns the logical length in bytes.
    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    /// Returns true if the buffer is empty.
    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    /// Returns the whole document.
    pub fn content(&self) -> Vec<u8> {
        self.buffer.to_bytes()
    }

    /// Returns the cursor as a byte offset.
    pub fn cursor_offset(&self) -> usize {
        self.cursor
    }

    /// Returns the cursor as (line, byte column).
    pub fn cursor_position(&self) -> Position {
        self.offset_to_position(self.cursor)
    }

    /// Returns the number of lines (at least 1).
    pub fn line_count(&self) -> usize {
        self.line_index.line_count()
    }

    /// Returns the byte length of `line` without its `'\n'`, or 0 past the end.
    pub fn line_len(&self, line: usize) -> usize {
        self.line_index
            .line_len(line, self.buffer.len())
            .unwrap_or(0)
    }

    /// Returns the bytes of `line` without its trailing `'\n'`.
    pub fn line_content(&self, line: usize) -> Result<Vec<u8>> {
        let count = self.line_count();
        let start = self
            .line_index
            .line_start(line)
            .ok_or(BufferError::LineOutOfRange { line, count })?;
        let len = self.line_len(line);
        self.buffer.slice(start, len)
    }

    fn offset_to_position(&self, offset: usize) -> Position {
        let line = self.line_index.line_at_offset(offset);
        let start = self.line_index.line_start(line).unwrap_or(0);
        Position::new(line, offset - start)
    }

    // ==================== Codepoint boundaries ====================

    /// Start of the codepoint unit that ends at `offset`.
    ///
    /// Walks back over at most three continuation bytes; if the byte reached
    /// does not announce a sequence long enough to cover them, they are stray
    /// and only one byte is stepped over.
    fn prev_boundary(&self, offset: usize) -> usize {
        if offset == 0 {
            return 0;
        }
        let mut start = offset - 1;
        while start > 0
            && offset - start < 4
            && utf8::is_continuation(self.buffer.byte_unchecked(start))
        {
            start -= 1;
        }
        if utf8::sequence_len(self.buffer.byte_unchecked(start)) >= offset - start {
            start
        } else {
            offset - 1
        }
    }

    /// End of the codepoint unit that starts at `offset`.
    fn next_boundary(&self, offset: usize) -> usize {
        let len = self.buffer.len();
        if offset >= len {
            return len;
        }
        let lead = self.buffer.byte_unchecked(offset);
        offset + utf8::sequence_len(lead).min(len - offset)
    }

    /// Moves `offset` back onto a codepoint boundary, never before `floor`.
    fn snap_to_boundary(&self, offset: usize, floor: usize) -> usize {
        let mut snapped = offset;
        while snapped > floor
            && offset - snapped < 3
            && snapped < self.buffer.len()
            && utf8::is_continuation(self.buffer.byte_unchecked(snapped))
        {
            snapped -= 1;
        }
        snapped
    }

    // ==================== Cursor Movement ====================

    /// Places the cursor at a byte offset. Offsets past the end are an error.
    pub fn set_cursor_offset(&mut self, offset: usize) -> Result<()> {
        let len = self.buffer.len();
        if offset > len {
            return Err(BufferError::OutOfRange { offset, len });
        }
        self.cursor = offset;
        Ok(())
    }

    /// Places the cursor at (line, byte column).
    ///
    /// The position is clamped to the document and snapped back onto a
    /// codepoint boundary.
    pub fn set_cursor(&mut self, pos: Position) {
        let line = pos.line.min(self.line_count().saturating_sub(1));
        let col = pos.col.min(self.line_len(line));
        self.cursor = self.position_in_line(line, col);
    }

    fn position_in_line(&self, line: usize, col: usize) -> usize {
        let start = self.line_index.line_start(line).unwrap_or(0);
        self.snap_to_boundary(start + col, start)
    }

    /// Moves the cursor left by one codepoint, across line breaks.
    pub fn move_left(&mut self) {
        self.cursor = self.prev_boundary(self.cursor);
    }

    /// Moves the cursor right by one codepoint, across line breaks.
    pub fn move_right(&mut self) {
        self.cursor = self.next_boundary(self.cursor);
    }

    /// Moves the cursor up one line, clamping the byte column.
    pub fn move_up(&mut self) {
        let pos = self.cursor_position();
        if pos.line > 0 {
            let col = pos.col.min(self.line_len(pos.line - 1));
            self.cursor = self.position_in_line(pos.line - 1, col);
        }
    }

    /// Moves the cursor down one line, clamping the byte column.
    pub fn move_down(&mut self) {
        let pos = self.cursor_position();
        if pos.line + 1 < self.line_count() {
            let col = pos.col.min(self.line_len(pos.line + 1));
            self.cursor = self.position_in_line(pos.line + 1, col);
        }
    }

    /// Moves the cursor to the start of the current line.
    pub fn move_to_line_start(&mut self) {
        let line = self.cursor_position().line;
        self.cursor = self.line_index.line_start(line).unwrap_or(0);
    }

    /// Moves the cursor to the end of the current line (before its `'\n'`).
    pub fn move_to_line_end(&mut self) {
        let line = self.cursor_position().line;
        self.cursor = self
            .line_index
            .line_end(line, self.buffer.len())
            .unwrap_or(self.cursor);
    }

    /// Moves the cursor to the start of the document.
    pub fn move_to_buffer_start(&mut self) {
        self.cursor = 0;
    }

    /// Moves the cursor to the end of the document.
    pub fn move_to_buffer_end(&mut self) {
        self.cursor = self.buffer.len();
    }

    // ==================== Validation ====================

    /// Debug assertion: the incrementally adjusted line index must match a
    /// fresh scan of the buffer. Checks every 64th mutation so tight loops
    /// stay fast. Compiled out in release builds.
    #[cfg(debug_assertions)]
    fn assert_line_index_consistent(&mut self) {
        self.debug_mutation_count += 1;
        if self.debug_mutation_count % 64 != 0 {
            return;
        }
        let expected = LineIndex::from_buffer(&self.buffer);
        assert_eq!(
            self.line_index.line_starts(),
            expected.line_starts(),
            "line index drift after {} mutations (cursor {}, len {})",
            self.debug_mutation_count,
            self.cursor,
            self.buffer.len(),
        );
    }

    #[cfg(not(debug_assertions))]
    fn assert_line_index_consistent(&mut self) {}

    // ==================== Mutations ====================

    /// Inserts `bytes` at `offset` without moving the cursor off its content.
    ///
    /// A cursor after `offset` shifts forward; one at or before it stays put.
    pub fn insert_at(&mut self, offset: usize, bytes: &[u8]) -> Result<DirtyLines> {
        self.buffer.insert(offset, bytes)?;

        let line = self.line_index.line_at_offset(offset);
        self.line_index.apply_insert(offset, bytes);
        if self.cursor > offset {
            self.cursor += bytes.len();
        }

        self.assert_line_index_consistent();
        Ok(DirtyLines::for_edit(line, bytes))
    }

    /// Removes `count` bytes at `offset`.
    ///
    /// A cursor inside the removed range lands on `offset`; one after it
    /// shifts back by `count`.
    pub fn delete(&mut self, offset: usize, count: usize) -> Result<DirtyLines> {
        self.buffer.delete(offset, count)?;
        if count == 0 {
            return Ok(DirtyLines::None);
        }

        let end = offset + count;
        let line = self.line_index.line_at_offset(offset);
        let joins_lines = self.line_index.line_at_offset(end) > line;
        self.line_index.apply_delete(offset, count);

        if self.cursor >= end {
            self.cursor -= count;
        } else if self.cursor > offset {
            self.cursor = offset;
        }

        self.assert_line_index_consistent();
        if joins_lines {
            Ok(DirtyLines::FromLineToEnd(line))
        } else {
            Ok(DirtyLines::Single(line))
        }
    }

    /// Inserts `bytes` at the cursor and moves the cursor past them.
    ///
    /// Bytes are stored as given; they need not be valid UTF-8.
    pub fn insert_bytes(&mut self, bytes: &[u8]) -> Result<DirtyLines> {
        let at = self.cursor;
        let dirty = self.insert_at(at, bytes)?;
        self.cursor = at + bytes.len();
        Ok(dirty)
    }

    /// Inserts a string at the cursor.
    pub fn insert_str(&mut self, s: &str) -> Result<DirtyLines> {
        self.insert_bytes(s.as_bytes())
    }

    /// Inserts a character at the cursor.
    pub fn insert_char(&mut self, ch: char) -> Result<DirtyLines> {
        let mut encoded = [0; 4];
        self.insert_bytes(ch.encode_utf8(&mut encoded).as_bytes())
    }

    /// Splits the current line at the cursor.
    pub fn insert_newline(&mut self) -> Result<DirtyLines> {
        self.insert_bytes(b"\n")
    }

    /// Deletes the codepoint before the cursor (Backspace).
    ///
    /// Returns `DirtyLines::None` at the start of the document.
    pub fn delete_backward(&mut self) -> Result<DirtyLines> {
        if self.cursor == 0 {
            return Ok(DirtyLines::None);
        }
        let start = self.prev_boundary(self.cursor);
        self.delete(start, self.cursor - start)
    }

    /// Deletes the codepoint after the cursor (Delete key).
    ///
    /// Returns `DirtyLines::None` at the end of the document.
    pub fn delete_forward(&mut self) -> Result<DirtyLines> {
        if self.cursor >= self.buffer.len() {
            return Ok(DirtyLines::None);
        }
        let end = self.next_boundary(self.cursor);
        self.delete(self.cursor, end - self.cursor)
    }
}

impl Default for TextBuffer {
    fn default() -> Self {
        Self::new()
    }
}
