// Chunk: docs/chunks/gap_buffer_core - Byte gap buffer storage engine
// Chunk: docs/chunks/position_index - Codepoint and line translation
// Chunk: docs/chunks/cursor_editing - Cursor-relative editing API

//! tedit-buffer: the text storage engine of the tedit command-line editor.
//!
//! The document lives in a [`GapBuffer`]: one contiguous byte block with a
//! movable gap at the edit point. Content is treated as opaque bytes that
//! usually hold UTF-8; malformed sequences are stored as given and decoded
//! opportunistically by leading byte.
//!
//! # Overview
//!
//! - [`GapBuffer`] stores bytes and offers `insert`, `delete`, `byte_at`,
//!   `slice` and `to_bytes`, plus the position index: `codepoint_to_byte`,
//!   `byte_to_line_col` and the lazy [`LineStarts`] sequence.
//! - [`LineIndex`] is a memoized line-start table that a cursor owner keeps in
//!   step with each edit instead of rescanning.
//! - [`TextBuffer`] is the cursor-relative editing API consumed by the command
//!   loop. Each mutation reports the [`DirtyLines`] it touched.
//!
//! # Example
//!
//! ```
//! use tedit_buffer::{GapBuffer, Position};
//!
//! let mut buf = GapBuffer::new();
//! buf.insert(0, b"hello").unwrap();
//! buf.insert(5, b" world").unwrap();
//! buf.delete(0, 6).unwrap();
//! assert_eq!(buf.to_bytes(), b"world");
//! assert_eq!(buf.codepoint_to_byte(2).unwrap(), 2);
//!
//! let buf = GapBuffer::from("ab\ncd");
//! assert_eq!(buf.line_start_offsets().collect::<Vec<_>>(), vec![0, 3]);
//! assert_eq!(buf.byte_to_line_col(4).unwrap(), Position::new(1, 1));
//! ```
//!
//! # Errors
//!
//! Offsets past the document are reported as [`BufferError`], never clamped.
//! Zero-length inserts and deletes succeed without touching the buffer.
//! [`BufferError::AllocationFailed`] means growth could not reserve memory;
//! the buffer is intact but the edit session should be abandoned.

mod error;
mod gap_buffer;
mod line_index;
mod position;
mod text_buffer;
mod types;
pub mod utf8;

pub use error::{BufferError, Result};
pub use gap_buffer::{GapBuffer, DEFAULT_CAPACITY, MIN_GROWTH};
pub use line_index::LineIndex;
pub use position::LineStarts;
pub use text_buffer::TextBuffer;
pub use types::{DirtyLines, Position};
pub use utf8::{Codepoint, Codepoints};
