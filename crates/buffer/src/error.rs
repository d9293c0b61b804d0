// Chunk: docs/chunks/gap_buffer_core - Byte gap buffer storage engine

//! Error types for buffer operations.

/// Errors returned by buffer operations.
///
/// A failed operation leaves the buffer exactly as it was.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BufferError {
    /// A byte offset, or the end of a byte range, lies past the logical length.
    #[error("byte offset {offset} is out of range (length {len})")]
    OutOfRange { offset: usize, len: usize },

    /// A codepoint index lies past the number of codepoints in the buffer.
    #[error("codepoint {index} is out of range ({count} codepoints)")]
    CodepointOutOfRange { index: usize, count: usize },

    /// A line number lies past the number of lines in the buffer.
    #[error("line {line} is out of range ({count} lines)")]
    LineOutOfRange { line: usize, count: usize },

    /// Growing the backing block failed. The edit session cannot continue.
    #[error("failed to grow buffer to {requested} bytes")]
    AllocationFailed { requested: usize },
}

impl BufferError {
    /// Returns true for the range errors (byte, codepoint, or line).
    pub fn is_out_of_range(&self) -> bool {
        !matches!(self, BufferError::AllocationFailed { .. })
    }
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, BufferError>;
