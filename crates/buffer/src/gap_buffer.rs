// Chunk: docs/chunks/gap_buffer_core - Byte gap buffer storage engine

//! Gap buffer implementation for efficient text editing.
//!
//! The document is a contiguous byte block with a movable gap at the edit point:
//!
//! ```text
//!  [ pre-gap content | gap (unused) | post-gap content ]
//!    0..gap_start      gap_start..gap_end  gap_end..capacity
//! ```
//!
//! Insertions and deletions at the gap are O(1); moving the gap is O(distance)
//! but amortizes well for typical editing patterns (locality of edits).
//!
//! Content is opaque bytes. Nothing here validates UTF-8.

use std::fmt;

use crate::error::{BufferError, Result};

/// Capacity of a buffer created with [`GapBuffer::new`], and the spare gap
/// reserved by [`GapBuffer::from_bytes`].
pub const DEFAULT_CAPACITY: usize = 64;

/// Smallest capacity a growing buffer will reallocate to.
pub const MIN_GROWTH: usize = 64;

const GROWTH_FACTOR: usize = 2;

/// A gap buffer storing the document as bytes.
///
/// All public offsets are logical byte offsets (the gap is never visible).
#[derive(Debug, Clone)]
pub struct GapBuffer {
    /// Backing block. `data.len()` is the capacity; every slot is initialized.
    data: Vec<u8>,
    /// First unused byte (the edit point).
    gap_start: usize,
    /// First used byte after the gap.
    gap_end: usize,
}

impl GapBuffer {
    /// Creates an empty buffer with [`DEFAULT_CAPACITY`] bytes of gap.
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    /// Creates an empty buffer whose gap spans `capacity` bytes.
    ///
    /// A capacity of 0 is allowed; the first insert grows the block.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            data: vec![0; capacity],
            gap_start: 0,
            gap_end: capacity,
        }
    }

    /// Creates a buffer pre-loaded with `bytes`, gap placed at the end.
    pub fn from_bytes(bytes: &[u8]) -> Self {
        let capacity = bytes.len() + DEFAULT_CAPACITY;
        let mut data = Vec::with_capacity(capacity);
        data.extend_from_slice(bytes);
        data.resize(capacity, 0);

        Self {
            data,
            gap_start: bytes.len(),
            gap_end: capacity,
        }
    }

    // ==================== Accessors ====================

    /// Returns the logical length in bytes (excluding the gap).
    pub fn len(&self) -> usize {
        self.gap_start + (self.data.len() - self.gap_end)
    }

    /// Returns true if the buffer holds no content.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the size of the backing block. Never shrinks.
    pub fn capacity(&self) -> usize {
        self.data.len()
    }

    /// Returns the physical index where the gap begins.
    ///
    /// This is also the logical offset of the current edit point.
    pub fn gap_start(&self) -> usize {
        self.gap_start
    }

    /// Returns the physical index one past the end of the gap.
    pub fn gap_end(&self) -> usize {
        self.gap_end
    }

    fn gap_len(&self) -> usize {
        self.gap_end - self.gap_start
    }

    /// Translates a logical offset (< len) to its physical index.
    #[inline]
    fn physical(&self, offset: usize) -> usize {
        if offset < self.gap_start {
            offset
        } else {
            offset + self.gap_len()
        }
    }

    fn check_offset(&self, offset: usize) -> Result<()> {
        let len = self.len();
        if offset > len {
            return Err(BufferError::OutOfRange { offset, len });
        }
        Ok(())
    }

    /// Validates `offset..offset + count` and returns its end.
    fn check_range(&self, offset: usize, count: usize) -> Result<usize> {
        let len = self.len();
        match offset.checked_add(count) {
            Some(end) if end <= len => Ok(end),
            _ => Err(BufferError::OutOfRange {
                offset: offset.saturating_add(count),
                len,
            }),
        }
    }

    // ==================== Gap movement ====================

    /// Moves the gap so that it begins at logical `offset`.
    ///
    /// This is O(distance) where distance is the absolute difference between
    /// the current gap position and `offset`. Already being there is a no-op.
    pub fn move_gap_to(&mut self, offset: usize) -> Result<()> {
        self.check_offset(offset)?;

        if offset < self.gap_start {
            // Shift [offset..gap_start] into the tail of the gap.
            let shift = self.gap_start - offset;
            self.data
                .copy_within(offset..self.gap_start, self.gap_end - shift);
            tracing::trace!(from = self.gap_start, to = offset, shift, "gap moved left");
            self.gap_start = offset;
            self.gap_end -= shift;
        } else if offset > self.gap_start {
            // Shift the head of the post-gap content into the head of the gap.
            let shift = offset - self.gap_start;
            self.data
                .copy_within(self.gap_end..self.gap_end + shift, self.gap_start);
            tracing::trace!(from = self.gap_start, to = offset, shift, "gap moved right");
            self.gap_start = offset;
            self.gap_end += shift;
        }
        Ok(())
    }

    /// Guarantees at least `min_size` bytes of gap.
    ///
    /// Grows the block geometrically: the new capacity is the largest of
    /// twice the old capacity, the exact need, and [`MIN_GROWTH`]. The gap
    /// keeps its start so callers may rely on `move_gap_to` having placed it.
    fn ensure_gap(&mut self, min_size: usize) -> Result<()> {
        let gap = self.gap_len();
        if gap >= min_size {
            return Ok(());
        }

        let old_capacity = self.data.len();
        let exact = old_capacity
            .checked_add(min_size - gap)
            .ok_or(BufferError::AllocationFailed { requested: usize::MAX })?;
        let new_capacity = exact
            .max(old_capacity.saturating_mul(GROWTH_FACTOR))
            .max(MIN_GROWTH);

        self.data
            .try_reserve_exact(new_capacity - old_capacity)
            .map_err(|_| BufferError::AllocationFailed {
                requested: new_capacity,
            })?;
        self.data.resize(new_capacity, 0);

        // Slide post-gap content to the end of the enlarged block.
        let post_len = old_capacity - self.gap_end;
        let new_gap_end = new_capacity - post_len;
        if post_len > 0 {
            self.data.copy_within(self.gap_end..old_capacity, new_gap_end);
        }
        self.gap_end = new_gap_end;

        tracing::debug!(
            old_capacity,
            new_capacity,
            gap = self.gap_len(),
            "gap buffer grew"
        );
        Ok(())
    }

    // ==================== Mutations ====================

    /// Inserts `bytes` at logical `offset`.
    ///
    /// Everything at or after `offset` shifts forward by `bytes.len()`.
    /// Inserting nothing at a valid offset is a no-op that leaves the gap alone.
    pub fn insert(&mut self, offset: usize, bytes: &[u8]) -> Result<()> {
        self.check_offset(offset)?;
        if bytes.is_empty() {
            return Ok(());
        }

        self.move_gap_to(offset)?;
        self.ensure_gap(bytes.len())?;
        let end = self.gap_start + bytes.len();
        self.data[self.gap_start..end].copy_from_slice(bytes);
        self.gap_start = end;
        Ok(())
    }

    /// Removes `count` bytes starting at logical `offset`.
    ///
    /// Returns `OutOfRange` (and changes nothing) if the range runs past the end.
    pub fn delete(&mut self, offset: usize, count: usize) -> Result<()> {
        self.check_range(offset, count)?;
        if count == 0 {
            return Ok(());
        }

        self.move_gap_to(offset)?;
        self.gap_end += count;
        Ok(())
    }

    // ==================== Reads ====================

    /// Returns the byte at logical `offset`.
    pub fn byte_at(&self, offset: usize) -> Result<u8> {
        let len = self.len();
        if offset >= len {
            return Err(BufferError::OutOfRange { offset, len });
        }
        Ok(self.data[self.physical(offset)])
    }

    /// Copies `length` bytes starting at logical `offset`.
    pub fn slice(&self, offset: usize, length: usize) -> Result<Vec<u8>> {
        let end = self.check_range(offset, length)?;
        let mut out = Vec::with_capacity(length);

        if offset < self.gap_start {
            out.extend_from_slice(&self.data[offset..end.min(self.gap_start)]);
        }
        if end > self.gap_start {
            let from = offset.max(self.gap_start) + self.gap_len();
            let to = end + self.gap_len();
            out.extend_from_slice(&self.data[from..to]);
        }
        Ok(out)
    }

    /// Returns the pre-gap and post-gap content without copying.
    pub fn as_slices(&self) -> (&[u8], &[u8]) {
        (&self.data[..self.gap_start], &self.data[self.gap_end..])
    }

    /// Returns an iterator over all logical bytes.
    pub fn bytes(&self) -> impl Iterator<Item = u8> + '_ {
        let (pre, post) = self.as_slices();
        pre.iter().chain(post.iter()).copied()
    }

    /// Returns the logical content as one contiguous vector.
    pub fn to_bytes(&self) -> Vec<u8> {
        let (pre, post) = self.as_slices();
        let mut out = Vec::with_capacity(self.len());
        out.extend_from_slice(pre);
        out.extend_from_slice(post);
        out
    }

    /// Returns the content as a string, replacing malformed UTF-8 with U+FFFD.
    pub fn to_string_lossy(&self) -> String {
        String::from_utf8_lossy(&self.to_bytes()).into_owned()
    }

    /// Returns the logical offset of the first `byte` at or after `from`.
    pub fn find_byte(&self, byte: u8, from: usize) -> Option<usize> {
        if from >= self.len() {
            return None;
        }

        if from < self.gap_start {
            if let Some(i) = self.data[from..self.gap_start].iter().position(|&b| b == byte) {
                return Some(from + i);
            }
        }

        let start = from.max(self.gap_start);
        self.data[start + self.gap_len()..]
            .iter()
            .position(|&b| b == byte)
            .map(|i| start + i)
    }

    /// Unchecked logical read for internal scanners that already bounds-checked.
    #[inline]
    pub(crate) fn byte_unchecked(&self, offset: usize) -> u8 {
        debug_assert!(offset < self.len());
        self.data[self.physical(offset)]
    }
}

impl Default for GapBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl From<&[u8]> for GapBuffer {
    fn from(bytes: &[u8]) -> Self {
        Self::from_bytes(bytes)
    }
}

impl From<Vec<u8>> for GapBuffer {
    fn from(bytes: Vec<u8>) -> Self {
        Self::from_bytes(&bytes)
    }
}

impl From<&str> for GapBuffer {
    fn from(text: &str) -> Self {
        Self::from_bytes(text.as_bytes())
    }
}

/// Buffers are equal when their logical content is, wherever their gaps sit.
impl PartialEq for GapBuffer {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.bytes().eq(other.bytes())
    }
}

impl Eq for GapBuffer {}

impl fmt::Display for GapBuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_string_lossy())
    }
}
