// Chunk: docs/chunks/position_index - Codepoint and line translation

/// Position in the buffer as (line, column), both 0-indexed.
///
/// `col` counts bytes from the start of the line, not codepoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Position {
    pub line: usize,
    pub col: usize,
}

impl Position {
    pub fn new(line: usize, col: usize) -> Self {
        Self { line, col }
    }
}

/// Which lines a mutation touched.
///
/// The editor shell uses this to limit redraws.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DirtyLines {
    /// Nothing changed (e.g. backspace at the start of the document).
    None,
    /// Only this line changed.
    Single(usize),
    /// A line break was added or removed, so every line from here on moved.
    FromLineToEnd(usize),
}

impl DirtyLines {
    /// Classifies an edit at `line` that inserted or removed `bytes`.
    pub(crate) fn for_edit(line: usize, bytes: &[u8]) -> Self {
        if bytes.is_empty() {
            DirtyLines::None
        } else if bytes.contains(&b'\n') {
            DirtyLines::FromLineToEnd(line)
        } else {
            DirtyLines::Single(line)
        }
    }

    /// Returns true if no lines were dirtied.
    pub fn is_none(&self) -> bool {
        matches!(self, DirtyLines::None)
    }

    /// Returns the first dirty line, if any.
    pub fn start_line(&self) -> Option<usize> {
        match self {
            DirtyLines::None => None,
            DirtyLines::Single(line) | DirtyLines::FromLineToEnd(line) => Some(*line),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_position_ordering() {
        assert!(Position::new(0, 9) < Position::new(1, 0));
        assert!(Position::new(2, 1) < Position::new(2, 3));
        assert_eq!(Position::new(1, 1), Position::new(1, 1));
    }

    #[test]
    fn test_for_edit() {
        assert_eq!(DirtyLines::for_edit(3, b""), DirtyLines::None);
        assert_eq!(DirtyLines::for_edit(3, b"abc"), DirtyLines::Single(3));
        assert_eq!(DirtyLines::for_edit(3, b"a\nb"), DirtyLines::FromLineToEnd(3));
    }

    #[test]
    fn test_start_line() {
        assert!(DirtyLines::None.is_none());
        assert_eq!(DirtyLines::None.start_line(), None);
        assert_eq!(DirtyLines::Single(4).start_line(), Some(4));
        assert_eq!(DirtyLines::FromLineToEnd(2).start_line(), Some(2));
    }
}
