// Chunk: docs/chunks/cursor_editing - Cursor-relative editing API

//! Integration tests for realistic editing sequences.
//!
//! These verify that the gap buffer, the memoized line index, and the cursor
//! stay in sync through the kind of edits a command loop issues.

use pretty_assertions::assert_eq;
use tedit_buffer::{DirtyLines, Position, TextBuffer};

fn lines(buf: &TextBuffer) -> Vec<String> {
    (0..buf.line_count())
        .map(|line| String::from_utf8_lossy(&buf.line_content(line).unwrap()).into_owned())
        .collect()
}

/// Line table seen through the cursor API must match a fresh scan.
fn assert_lines_match_scan(buf: &TextBuffer) {
    let scanned: Vec<usize> = buf.buffer().line_start_offsets().collect();
    assert_eq!(buf.line_count(), scanned.len());
    for (line, start) in scanned.into_iter().enumerate() {
        assert_eq!(buf.buffer().line_to_byte(line).unwrap(), start);
    }
}

#[test]
fn test_type_word_then_delete_entirely() {
    let mut buf = TextBuffer::new();

    for ch in "hello".chars() {
        buf.insert_char(ch).unwrap();
    }
    assert_eq!(buf.content(), b"hello");
    assert_eq!(buf.cursor_position(), Position::new(0, 5));

    for _ in 0..5 {
        buf.delete_backward().unwrap();
    }
    assert!(buf.is_empty());
    assert_eq!(buf.cursor_position(), Position::new(0, 0));
}

#[test]
fn test_type_multiple_lines_and_navigate() {
    let mut buf = TextBuffer::new();

    buf.insert_str("first line").unwrap();
    buf.insert_newline().unwrap();
    buf.insert_str("second line").unwrap();
    buf.insert_newline().unwrap();
    buf.insert_str("third line").unwrap();

    assert_eq!(lines(&buf), vec!["first line", "second line", "third line"]);

    buf.set_cursor(Position::new(1, 7));
    buf.insert_str("awesome ").unwrap();
    assert_eq!(buf.line_content(1).unwrap(), b"second awesome line");

    buf.move_up();
    assert_eq!(buf.cursor_position().line, 0);
    buf.move_down();
    buf.move_down();
    assert_eq!(buf.cursor_position().line, 2);
    assert_lines_match_scan(&buf);
}

#[test]
fn test_split_and_rejoin_lines() {
    let mut buf = TextBuffer::from_str("helloworld");

    buf.set_cursor(Position::new(0, 5));
    assert_eq!(buf.insert_newline().unwrap(), DirtyLines::FromLineToEnd(0));
    assert_eq!(lines(&buf), vec!["hello", "world"]);

    assert_eq!(buf.delete_backward().unwrap(), DirtyLines::FromLineToEnd(0));
    assert_eq!(lines(&buf), vec!["helloworld"]);
    assert_eq!(buf.cursor_position(), Position::new(0, 5));
}

#[test]
fn test_paste_multiline_block_in_middle() {
    let mut buf = TextBuffer::from_str("top\nbottom");
    buf.set_cursor(Position::new(0, 3));

    let dirty = buf.insert_str("\nalpha\nbeta").unwrap();
    assert_eq!(dirty, DirtyLines::FromLineToEnd(0));
    assert_eq!(lines(&buf), vec!["top", "alpha", "beta", "bottom"]);
    assert_eq!(buf.cursor_position(), Position::new(2, 4));
    assert_lines_match_scan(&buf);
}

#[test]
fn test_delete_range_spanning_lines() {
    let mut buf = TextBuffer::from_str("one\ntwo\nthree\nfour");
    buf.move_to_buffer_end();

    // Remove "two\nthree\n".
    let dirty = buf.delete(4, 10).unwrap();
    assert_eq!(dirty, DirtyLines::FromLineToEnd(1));
    assert_eq!(lines(&buf), vec!["one", "four"]);
    assert_eq!(buf.cursor_position(), Position::new(1, 4));
    assert_lines_match_scan(&buf);
}

#[test]
fn test_multibyte_typing_and_backspace() {
    let mut buf = TextBuffer::new();
    buf.insert_str("naïve 世界 🦀").unwrap();
    assert_eq!(buf.buffer().codepoint_count(), 10);

    // Backspace removes 🦀, space, 界 as whole units.
    for _ in 0..3 {
        buf.delete_backward().unwrap();
    }
    assert_eq!(buf.content(), "naïve 世".as_bytes());

    buf.move_to_line_start();
    buf.move_right();
    buf.move_right();
    buf.move_right();
    assert_eq!(buf.cursor_offset(), 4); // after 'ï'
    buf.delete_backward().unwrap();
    assert_eq!(buf.content(), "nave 世".as_bytes());
}

#[test]
fn test_edits_far_apart_keep_content() {
    let mut buf = TextBuffer::from_str(&"x".repeat(1000));

    buf.set_cursor_offset(0).unwrap();
    buf.insert_str("<start>").unwrap();
    buf.move_to_buffer_end();
    buf.insert_str("<end>").unwrap();
    buf.set_cursor_offset(507).unwrap();
    buf.insert_str("<mid>").unwrap();

    let content = String::from_utf8(buf.content()).unwrap();
    assert!(content.starts_with("<start>xxx"));
    assert!(content.ends_with("xxx<end>"));
    assert_eq!(&content[507..512], "<mid>");
    assert_eq!(buf.len(), 1000 + 7 + 5 + 5);
}

#[test]
fn test_many_random_lines_stay_consistent() {
    let mut buf = TextBuffer::new();
    for i in 0..200 {
        buf.insert_str(&format!("line {i}")).unwrap();
        buf.insert_newline().unwrap();
        if i % 7 == 0 {
            buf.move_up();
            buf.move_to_line_end();
            buf.delete_forward().unwrap(); // join with the following empty line
            buf.move_to_buffer_end();
        }
    }
    assert_lines_match_scan(&buf);
}

#[test]
fn test_malformed_input_is_editable() {
    let mut buf = TextBuffer::new();
    buf.insert_bytes(&[b'a', 0xff, 0xe4, b'\n', b'b']).unwrap();
    assert_eq!(buf.line_count(), 2);

    // 0xe4 announces three bytes and swallows the '\n' when decoding.
    assert_eq!(buf.buffer().codepoint_count(), 3);

    buf.move_to_buffer_end();
    buf.delete_backward().unwrap();
    buf.delete_backward().unwrap();
    assert_eq!(buf.content(), vec![b'a', 0xff, 0xe4]);
    assert_eq!(buf.line_count(), 1);
}
