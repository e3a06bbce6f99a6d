use std::io::Write;

use crate::cursor::{AHEAD, Cursor, CursorStatus};

#[test]
fn string_basics() {
    let mut cursor = Cursor::from_string("abc");
    assert_eq!(cursor.status(), CursorStatus::Init);
    assert_eq!(cursor.offset(), 0);
    assert_eq!(cursor.lines(), 0);
    assert_eq!(cursor.available(), 3);
    assert_eq!(cursor.remaining(), 3);
    assert!(cursor.has_more());
    assert_eq!(cursor.window(), b"abc");
}

#[test]
fn empty_string_has_no_more() {
    let mut cursor = Cursor::from_string("");
    assert!(!cursor.has_more());
    assert_eq!(cursor.remaining(), 0);
}

#[test]
fn forward_move_counts_lines() {
    let mut cursor = Cursor::from_string("a\nb\nc");
    assert!(cursor.move_by(3));
    assert_eq!(cursor.offset(), 3);
    assert_eq!(cursor.lines(), 1);
    assert!(cursor.move_by(2));
    assert_eq!(cursor.offset(), 5);
    assert_eq!(cursor.lines(), 2);
    assert!(!cursor.has_more());
}

#[test]
fn zero_move_is_a_no_op() {
    let mut cursor = Cursor::from_string("abc");
    assert!(cursor.move_by(0));
    assert_eq!(cursor.offset(), 0);
    assert_eq!(cursor.status(), CursorStatus::Init);
}

#[test]
fn move_past_end_sets_ended_but_stays_valid() {
    let mut cursor = Cursor::from_string("abc");
    assert!(!cursor.move_by(5));
    assert_eq!(cursor.offset(), 3);
    assert_eq!(cursor.status(), CursorStatus::Ended);
    assert!(!cursor.move_by(1));
    assert_eq!(cursor.byte_at(1), Some(b'b'));
    assert_eq!(cursor.remaining(), 0);
}

#[test]
fn rewind_is_clamped_at_start() {
    let mut cursor = Cursor::from_string("abc");
    cursor.move_by(2);
    assert!(cursor.move_by(-5));
    assert_eq!(cursor.offset(), 0);
}

#[test]
fn backtrack_restores_offset_and_lines() {
    let mut cursor = Cursor::from_string("a\nb\nc");
    cursor.move_by(2);
    let offset = cursor.offset();
    let lines = cursor.lines();
    cursor.move_by(3);
    assert_eq!(cursor.lines(), 2);
    cursor.backtrack(offset, lines);
    assert_eq!(cursor.offset(), 2);
    assert_eq!(cursor.lines(), 1);
}

#[test]
fn move_to_is_absolute() {
    let mut cursor = Cursor::from_string("abcdef");
    assert!(cursor.move_to(4));
    assert_eq!(cursor.offset(), 4);
    assert!(cursor.move_to(1));
    assert_eq!(cursor.offset(), 1);
}

#[test]
fn byte_at_peeks_within_window() {
    let cursor = Cursor::from_string("abc");
    assert_eq!(cursor.byte_at(0), Some(b'a'));
    assert_eq!(cursor.byte_at(2), Some(b'c'));
    assert_eq!(cursor.byte_at(3), None);
}

#[test]
fn custom_separator_is_counted() {
    let mut cursor = Cursor::from_string("a;b;c");
    cursor.set_separator(b';');
    cursor.move_by(5);
    assert_eq!(cursor.lines(), 2);
}

#[test]
fn file_input_preloads_across_window_boundaries() {
    let mut content = Vec::new();
    while content.len() < AHEAD * 2 + 17 {
        content.extend_from_slice(b"0123456789abcdef\n");
    }
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(&content).unwrap();

    let mut cursor = Cursor::open(file.path()).unwrap();
    assert!(cursor.available() >= AHEAD);
    assert!(cursor.has_more());

    assert!(!cursor.move_by(content.len() as isize + 1));
    assert_eq!(cursor.offset(), content.len());
    assert_eq!(cursor.remaining(), 0);
    let expected_lines = content.iter().filter(|&&b| b == b'\n').count();
    assert_eq!(cursor.lines(), expected_lines);
}

#[test]
fn file_input_supports_backtrack_within_window() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(b"hello\nworld\n").unwrap();

    let mut cursor = Cursor::open(file.path()).unwrap();
    cursor.move_by(8);
    assert_eq!(cursor.lines(), 1);
    cursor.backtrack(0, 0);
    assert_eq!(cursor.offset(), 0);
    assert_eq!(cursor.window(), b"hello\nworld\n");
}

#[test]
fn missing_file_is_an_error() {
    assert!(Cursor::open("/nonexistent/pegrun-input").is_err());
}
