use crate::SourceBuffer;

// === Navigation ===

#[test]
fn current_peek_and_advance() {
    let buf = SourceBuffer::new("ab");
    let mut cursor = buf.cursor();
    assert_eq!(cursor.current(), b'a');
    assert_eq!(cursor.peek(), b'b');
    cursor.advance();
    assert_eq!(cursor.current(), b'b');
    assert_eq!(cursor.peek(), 0);
    cursor.advance();
    assert!(cursor.is_eof());
}

#[test]
fn interior_null_is_not_eof() {
    let buf = SourceBuffer::new("a\0b");
    let mut cursor = buf.cursor();
    cursor.advance();
    assert_eq!(cursor.current(), 0);
    assert!(!cursor.is_eof());
}

#[test]
fn copy_snapshots_are_independent() {
    let buf = SourceBuffer::new("abc");
    let mut cursor = buf.cursor();
    let snapshot = cursor;
    cursor.advance_n(2);
    assert_eq!(snapshot.pos(), 0);
    assert_eq!(cursor.pos(), 2);
}

// === Multibyte ===

#[test]
fn advance_char_steps_over_multibyte() {
    let buf = SourceBuffer::new("\u{e9}x");
    let mut cursor = buf.cursor();
    cursor.advance_char();
    assert_eq!(cursor.pos(), 2);
    assert_eq!(cursor.current(), b'x');
}

#[test]
fn eat_while_stops_at_first_rejected_byte() {
    let buf = SourceBuffer::new("a1[3..0]");
    let mut cursor = buf.cursor();
    cursor.eat_while(|b| b.is_ascii_alphanumeric());
    assert_eq!(cursor.pos(), 2);
    assert_eq!(cursor.current(), b'[');
}

// === Whitespace ===

#[test]
fn eat_whitespace_stops_before_crlf() {
    let buf = SourceBuffer::new(" \t\r\nx");
    let mut cursor = buf.cursor();
    cursor.eat_whitespace();
    assert_eq!(cursor.pos(), 2);
    assert_eq!(cursor.current(), b'\r');
}

#[test]
fn eat_whitespace_takes_lone_cr() {
    let buf = SourceBuffer::new(" \r x");
    let mut cursor = buf.cursor();
    cursor.eat_whitespace();
    assert_eq!(cursor.current(), b'x');
}

// === Statement delimiters ===

#[test]
fn skip_to_statement_delim_finds_each_kind() {
    let buf = SourceBuffer::new("a = b;\n\"x\"");
    let mut cursor = buf.cursor();
    assert_eq!(cursor.skip_to_statement_delim(), b';');
    assert_eq!(cursor.pos(), 5);
    cursor.advance();
    assert_eq!(cursor.skip_to_statement_delim(), b'\n');
    cursor.advance();
    assert_eq!(cursor.skip_to_statement_delim(), b'"');
    cursor.advance();
    assert_eq!(cursor.skip_to_statement_delim(), b'"');
    cursor.advance();
    assert_eq!(cursor.skip_to_statement_delim(), 0);
    assert!(cursor.is_eof());
}
