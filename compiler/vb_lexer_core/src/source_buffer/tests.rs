use super::*;

// === Construction ===

#[test]
fn empty_source_is_immediately_eof() {
    let buf = SourceBuffer::new("");
    assert_eq!(buf.source_len, 0);
    assert!(buf.cursor().is_eof());
    assert_eq!(buf.buf[0], 0);
}

#[test]
fn source_is_followed_by_sentinel() {
    let buf = SourceBuffer::new("a = b c;");
    assert_eq!(buf.source_len, 8);
    assert_eq!(&buf.buf[..8], b"a = b c;");
    let mut cursor = buf.cursor();
    cursor.advance_n(8);
    assert!(cursor.is_eof());
    assert_eq!(cursor.peek(), 0);
}

// === Cache-Line Alignment ===

#[test]
fn buffer_aligned_to_cache_line() {
    for len in [0, 1, 10, 63, 64, 65, 127, 128, 1000] {
        let source: String = "x".repeat(len);
        let buf = SourceBuffer::new(&source);
        assert_eq!(
            buf.buf.len() % CACHE_LINE,
            0,
            "buffer is not cache-line aligned for source length {len}"
        );
        assert!(buf.buf.len() > len);
    }
}

#[test]
fn sentinel_and_padding_are_zero() {
    let buf = SourceBuffer::new("abc");
    for &b in &buf.buf[3..] {
        assert_eq!(b, 0, "non-zero byte in sentinel/padding region");
    }
}

// === Byte Order Mark ===

#[test]
fn strip_bom_only_touches_leading_mark() {
    assert_eq!(strip_bom("\u{feff}x;"), "x;");
    assert_eq!(strip_bom("x;\u{feff}"), "x;\u{feff}");
    assert_eq!(strip_bom(""), "");
}
