use crate::SourceBuffer;
use pretty_assertions::assert_eq;

fn buffer(text: &str) -> SourceBuffer {
    SourceBuffer::from_bytes(text.as_bytes()).unwrap().0
}

// === Basic Navigation ===

#[test]
fn current_returns_first_byte() {
    let buf = buffer("abc");
    assert_eq!(buf.cursor_at(0).current(), b'a');
}

#[test]
fn bump_consumes_and_stops_at_sentinel() {
    let buf = buffer("hi");
    let mut cursor = buf.cursor_at(0);
    assert_eq!(cursor.bump(), b'h');
    assert_eq!(cursor.bump(), b'i');
    assert_eq!(cursor.bump(), 0);
    assert_eq!(cursor.bump(), 0);
    assert_eq!(cursor.pos(), 2);
}

#[test]
fn reads_past_the_used_region_are_zero() {
    let buf = buffer("xy");
    let mut cursor = buf.cursor_at(buf.len() + 100);
    assert_eq!(cursor.current(), 0);
    assert_eq!(cursor.bump(), 0);
}

#[test]
fn set_pos_rewinds() {
    let buf = buffer("[1#]");
    let mut cursor = buf.cursor_at(0);
    cursor.bump();
    let mark = cursor.pos();
    cursor.bump();
    cursor.bump();
    cursor.set_pos(mark);
    assert_eq!(cursor.current(), b'1');
}

#[test]
fn eat_while_and_slice() {
    let buf = buffer("1234x");
    let mut cursor = buf.cursor_at(0);
    cursor.eat_while(|b| b.is_ascii_digit());
    assert_eq!(cursor.slice_from(0), b"1234");
    assert_eq!(cursor.current(), b'x');
}

#[test]
fn count_while_does_not_move() {
    let buf = buffer("abcd1");
    let cursor = buf.cursor_at(1);
    assert_eq!(cursor.count_while(|b| b.is_ascii_alphabetic()), 3);
    assert_eq!(cursor.pos(), 1);
}

// === Balanced skipping ===

#[test]
fn skip_balanced_nested() {
    // Opener already consumed: cursor starts inside the outer parens.
    let buf = buffer("(a(b)c)5#");
    let mut cursor = buf.cursor_at(1);
    cursor.skip_balanced(Some(b'('), b')');
    assert_eq!(cursor.current(), b'5');
}

#[test]
fn skip_balanced_one_sided() {
    // Without an opener, the first closer ends the skip.
    let buf = buffer("a[b]c]d");
    let mut cursor = buf.cursor_at(0);
    cursor.skip_balanced(None, b']');
    assert_eq!(cursor.current(), b'c');
}

#[test]
fn skip_balanced_stops_at_sentinel() {
    let buf = buffer("{never closed");
    let mut cursor = buf.cursor_at(1);
    cursor.skip_balanced(Some(b'{'), b'}');
    assert!(cursor.is_eof());
    assert_eq!(cursor.pos(), 13);
}

#[test]
fn skip_balanced_does_not_cross_segments() {
    let (mut buf, first) = SourceBuffer::from_bytes(b"(open").unwrap();
    buf.append(b")after").unwrap();
    let mut cursor = buf.cursor_at(1);
    cursor.skip_balanced(Some(b'('), b')');
    assert_eq!(cursor.pos(), first.end());
}

// === Property tests ===

mod proptest_skip {
    use crate::SourceBuffer;
    use proptest::prelude::*;

    /// Reference implementation: byte loop with explicit depth counter.
    fn scalar_skip(bytes: &[u8], start: usize, open: u8, close: u8) -> usize {
        let mut depth = 1;
        let mut pos = start;
        while pos < bytes.len() && bytes[pos] != 0 {
            let b = bytes[pos];
            pos += 1;
            if b == open {
                depth += 1;
            } else if b == close {
                depth -= 1;
                if depth == 0 {
                    break;
                }
            }
        }
        pos
    }

    proptest! {
        #[test]
        fn skip_matches_scalar(
            bytes in proptest::collection::vec(
                prop_oneof![Just(b'['), Just(b']'), Just(b'a'), Just(b'?')],
                0..128,
            )
        ) {
            let (buf, seg) = SourceBuffer::from_bytes(&bytes).unwrap();
            let mut cursor = buf.cursor_at(seg.start());
            cursor.skip_balanced(Some(b'['), b']');
            let expected = scalar_skip(buf.as_bytes(), 0, b'[', b']');
            prop_assert_eq!(cursor.pos() as usize, expected);
        }
    }
}
