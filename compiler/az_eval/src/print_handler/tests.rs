use super::*;
use pretty_assertions::assert_eq;

#[test]
fn buffer_accumulates_writes() {
    let handler = buffer_handler();
    handler.write(b"8").unwrap();
    handler.write(b"hi").unwrap();
    assert_eq!(handler.get_output(), b"8hi");
    assert_eq!(handler.get_output_string(), "8hi");
}

#[test]
fn buffer_keeps_non_utf8() {
    let handler = buffer_handler();
    handler.write(&[0xff, b'a']).unwrap();
    assert_eq!(handler.get_output(), vec![0xff, b'a']);
    assert_eq!(handler.get_output_string(), "\u{fffd}a");
}

#[test]
fn clear_empties_buffer() {
    let handler = buffer_handler();
    handler.write(b"first").unwrap();
    handler.clear();
    handler.write(b"second").unwrap();
    assert_eq!(handler.get_output_string(), "second");
}

#[test]
fn silent_discards() {
    let handler = silent_handler();
    handler.write(b"gone").unwrap();
    assert!(handler.get_output().is_empty());
}

#[test]
fn stdout_captures_nothing() {
    let handler = stdout_handler();
    handler.clear();
    assert!(handler.get_output().is_empty());
    assert_eq!(handler.get_output_string(), "");
}

#[test]
fn shared_handle_sees_interpreter_writes() {
    let handler = buffer_handler();
    let writer = Arc::clone(&handler);
    writer.write(b"42").unwrap();
    assert_eq!(handler.get_output_string(), "42");
}
