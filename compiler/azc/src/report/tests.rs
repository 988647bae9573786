use super::*;
use az_eval::EvalErrorKind;

#[test]
fn report_names_code_message_and_source() {
    let mut source = SourceBuffer::new();
    let segment = source.append(b"a5~").unwrap();
    let error = EvalErrorKind::UnexpectedCharacter { byte: b'~' }.at(segment.start() + 2);

    let rendered = render_eval_error(&source, "demo.az", &error, false);
    assert!(rendered.contains("E6006"), "{rendered}");
    assert!(rendered.contains("unexpected character `~`"), "{rendered}");
    assert!(rendered.contains("demo.az"), "{rendered}");
    assert!(rendered.contains("a5~"), "{rendered}");
}

#[test]
fn report_uses_the_segment_of_the_error() {
    let mut source = SourceBuffer::new();
    source.append(b"first line").unwrap();
    let second = source.append(b"x/").unwrap();
    let error = EvalErrorKind::DivisionByZero.at(second.start() + 1);

    let rendered = render_eval_error(&source, "<repl>", &error, false);
    assert!(rendered.contains("E6008"), "{rendered}");
    assert!(rendered.contains("x/"), "{rendered}");
    assert!(!rendered.contains("first line"), "{rendered}");
}

#[test]
fn error_on_empty_segment_still_renders() {
    let mut source = SourceBuffer::new();
    let segment = source.append(b"").unwrap();
    let error = EvalErrorKind::LoopUnderflow.at(segment.start());

    let rendered = render_eval_error(&source, "<expr>", &error, false);
    assert!(rendered.contains("E6003"), "{rendered}");
}

#[test]
fn offset_outside_buffer_falls_back_to_one_line() {
    let source = SourceBuffer::new();
    let error = EvalErrorKind::DivisionByZero.at(40);

    let rendered = render_eval_error(&source, "<expr>", &error, false);
    assert_eq!(rendered, "error[E6008]: division by zero\n");
}
