use super::*;
use pretty_assertions::assert_eq;

#[test]
fn push_top_pop() {
    let mut marks = MarkStack::new(4);
    marks.push(10).unwrap();
    marks.push(20).unwrap();
    assert_eq!(marks.depth(), 2);
    assert_eq!(marks.top(0), Ok(20));
    assert_eq!(marks.pop(0), Ok(20));
    assert_eq!(marks.top(0), Ok(10));
}

#[test]
fn top_does_not_pop() {
    let mut marks = MarkStack::new(4);
    marks.push(3).unwrap();
    assert_eq!(marks.top(0), Ok(3));
    assert_eq!(marks.top(0), Ok(3));
    assert_eq!(marks.depth(), 1);
}

#[test]
fn overflow_at_max_depth() {
    let mut marks = MarkStack::new(2);
    marks.push(1).unwrap();
    marks.push(2).unwrap();
    assert_eq!(marks.push(3), Err(EvalErrorKind::LoopOverflow { max: 2 }));
    assert_eq!(marks.depth(), 2);
}

#[test]
fn empty_stack_underflows() {
    let mut marks = MarkStack::new(4);
    assert_eq!(marks.top(0), Err(EvalErrorKind::LoopUnderflow));
    assert_eq!(marks.pop(0), Err(EvalErrorKind::LoopUnderflow));
}

#[test]
fn floor_hides_caller_marks() {
    let mut marks = MarkStack::new(8);
    marks.push(5).unwrap(); // caller's loop
    let floor = marks.depth();

    assert!(!marks.has_marks_above(floor));
    assert_eq!(marks.pop(floor), Err(EvalErrorKind::LoopUnderflow));

    marks.push(9).unwrap(); // callee's loop
    assert!(marks.has_marks_above(floor));
    assert_eq!(marks.pop(floor), Ok(9));
    assert_eq!(marks.depth(), 1);
}

#[test]
fn truncate_restores_entry_depth() {
    let mut marks = MarkStack::new(8);
    marks.push(1).unwrap();
    marks.push(2).unwrap();
    marks.push(3).unwrap();
    marks.truncate(1);
    assert_eq!(marks.depth(), 1);
    assert_eq!(marks.top(0), Ok(1));
}
