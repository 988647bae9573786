//! End-to-end evaluator tests, grouped by language area.
//!
//! Each test runs a small az program against a buffered output handler and
//! an in-memory input stream.


use crate::errors::{EvalError, EvalResult};
use crate::interpreter::{Interpreter, InterpreterBuilder};
use crate::io::InputStream;
use crate::print_handler::buffer_handler;

/// Interpreter with captured output and `input` as its default stream.
fn interpreter_with_input(input: &[u8]) -> Interpreter {
    InterpreterBuilder::new()
        .print_handler(buffer_handler())
        .input(InputStream::from_bytes(input))
        .build()
}

/// Run `source` and return its result together with everything it printed.
fn run(source: &str) -> (EvalResult, String) {
    let mut interpreter = interpreter_with_input(b"");
    let result = interpreter.eval(source.as_bytes());
    (result, interpreter.get_print_output())
}

/// Run `source`, which must succeed, and return its output.
fn output(source: &str) -> String {
    let (result, out) = run(source);
    if let Err(e) = result {
        panic!("`{source}` failed: {e}");
    }
    out
}

/// Run `source` and return its value.
fn value(source: &str) -> i32 {
    match run(source).0 {
        Ok(v) => v,
        Err(e) => panic!("`{source}` failed: {e}"),
    }
}

/// Run `source`, which must fail, and return the error.
fn error(source: &str) -> EvalError {
    match run(source).0 {
        Ok(v) => panic!("`{source}` returned {v}, expected an error"),
        Err(e) => e,
    }
}
