//! Script execution.

use std::path::Path;

use az_eval::{EvalConfig, Interpreter, InterpreterBuilder};

use super::{check_segment, read_file};
use crate::report;

/// Run a script file. Returns its final value as the exit code, or 1 on
/// error.
pub fn run_file(path: &Path, config: EvalConfig) -> i32 {
    let Some(content) = read_file(path) else {
        return 1;
    };
    run_source(&path.display().to_string(), &content, config)
}

/// Run source text given on the command line.
pub fn run_inline(code: &str, config: EvalConfig) -> i32 {
    run_source("<expr>", code.as_bytes(), config)
}

fn run_source(name: &str, text: &[u8], config: EvalConfig) -> i32 {
    let mut interpreter = InterpreterBuilder::new().config(config).build();
    match execute(&mut interpreter, text) {
        Ok(value) => {
            tracing::debug!(name, value, "script finished");
            value
        }
        Err(error) => {
            report::eval_error(interpreter.source(), name, &error);
            1
        }
    }
}

fn execute(interpreter: &mut Interpreter, text: &[u8]) -> az_eval::EvalResult {
    let segment = interpreter.load(text)?;
    check_segment(interpreter.source(), segment)?;
    interpreter.run(segment)
}
