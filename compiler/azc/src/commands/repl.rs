//! Interactive prompt.

use std::io::{self, BufRead, Write};

use az_eval::{EvalConfig, InterpreterBuilder};

use super::check_segment;
use crate::report;

const PROMPT: &str = "> ";

/// Read lines from stdin until end of input, evaluating each one and
/// printing its value.
///
/// Registers, named cells and functions defined on earlier lines stay
/// available. An error abandons its line only.
pub fn run_repl(config: EvalConfig) -> i32 {
    let mut interpreter = InterpreterBuilder::new().config(config).build();
    let mut line = Vec::new();

    loop {
        print!("{PROMPT}");
        let _ = io::stdout().flush();

        line.clear();
        match io::stdin().lock().read_until(b'\n', &mut line) {
            Ok(0) => break,
            Ok(_) => {}
            Err(e) => {
                eprintln!("error reading input: {e}");
                return 1;
            }
        }

        let result = interpreter
            .load(&line)
            .and_then(|segment| {
                check_segment(interpreter.source(), segment)?;
                interpreter.run(segment)
            });
        match result {
            Ok(value) => println!("{value}"),
            Err(error) => report::eval_error(interpreter.source(), "<repl>", &error),
        }
    }
    0
}
