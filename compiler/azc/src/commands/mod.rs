//! CLI command implementations.
//!
//! Each command takes an [`EvalConfig`] and returns the process exit code.

mod repl;
mod run;

pub use repl::run_repl;
pub use run::{run_file, run_inline};

use std::path::Path;

use az_eval::{EvalError, EvalErrorKind};
use az_source::{Segment, SourceBuffer};

/// Read a script file as raw bytes.
///
/// Prints a message and returns `None` when the file cannot be read.
pub(super) fn read_file(path: &Path) -> Option<Vec<u8>> {
    match std::fs::read(path) {
        Ok(content) => Some(content),
        Err(e) => {
            let path = path.display();
            let msg = match e.kind() {
                std::io::ErrorKind::NotFound => format!("cannot find file '{path}'"),
                std::io::ErrorKind::PermissionDenied => {
                    format!("permission denied reading '{path}'")
                }
                _ => format!("error reading '{path}': {e}"),
            };
            eprintln!("{msg}");
            None
        }
    }
}

/// Reject a segment holding a NUL byte, which would end it early.
pub(super) fn check_segment(source: &SourceBuffer, segment: Segment) -> Result<(), EvalError> {
    match source.issues_in(segment).next() {
        Some(issue) => Err(EvalErrorKind::UnexpectedCharacter { byte: 0 }.at(issue.pos)),
        None => Ok(()),
    }
}
