//! Az Eval - evaluator for the az character-dispatch language.
//!
//! An az program is a byte string in which every byte is an instruction.
//! There is no parser: the evaluator walks the source with a cursor and
//! dispatches on each byte, so a function value is simply the source offset
//! of its body.
//!
//! # Architecture
//!
//! - [`Frame`]: growable register file; `a`-`z` are its first 26 cells
//! - [`NameTable`]: persistent multi-letter global cells
//! - [`MarkStack`]: loop re-entry offsets, partitioned per invocation
//! - [`IoBridge`]: current input stream (default or subprocess) and output
//! - [`Interpreter`]: owns the source buffer and runs segments of it
//!
//! # Registers
//!
//! Each invocation has two registers, Current and Previous, that point at
//! cells. A letter moves Current to a new cell and the old Current becomes
//! Previous; every other instruction reads or writes through them.

pub mod config;
pub mod errors;
mod frame;
mod interpreter;
mod io;
mod marks;
mod names;
pub mod operators;
mod print_handler;

/// The single value type: a 32-bit signed cell, read as a number, a boolean
/// (0 false, -1 canonical true) or the start of a little-endian byte string.
pub type Cell = i32;

pub use config::EvalConfig;
pub use errors::{ErrorCode, EvalError, EvalErrorKind, EvalResult};
pub use frame::{Frame, LETTERS};
pub use interpreter::{CellRef, EvalContext, Interpreter, InterpreterBuilder};
pub use io::{InputStream, IoBridge};
pub use marks::MarkStack;
pub use names::{NameId, NameTable};
pub use print_handler::{
    buffer_handler, silent_handler, stdout_handler, PrintHandlerImpl, SharedPrintHandler,
};

#[cfg(test)]
mod tests;
