//! The az interpreter.
//!
//! # Architecture
//!
//! ```text
//! Interpreter
//!   ├── SourceBuffer      append-only program text; offsets are code pointers
//!   ├── globals: Frame    top-level register file, persists across runs
//!   └── EvalContext       shared by every invocation
//!         ├── NameTable   multi-letter global cells
//!         ├── MarkStack   loop re-entry offsets
//!         └── IoBridge    current input stream + output sink
//! ```
//!
//! Each run or call creates an `Invocation`: a cursor into the source, a
//! local frame, an optional borrowed outer frame, and the Current/Previous
//! registers. A `;` call re-enters with a fresh local frame and the caller's
//! local frame as its outer frame, so uppercase letters reach exactly one
//! level up the dynamic call chain.

mod builder;
mod invocation;

use az_source::{Segment, SourceBuffer};

use crate::config::EvalConfig;
use crate::errors::{EvalErrorKind, EvalResult};
use crate::frame::Frame;
use crate::io::IoBridge;
use crate::marks::MarkStack;
use crate::names::{NameId, NameTable};
use crate::print_handler::SharedPrintHandler;
use crate::Cell;

pub use builder::InterpreterBuilder;

/// Where a register points.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum CellRef {
    /// Local frame cell (`a`-`z`, or any index via `@`).
    Local(usize),
    /// Outer frame cell (`A`-`Z`). At top level, the local frame.
    Outer(usize),
    /// Named global cell.
    Global(NameId),
}

/// State shared by every invocation of one interpreter.
pub struct EvalContext {
    pub(crate) names: NameTable,
    pub(crate) marks: MarkStack,
    pub(crate) io: IoBridge,
    pub(crate) config: EvalConfig,
}

impl EvalContext {
    pub(crate) fn new(config: EvalConfig, io: IoBridge) -> Self {
        EvalContext {
            names: NameTable::new(config.max_ident_len),
            marks: MarkStack::new(config.max_loop_depth),
            io,
            config,
        }
    }
}

/// A complete az interpreter: source, global register file and shared
/// state.
///
/// Independent interpreters share nothing, so tests can run them in
/// parallel.
pub struct Interpreter {
    source: SourceBuffer,
    globals: Frame,
    ctx: EvalContext,
}

impl Interpreter {
    /// Interpreter reading stdin and writing stdout with default limits.
    pub fn new() -> Self {
        InterpreterBuilder::new().build()
    }

    /// Append `text` to the source buffer and run it at top level.
    pub fn eval(&mut self, text: &[u8]) -> EvalResult {
        let segment = self.load(text)?;
        self.run(segment)
    }

    /// Append `text` to the source buffer without running it.
    pub fn load(&mut self, text: &[u8]) -> EvalResult<Segment> {
        self.source.append(text).map_err(|e| {
            EvalErrorKind::OutOfMemory {
                requested: e.requested,
                limit: i32::MAX as usize,
            }
            .at(self.source.len())
        })
    }

    /// Run a loaded segment at top level.
    ///
    /// The global register file is both the local and the outer frame, so
    /// `a` and `A` name the same cell here. Any subprocess still open when
    /// the run ends is closed.
    pub fn run(&mut self, segment: Segment) -> EvalResult {
        let result = invocation::evaluate(
            &self.source,
            &mut self.ctx,
            &mut self.globals,
            None,
            segment.start(),
        );
        self.ctx.io.close_subprocess();
        result
    }

    /// The source buffer.
    pub fn source(&self) -> &SourceBuffer {
        &self.source
    }

    /// The top-level register file.
    pub fn globals(&self) -> &Frame {
        &self.globals
    }

    /// Value of a top-level letter register.
    pub fn register(&self, letter: u8) -> Option<Cell> {
        letter
            .is_ascii_alphabetic()
            .then(|| self.globals.get(usize::from(letter.to_ascii_lowercase() - b'a')))
    }

    /// Value of a named global cell, if it has been referenced.
    pub fn named(&self, ident: &str) -> Option<Cell> {
        self.ctx
            .names
            .get(ident.as_bytes())
            .map(|id| self.ctx.names.value(id))
    }

    /// NUL-terminated bytes stored at a named global cell.
    pub fn named_bytes(&self, ident: &str) -> Option<Vec<u8>> {
        self.ctx
            .names
            .get(ident.as_bytes())
            .map(|id| self.ctx.names.strip(id).read_cstr(0))
    }

    /// Current loop-mark depth. Zero between top-level runs.
    pub fn loop_depth(&self) -> usize {
        self.ctx.marks.depth()
    }

    /// The output handler.
    pub fn print_handler(&self) -> &SharedPrintHandler {
        self.ctx.io.output()
    }

    /// Get all captured output (empty for stdout).
    pub fn get_print_output(&self) -> String {
        self.ctx.io.output().get_output_string()
    }

    /// Clear captured output.
    pub fn clear_print_output(&self) {
        self.ctx.io.output().clear();
    }
}

impl Default for Interpreter {
    fn default() -> Self {
        Self::new()
    }
}
