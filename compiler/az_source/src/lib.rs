//! Source storage for the az interpreter.
//!
//! az programs are never tokenized: the evaluator walks the raw bytes and
//! uses byte offsets as its only notion of "program counter" and "function
//! pointer". This crate owns those bytes.
//!
//! - [`SourceBuffer`]: append-only storage. Every appended [`Segment`] is
//!   followed by a `0x00` sentinel, so walking off the end of a segment reads
//!   as end of input, and offsets handed out stay valid forever.
//! - [`Cursor`]: a `Copy` read position with letter-run scanning and the
//!   balanced-bracket skip used for comments, function bodies and loop
//!   breaks.

mod cursor;
mod source_buffer;

pub use cursor::Cursor;
pub use source_buffer::{EncodingIssue, EncodingIssueKind, Segment, SourceBuffer, SourceTooLarge};
