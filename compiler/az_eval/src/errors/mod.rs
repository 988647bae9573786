//! Evaluation errors.
//!
//! Every error is fatal: the evaluator stops at the first one and hands it
//! back to the caller with the offset of the byte that caused it. There is
//! no in-language recovery.
//!
//! Each [`EvalErrorKind`] maps to a stable [`ErrorCode`] so diagnostics can
//! be matched and documented without parsing message text.

use std::fmt;

use thiserror::Error;

use crate::Cell;

/// Result of evaluation.
pub type EvalResult<T = Cell> = Result<T, EvalError>;

/// Error codes for runtime diagnostics.
///
/// Format: E6### (runtime phase).
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum ErrorCode {
    /// Storage could not grow
    E6001,
    /// Loop nesting too deep
    E6002,
    /// `]` or break without an enclosing loop
    E6003,
    /// Subprocess could not be started
    E6004,
    /// Negative or unreachable index
    E6005,
    /// Unrecognized character
    E6006,
    /// Identifier too long
    E6007,
    /// Division by zero
    E6008,
    /// Modulo by zero
    E6009,
    /// Reading or writing a stream failed
    E6010,
}

impl ErrorCode {
    /// Get the string representation of this error code.
    pub fn as_str(self) -> &'static str {
        match self {
            ErrorCode::E6001 => "E6001",
            ErrorCode::E6002 => "E6002",
            ErrorCode::E6003 => "E6003",
            ErrorCode::E6004 => "E6004",
            ErrorCode::E6005 => "E6005",
            ErrorCode::E6006 => "E6006",
            ErrorCode::E6007 => "E6007",
            ErrorCode::E6008 => "E6008",
            ErrorCode::E6009 => "E6009",
            ErrorCode::E6010 => "E6010",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Typed error category.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum EvalErrorKind {
    #[error("out of memory: cannot grow storage to {requested} cells (limit {limit})")]
    OutOfMemory { requested: usize, limit: usize },

    #[error("loop nesting exceeds {max} marks")]
    LoopOverflow { max: usize },

    #[error("no enclosing loop in this function")]
    LoopUnderflow,

    #[error("cannot launch subprocess `{command}`: {reason}")]
    SubprocessLaunch { command: String, reason: String },

    #[error("index {index} is out of bounds")]
    IndexOutOfBounds { index: i64 },

    #[error("unexpected character {}", describe_byte(*byte))]
    UnexpectedCharacter { byte: u8 },

    #[error("identifier is {len} bytes long, max is {max}")]
    IdentifierTooLong { len: usize, max: usize },

    #[error("division by zero")]
    DivisionByZero,

    #[error("modulo by zero")]
    ModuloByZero,

    #[error("{stream} failed: {reason}")]
    Io { stream: &'static str, reason: String },
}

impl EvalErrorKind {
    /// Stable error code for this kind.
    pub fn code(&self) -> ErrorCode {
        match self {
            EvalErrorKind::OutOfMemory { .. } => ErrorCode::E6001,
            EvalErrorKind::LoopOverflow { .. } => ErrorCode::E6002,
            EvalErrorKind::LoopUnderflow => ErrorCode::E6003,
            EvalErrorKind::SubprocessLaunch { .. } => ErrorCode::E6004,
            EvalErrorKind::IndexOutOfBounds { .. } => ErrorCode::E6005,
            EvalErrorKind::UnexpectedCharacter { .. } => ErrorCode::E6006,
            EvalErrorKind::IdentifierTooLong { .. } => ErrorCode::E6007,
            EvalErrorKind::DivisionByZero => ErrorCode::E6008,
            EvalErrorKind::ModuloByZero => ErrorCode::E6009,
            EvalErrorKind::Io { .. } => ErrorCode::E6010,
        }
    }

    /// Attach the source offset where the error was raised.
    #[inline]
    pub fn at(self, offset: u32) -> EvalError {
        EvalError { kind: self, offset }
    }
}

/// Evaluation error with its source location.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("{kind}")]
pub struct EvalError {
    /// Structured error category.
    pub kind: EvalErrorKind,
    /// Absolute offset in the source buffer of the offending byte.
    pub offset: u32,
}

impl EvalError {
    /// Stable error code.
    pub fn code(&self) -> ErrorCode {
        self.kind.code()
    }
}

/// Render a byte for a diagnostic: printable ASCII quoted, anything else
/// as a hex escape.
fn describe_byte(byte: u8) -> String {
    if byte.is_ascii_graphic() {
        format!("`{}`", char::from(byte))
    } else {
        format!("`\\x{byte:02x}`")
    }
}
