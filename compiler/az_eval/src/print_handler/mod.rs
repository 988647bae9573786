//! Output sink for `.` and `#`.
//!
//! The CLI writes straight to stdout; tests capture into a buffer so they
//! can assert on exactly the bytes a program produced. Output is raw bytes:
//! a string cell may hold anything, not just UTF-8.
//!
//! Enum dispatch keeps the per-byte-string write a plain `match`.

use std::io::{self, Write};
use std::sync::Arc;

use parking_lot::Mutex;

/// Where program output goes.
pub enum PrintHandlerImpl {
    /// Process stdout, flushed after every write so output interleaves
    /// correctly with subprocesses and the REPL prompt.
    Stdout,
    /// In-memory capture.
    Buffer(Mutex<Vec<u8>>),
    /// Discard everything.
    Silent,
}

impl PrintHandlerImpl {
    /// Write `bytes` and flush.
    pub fn write(&self, bytes: &[u8]) -> io::Result<()> {
        match self {
            Self::Stdout => {
                let mut out = io::stdout().lock();
                out.write_all(bytes)?;
                out.flush()
            }
            Self::Buffer(buffer) => {
                buffer.lock().extend_from_slice(bytes);
                Ok(())
            }
            Self::Silent => Ok(()),
        }
    }

    /// Captured bytes. Empty unless this is a buffer.
    pub fn get_output(&self) -> Vec<u8> {
        match self {
            Self::Buffer(buffer) => buffer.lock().clone(),
            Self::Stdout | Self::Silent => Vec::new(),
        }
    }

    /// Captured output decoded lossily as UTF-8.
    pub fn get_output_string(&self) -> String {
        match self {
            Self::Buffer(buffer) => String::from_utf8_lossy(&buffer.lock()).into_owned(),
            Self::Stdout | Self::Silent => String::new(),
        }
    }

    /// Drop captured output.
    pub fn clear(&self) {
        if let Self::Buffer(buffer) = self {
            buffer.lock().clear();
        }
    }
}

/// Print handler shared between an interpreter and whoever reads its
/// output.
pub type SharedPrintHandler = Arc<PrintHandlerImpl>;

/// Handler writing to stdout.
pub fn stdout_handler() -> SharedPrintHandler {
    Arc::new(PrintHandlerImpl::Stdout)
}

/// Handler capturing into memory.
pub fn buffer_handler() -> SharedPrintHandler {
    Arc::new(PrintHandlerImpl::Buffer(Mutex::new(Vec::new())))
}

/// Handler discarding all output.
pub fn silent_handler() -> SharedPrintHandler {
    Arc::new(PrintHandlerImpl::Silent)
}

#[cfg(test)]
mod tests;
