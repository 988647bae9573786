//! `InterpreterBuilder` for creating Interpreter instances with various
//! configurations.

use az_source::SourceBuffer;

use super::{EvalContext, Interpreter};
use crate::config::EvalConfig;
use crate::frame::Frame;
use crate::io::{InputStream, IoBridge};
use crate::print_handler::{stdout_handler, SharedPrintHandler};

/// Builder for creating Interpreter instances.
///
/// Defaults: stdin as the default input stream, stdout for output,
/// [`EvalConfig::default()`] limits.
pub struct InterpreterBuilder {
    config: EvalConfig,
    print_handler: Option<SharedPrintHandler>,
    input: Option<InputStream>,
}

impl InterpreterBuilder {
    /// Create a new builder with default settings.
    pub fn new() -> Self {
        InterpreterBuilder {
            config: EvalConfig::default(),
            print_handler: None,
            input: None,
        }
    }

    /// Set interpreter limits and shell.
    #[must_use]
    pub fn config(mut self, config: EvalConfig) -> Self {
        self.config = config;
        self
    }

    /// Set the handler `.` and `#` write through.
    #[must_use]
    pub fn print_handler(mut self, handler: SharedPrintHandler) -> Self {
        self.print_handler = Some(handler);
        self
    }

    /// Set the default input stream `,` reads from.
    #[must_use]
    pub fn input(mut self, input: InputStream) -> Self {
        self.input = Some(input);
        self
    }

    /// Build the interpreter with an empty source buffer and an all-zero
    /// global register file.
    pub fn build(self) -> Interpreter {
        let io = IoBridge::new(
            self.input.unwrap_or(InputStream::Stdin),
            self.print_handler.unwrap_or_else(stdout_handler),
            self.config.shell.clone(),
        );
        Interpreter {
            source: SourceBuffer::new(),
            globals: Frame::new(),
            ctx: EvalContext::new(self.config, io),
        }
    }
}

impl Default for InterpreterBuilder {
    fn default() -> Self {
        Self::new()
    }
}
