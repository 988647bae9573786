//! I/O bridge between the evaluator and the outside world.
//!
//! There is exactly one current input stream. It starts as the default
//! stream (stdin for the CLI, an in-memory buffer in tests) and is replaced
//! by a subprocess's stdout when `$` runs a shell command. At most one
//! subprocess is open at a time: opening a new one closes the old one, and
//! reaching end of its output closes it and falls back to the default.
//!
//! Output goes through a [`SharedPrintHandler`].

use std::io::{self, BufReader, Read};
use std::process::{Child, ChildStdout, Command, Stdio};

use crate::errors::EvalErrorKind;
use crate::print_handler::SharedPrintHandler;

/// The stream `,` reads from when no subprocess is open.
pub enum InputStream {
    /// Process standard input.
    Stdin,
    /// Fixed bytes, for tests and embedding.
    Bytes(io::Cursor<Vec<u8>>),
}

impl InputStream {
    /// Input from in-memory bytes.
    pub fn from_bytes(bytes: impl Into<Vec<u8>>) -> Self {
        InputStream::Bytes(io::Cursor::new(bytes.into()))
    }

    fn read_byte(&mut self) -> io::Result<Option<u8>> {
        match self {
            InputStream::Stdin => read_one(&mut io::stdin().lock()),
            InputStream::Bytes(cursor) => read_one(cursor),
        }
    }
}

/// A running shell command whose stdout is being read.
struct Subprocess {
    command: String,
    child: Child,
    stdout: BufReader<ChildStdout>,
}

impl Subprocess {
    fn spawn(shell: &str, command: String) -> Result<Self, EvalErrorKind> {
        let launch_error = |reason: String| EvalErrorKind::SubprocessLaunch {
            command: command.clone(),
            reason,
        };

        let mut child = Command::new(shell)
            .arg("-c")
            .arg(&command)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .spawn()
            .map_err(|e| launch_error(e.to_string()))?;
        let Some(stdout) = child.stdout.take() else {
            // Reap the child rather than leave a zombie behind.
            let _ = child.kill();
            let _ = child.wait();
            return Err(launch_error("stdout was not captured".to_string()));
        };

        tracing::debug!(%command, pid = child.id(), "subprocess opened");
        Ok(Subprocess {
            command,
            child,
            stdout: BufReader::new(stdout),
        })
    }

    /// Close the pipe and wait for the child to exit.
    fn close(self) {
        let Subprocess {
            command,
            mut child,
            stdout,
        } = self;
        // Dropping the read end first lets a child still writing exit on
        // SIGPIPE instead of blocking forever.
        drop(stdout);
        match child.wait() {
            Ok(status) => tracing::debug!(%command, %status, "subprocess closed"),
            Err(e) => tracing::warn!(%command, "failed to wait for subprocess: {e}"),
        }
    }
}

/// Current input stream plus output sink.
pub struct IoBridge {
    default: InputStream,
    subprocess: Option<Subprocess>,
    output: SharedPrintHandler,
    shell: String,
}

impl IoBridge {
    /// Create a bridge reading from `default`, writing to `output`, and
    /// running commands with `shell -c`.
    pub fn new(default: InputStream, output: SharedPrintHandler, shell: impl Into<String>) -> Self {
        IoBridge {
            default,
            subprocess: None,
            output,
            shell: shell.into(),
        }
    }

    /// The output sink.
    pub fn output(&self) -> &SharedPrintHandler {
        &self.output
    }

    /// Returns `true` while a subprocess is the current input stream.
    #[cfg(test)]
    pub(crate) fn has_subprocess(&self) -> bool {
        self.subprocess.is_some()
    }

    /// Run `command` through the shell and make its stdout the current
    /// input stream, closing any previous subprocess first.
    pub fn open_subprocess(&mut self, command: &[u8]) -> Result<(), EvalErrorKind> {
        self.close_subprocess();
        let command = String::from_utf8_lossy(command).into_owned();
        self.subprocess = Some(Subprocess::spawn(&self.shell, command)?);
        Ok(())
    }

    /// Close the current subprocess, if any, reverting to the default
    /// stream.
    pub fn close_subprocess(&mut self) {
        if let Some(subprocess) = self.subprocess.take() {
            subprocess.close();
        }
    }

    /// Read one byte from the current input stream.
    ///
    /// `None` means end of stream; the current stream has then been reset
    /// to the default.
    pub fn read_byte(&mut self) -> Result<Option<u8>, EvalErrorKind> {
        let Some(subprocess) = self.subprocess.as_mut() else {
            return self.default.read_byte().map_err(|e| io_error("input", &e));
        };
        match read_one(&mut subprocess.stdout) {
            Ok(Some(byte)) => Ok(Some(byte)),
            Ok(None) => {
                self.close_subprocess();
                Ok(None)
            }
            Err(e) => {
                self.close_subprocess();
                Err(io_error("subprocess output", &e))
            }
        }
    }

    /// Write bytes to the output sink.
    pub fn write(&self, bytes: &[u8]) -> Result<(), EvalErrorKind> {
        self.output.write(bytes).map_err(|e| io_error("output", &e))
    }
}

impl Drop for IoBridge {
    fn drop(&mut self) {
        self.close_subprocess();
    }
}

/// Read one byte, retrying on `Interrupted`. `None` at end of stream.
fn read_one(reader: &mut impl Read) -> io::Result<Option<u8>> {
    let mut byte = [0u8; 1];
    loop {
        match reader.read(&mut byte) {
            Ok(0) => return Ok(None),
            Ok(_) => return Ok(Some(byte[0])),
            Err(e) if e.kind() == io::ErrorKind::Interrupted => {}
            Err(e) => return Err(e),
        }
    }
}

fn io_error(stream: &'static str, error: &io::Error) -> EvalErrorKind {
    EvalErrorKind::Io {
        stream,
        reason: error.to_string(),
    }
}
