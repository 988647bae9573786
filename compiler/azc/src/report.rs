//! Diagnostic rendering with `ariadne`.
//!
//! Errors carry an absolute offset into the interpreter's source buffer.
//! Rendering finds the segment (script or REPL line) holding that offset and
//! labels the offending byte within it.

use std::io::{self, IsTerminal, Write};
use std::ops::Range;

use ariadne::{Config, Label, Report, ReportBuilder, ReportKind, Source};
use az_eval::EvalError;
use az_source::SourceBuffer;

/// Render `error` as a report over the segment it occurred in.
///
/// `name` identifies the segment in the report header (a path, `<repl>`,
/// `<expr>`).
pub fn render_eval_error(
    source: &SourceBuffer,
    name: &str,
    error: &EvalError,
    color: bool,
) -> String {
    let Some(segment) = source.segment_at(error.offset) else {
        return format!("error[{}]: {error}\n", error.code());
    };
    let bytes = source.segment_bytes(segment);
    let text = String::from_utf8_lossy(bytes);
    let local = (error.offset - segment.start()) as usize;
    let at = String::from_utf8_lossy(&bytes[..local.min(bytes.len())])
        .chars()
        .count();
    let len = text.chars().count();
    let span: Range<usize> = at.min(len)..(at + 1).min(len);

    let message = error.to_string();
    let builder: ReportBuilder<'_, (&str, Range<usize>)> =
        Report::build(ReportKind::Error, name, span.start)
            .with_code(error.code())
            .with_message(&message)
            .with_config(Config::default().with_color(color));
    let builder = if len == 0 {
        builder
    } else {
        builder.with_label(Label::new((name, span)).with_message(&message))
    };

    let mut out = Vec::new();
    if builder
        .finish()
        .write((name, Source::from(&*text)), &mut out)
        .is_err()
    {
        return format!("error[{}]: {error}\n", error.code());
    }
    String::from_utf8_lossy(&out).into_owned()
}

/// Print `error` to stderr, colored when stderr is a terminal.
pub fn eval_error(source: &SourceBuffer, name: &str, error: &EvalError) {
    let stderr = io::stderr();
    let rendered = render_eval_error(source, name, error, stderr.is_terminal());
    let mut handle = stderr.lock();
    let _ = handle.write_all(rendered.as_bytes());
    let _ = handle.flush();
}

#[cfg(test)]
mod tests;
