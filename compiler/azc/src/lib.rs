//! Az CLI library.
//!
//! Argument parsing, the script and REPL drivers, and diagnostic rendering
//! for the `az` binary. Evaluation itself lives in `az_eval`.

pub mod commands;
mod options;
pub mod report;

pub use options::{parse_args, Command, Input, USAGE};

use std::sync::Once;

static TRACING_INIT: Once = Once::new();

/// Initialize tracing subscriber for debug output.
///
/// Only installs a subscriber when `RUST_LOG` is set, and writes to stderr
/// so script output on stdout stays clean. Safe to call more than once.
///
/// Example: `RUST_LOG=az_eval=debug az script.az`
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};

        if std::env::var("RUST_LOG").is_ok() {
            let filter = EnvFilter::from_default_env();
            tracing_subscriber::registry()
                .with(
                    fmt::layer()
                        .with_writer(std::io::stderr)
                        .with_target(true)
                        .with_level(true),
                )
                .with(filter)
                .init();
        }
    });
}
