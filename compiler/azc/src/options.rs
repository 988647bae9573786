//! Command-line parsing.

use std::ffi::OsString;
use std::path::PathBuf;

use az_eval::EvalConfig;

/// Usage text printed by `--help` and on argument errors.
pub const USAGE: &str = "\
Usage: az [options] [FILE | -e CODE]

Runs FILE as an az script, or CODE given inline. With neither, starts an
interactive prompt.

Options:
  -e CODE                 Run CODE instead of a file
  --max-loop-depth=N      Maximum nested loops (default: 256)
  --shell=PATH            Shell used by `$` (default: sh)
  -h, --help              Print this help";

/// Where the program text comes from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Input {
    /// Interactive prompt.
    Repl,
    /// Script file.
    File(PathBuf),
    /// Source given with `-e`.
    Inline(String),
}

/// What the binary should do.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Command {
    /// Run `input` with `config`.
    Run { input: Input, config: EvalConfig },
    /// Print usage and exit successfully.
    Help,
}

/// Parse arguments (without the program name).
///
/// File names are taken as given; they need not be UTF-8.
pub fn parse_args<I>(args: I) -> Result<Command, String>
where
    I: IntoIterator<Item = OsString>,
{
    let mut config = EvalConfig::default();
    let mut input = Input::Repl;
    let mut args = args.into_iter();

    while let Some(raw) = args.next() {
        let Some(arg) = raw.to_str() else {
            input = set_input(input, Input::File(PathBuf::from(&raw)))?;
            continue;
        };
        if arg == "-h" || arg == "--help" {
            return Ok(Command::Help);
        } else if let Some(depth) = arg.strip_prefix("--max-loop-depth=") {
            config.max_loop_depth = depth
                .parse()
                .map_err(|_| format!("invalid loop depth '{depth}'"))?;
        } else if let Some(shell) = arg.strip_prefix("--shell=") {
            if shell.is_empty() {
                return Err("--shell needs a program".to_string());
            }
            config.shell = shell.to_string();
        } else if arg == "-e" {
            let Some(code) = args.next() else {
                return Err("-e needs an argument".to_string());
            };
            let code = code
                .into_string()
                .map_err(|_| "-e needs UTF-8 source".to_string())?;
            input = set_input(input, Input::Inline(code))?;
        } else if arg.starts_with('-') {
            return Err(format!("unknown option '{arg}'"));
        } else {
            input = set_input(input, Input::File(PathBuf::from(arg)))?;
        }
    }

    Ok(Command::Run { input, config })
}

fn set_input(current: Input, next: Input) -> Result<Input, String> {
    match current {
        Input::Repl => Ok(next),
        _ => Err("only one script or -e expression may be given".to_string()),
    }
}
