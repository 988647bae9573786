//! Az interpreter CLI
//!
//! Runs a script file, inline source, or an interactive prompt.

use azc::commands::{run_file, run_inline, run_repl};
use azc::{init_tracing, parse_args, Command, Input, USAGE};

fn main() {
    init_tracing();

    let command = match parse_args(std::env::args_os().skip(1)) {
        Ok(command) => command,
        Err(msg) => {
            eprintln!("error: {msg}");
            eprintln!();
            eprintln!("{USAGE}");
            std::process::exit(1);
        }
    };

    let code = match command {
        Command::Help => {
            println!("{USAGE}");
            0
        }
        Command::Run { input, config } => match input {
            Input::Repl => run_repl(config),
            Input::File(path) => run_file(&path, config),
            Input::Inline(code) => run_inline(&code, config),
        },
    };
    std::process::exit(code);
}
