// Test code uses unwrap/expect for clarity - panics provide good test failure messages
#![allow(clippy::unwrap_used, clippy::expect_used)]

//! End-to-end tests of the `az` binary.
//!
//! ```bash
//! cargo test -p azc --test cli
//! ```

use std::io::Write;
use std::process::{Command, Output, Stdio};


fn az(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_az"))
        .args(args)
        .env_remove("RUST_LOG")
        .output()
        .expect("failed to run az")
}

fn az_with_stdin(args: &[&str], stdin: &[u8]) -> Output {
    let mut child = Command::new(env!("CARGO_BIN_EXE_az"))
        .args(args)
        .env_remove("RUST_LOG")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("failed to start az");
    child
        .stdin
        .take()
        .expect("stdin is piped")
        .write_all(stdin)
        .unwrap();
    child.wait_with_output().expect("failed to wait for az")
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

fn script(content: &[u8]) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(content).unwrap();
    file.flush().unwrap();
    file
}

mod scripts {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn inline_source_prints_and_exits_with_value() {
        let out = az(&["-e", "a5b3+#"]);
        assert_eq!(stdout(&out), "8");
        assert_eq!(out.status.code(), Some(8));
    }

    #[test]
    fn file_script() {
        let file = script(b"a\"hi\".a0");
        let out = az(&[file.path().to_str().unwrap()]);
        assert_eq!(stdout(&out), "hi");
        assert_eq!(out.status.code(), Some(0));
    }

    #[cfg(unix)]
    #[test]
    fn non_utf8_script_path() {
        use std::ffi::OsStr;
        use std::os::unix::ffi::OsStrExt;

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(OsStr::from_bytes(b"s\xffcript.az"));
        std::fs::write(&path, b"a7#").unwrap();
        let out = Command::new(env!("CARGO_BIN_EXE_az"))
            .arg(&path)
            .env_remove("RUST_LOG")
            .output()
            .unwrap();
        assert_eq!(stdout(&out), "7");
        assert_eq!(out.status.code(), Some(7));
    }

    #[test]
    fn missing_file() {
        let out = az(&["/nonexistent/script.az"]);
        assert_eq!(out.status.code(), Some(1));
        assert!(stderr(&out).contains("cannot find file"), "{}", stderr(&out));
    }

    #[test]
    fn runtime_error_is_reported() {
        let out = az(&["-e", "1#~"]);
        assert_eq!(out.status.code(), Some(1));
        assert_eq!(stdout(&out), "1");
        let err = stderr(&out);
        assert!(err.contains("E6006"), "{err}");
        assert!(err.contains("<expr>"), "{err}");
    }

    #[test]
    fn interior_nul_is_rejected_before_running() {
        let file = script(b"1#\x002#");
        let out = az(&[file.path().to_str().unwrap()]);
        assert_eq!(out.status.code(), Some(1));
        assert_eq!(stdout(&out), "");
        assert!(stderr(&out).contains("E6006"), "{}", stderr(&out));
    }

    #[test]
    fn loop_depth_flag() {
        let out = az(&["--max-loop-depth=1", "-e", "[["]);
        assert_eq!(out.status.code(), Some(1));
        assert!(stderr(&out).contains("E6002"), "{}", stderr(&out));
    }

    #[cfg(unix)]
    #[test]
    fn negative_value_wraps_exit_status() {
        let out = az(&["-e", "a1-"]);
        assert_eq!(out.status.code(), Some(255));
    }

    #[cfg(unix)]
    #[test]
    fn subprocess_output() {
        let out = az(&["-e", "a\"printf ok\"$[b,?.]"]);
        assert_eq!(stdout(&out), "ok");
        assert_eq!(out.status.code(), Some(0));
    }

    #[test]
    fn reads_stdin() {
        let out = az_with_stdin(&["-e", "[a,?.]"], b"echo");
        assert_eq!(stdout(&out), "echo");
    }
}

mod repl {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn state_persists_between_lines() {
        let out = az_with_stdin(&[], b"a5\na#\n");
        assert_eq!(stdout(&out), "> 5\n> 55\n> ");
        assert_eq!(out.status.code(), Some(0));
    }

    #[test]
    fn functions_defined_earlier_can_be_called() {
        // The first line prints the body offset, the second the call's
        // output followed by Current (still the function).
        let out = az_with_stdin(&[], b"f{7#}\nf;\n");
        assert_eq!(stdout(&out), "> 2\n> 72\n> ");
    }

    #[test]
    fn error_does_not_end_session() {
        let out = az_with_stdin(&[], b"~\na3\n");
        assert_eq!(stdout(&out), "> > 3\n> ");
        assert!(stderr(&out).contains("E6006"), "{}", stderr(&out));
        assert_eq!(out.status.code(), Some(0));
    }
}

mod usage {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn help() {
        let out = az(&["--help"]);
        assert_eq!(out.status.code(), Some(0));
        assert!(stdout(&out).contains("Usage: az"));
    }

    #[test]
    fn unknown_option() {
        let out = az(&["--frobnicate"]);
        assert_eq!(out.status.code(), Some(1));
        assert!(stderr(&out).contains("unknown option"));
    }
}
