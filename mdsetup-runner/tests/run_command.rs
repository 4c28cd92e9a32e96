//! CommandRunner tests against throwaway shell-script executables.
//!
//! Serial: exec'ing a script another thread just wrote can hit ETXTBSY.
#![cfg(unix)]

use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};

use mdsetup_runner::{CommandRunner, RunError};
use serial_test::serial;
use tempfile::TempDir;

fn fake_tool(bin: &Path, name: &str, body: &str) -> PathBuf {
    let path = bin.join(name);
    fs::write(&path, format!("#!/bin/sh\n{body}\n")).unwrap();
    fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).unwrap();
    path
}

struct Sandbox {
    bin: TempDir,
    work: TempDir,
}

impl Sandbox {
    fn new() -> Self {
        Self {
            bin: TempDir::new().expect("bin"),
            work: TempDir::new().expect("work"),
        }
    }

    fn runner(&self) -> CommandRunner {
        CommandRunner::with_search_path(self.bin.path())
    }

    fn input(&self) -> PathBuf {
        let path = self.work.path().join("solvate.in");
        fs::write(&path, "quit\n").unwrap();
        path
    }

    fn log(&self) -> PathBuf {
        self.work.path().join("solvate.log")
    }
}

#[test]
#[serial]
fn successful_run_captures_stdout_and_stderr_in_order() {
    let sb = Sandbox::new();
    fake_tool(
        sb.bin.path(),
        "tleap",
        "echo \"out one $1 $2\"\necho \"err two\" >&2\necho \"out three\"",
    );
    let input = sb.input();

    sb.runner().run("tleap", &input, &sb.log()).expect("run");

    let log = fs::read_to_string(sb.log()).unwrap();
    let expected = format!("out one -f {}\nerr two\nout three\n", input.display());
    assert_eq!(log, expected);
}

#[test]
#[serial]
fn log_is_appended_not_truncated() {
    let sb = Sandbox::new();
    fake_tool(sb.bin.path(), "tleap", "echo ran");
    fs::write(sb.log(), "earlier line\n").unwrap();
    let input = sb.input();

    sb.runner().run("tleap", &input, &sb.log()).unwrap();
    sb.runner().run("tleap", &input, &sb.log()).unwrap();

    assert_eq!(
        fs::read_to_string(sb.log()).unwrap(),
        "earlier line\nran\nran\n"
    );
}

#[test]
#[serial]
fn missing_executable_writes_nothing() {
    let sb = Sandbox::new();
    let err = sb.runner().run("tleap", &sb.input(), &sb.log()).unwrap_err();
    assert!(
        matches!(err, RunError::ExecutableNotFound { ref command } if command == "tleap"),
        "got: {err}"
    );
    assert!(!sb.log().exists(), "log must not be created");
}

#[test]
#[serial]
fn non_executable_file_is_not_found() {
    let sb = Sandbox::new();
    fs::write(sb.bin.path().join("tleap"), "#!/bin/sh\necho hi\n").unwrap();
    let err = sb.runner().run("tleap", &sb.input(), &sb.log()).unwrap_err();
    assert!(matches!(err, RunError::ExecutableNotFound { .. }), "got: {err}");
}

#[test]
#[serial]
fn non_zero_exit_keeps_partial_log() {
    let sb = Sandbox::new();
    fake_tool(
        sb.bin.path(),
        "tleap",
        "echo \"loading structure\"\necho \"FATAL: bad residue\" >&2\nexit 3",
    );

    let err = sb.runner().run("tleap", &sb.input(), &sb.log()).unwrap_err();
    match err {
        RunError::CommandFailed { command, exit_code } => {
            assert_eq!(command, "tleap");
            assert_eq!(exit_code, Some(3));
        }
        other => panic!("unexpected error: {other}"),
    }
    let log = fs::read_to_string(sb.log()).unwrap();
    assert_eq!(log, "loading structure\nFATAL: bad residue\n");
}

#[test]
#[serial]
fn signal_termination_is_a_failure_without_code() {
    let sb = Sandbox::new();
    fake_tool(sb.bin.path(), "tleap", "echo started\nkill -9 $$");

    let err = sb.runner().run("tleap", &sb.input(), &sb.log()).unwrap_err();
    assert!(
        matches!(err, RunError::CommandFailed { exit_code: None, .. }),
        "got: {err}"
    );
    assert_eq!(fs::read_to_string(sb.log()).unwrap(), "started\n");
}

#[test]
#[serial]
fn locate_returns_absolute_path() {
    let sb = Sandbox::new();
    let tool = fake_tool(sb.bin.path(), "gmx", "exit 0");
    let found = sb.runner().locate("gmx").unwrap();
    assert!(found.is_absolute());
    assert_eq!(
        found.canonicalize().unwrap(),
        tool.canonicalize().unwrap()
    );
}
