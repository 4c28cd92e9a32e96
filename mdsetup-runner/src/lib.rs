//! # mdsetup-runner
//!
//! Runs an external simulation tool (`tleap`, `charmm`, `gmx`) on a rendered
//! input file, capturing everything it prints into a log file.
//!
//! The call is synchronous and has no timeout: it returns once the child exits.
//! Standard output and standard error go to one appended file handle, so the
//! log keeps the order in which the tool wrote them.

pub mod error;

use std::ffi::{OsStr, OsString};
use std::fs::{File, OpenOptions};
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

pub use error::RunError;

use crate::error::io_err;

/// Locates and runs external commands.
#[derive(Debug, Clone, Default)]
pub struct CommandRunner {
    search_path: Option<OsString>,
}

impl CommandRunner {
    /// Runner that searches the process `PATH`.
    pub fn new() -> Self {
        Self::default()
    }

    /// Runner that searches `paths` (same syntax as `PATH`) instead.
    pub fn with_search_path(paths: impl Into<OsString>) -> Self {
        Self {
            search_path: Some(paths.into()),
        }
    }

    /// Resolve `command` to an executable path.
    pub fn locate(&self, command: &str) -> Result<PathBuf, RunError> {
        let found = match &self.search_path {
            Some(paths) => {
                let cwd = std::env::current_dir().map_err(|e| io_err(".", e))?;
                which::which_in(command, Some(paths.as_os_str()), cwd)
            }
            None => which::which(command),
        };
        found.map_err(|_| RunError::ExecutableNotFound {
            command: command.to_string(),
        })
    }

    /// Run `command -f <input>`, appending its output to `log`.
    ///
    /// Nothing is written to `log` when the command cannot be found. On a
    /// non-zero exit the output captured so far stays in the log.
    pub fn run(&self, command: &str, input: &Path, log: &Path) -> Result<(), RunError> {
        let executable = self.locate(command).inspect_err(|_| {
            tracing::error!("Could not find {command}");
        })?;

        let stdout = open_log(log)?;
        let stderr = stdout.try_clone().map_err(|e| io_err(log, e))?;

        tracing::info!("Running {} -f {}", executable.display(), input.display());
        let status = Command::new(&executable)
            .args([OsStr::new("-f"), input.as_os_str()])
            .stdin(Stdio::null())
            .stdout(Stdio::from(stdout))
            .stderr(Stdio::from(stderr))
            .status()
            .map_err(|e| io_err(&executable, e))?;

        if status.success() {
            tracing::debug!("{command} finished; output in {}", log.display());
            return Ok(());
        }

        tracing::error!("Could not run {command} ({status}); see {}", log.display());
        Err(RunError::CommandFailed {
            command: command.to_string(),
            exit_code: status.code(),
        })
    }
}

fn open_log(log: &Path) -> Result<File, RunError> {
    OpenOptions::new()
        .create(true)
        .append(true)
        .open(log)
        .map_err(|e| io_err(log, e))
}

/// Run `command -f <input>` found on the process `PATH`, logging to `log`.
pub fn run_command(command: &str, input: &Path, log: &Path) -> Result<(), RunError> {
    CommandRunner::new().run(command, input, log)
}
