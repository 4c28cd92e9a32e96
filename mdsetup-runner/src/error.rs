//! Error types for mdsetup-runner.

use std::path::PathBuf;

use thiserror::Error;

/// Failures of a single external command invocation.
#[derive(Debug, Error)]
pub enum RunError {
    /// The command name did not resolve to an executable on the search path.
    #[error("could not find {command} on the search path")]
    ExecutableNotFound { command: String },

    /// The command ran and exited unsuccessfully.
    #[error("{command} failed ({})", describe_exit(.exit_code))]
    CommandFailed {
        command: String,
        /// `None` when the process was terminated by a signal.
        exit_code: Option<i32>,
    },

    /// Opening the log or spawning the process failed.
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

fn describe_exit(code: &Option<i32>) -> String {
    match code {
        Some(code) => format!("exit status {code}"),
        None => "terminated by signal".to_string(),
    }
}

/// Convenience constructor for [`RunError::Io`].
pub(crate) fn io_err(path: impl Into<PathBuf>, source: std::io::Error) -> RunError {
    RunError::Io {
        path: path.into(),
        source,
    }
}
