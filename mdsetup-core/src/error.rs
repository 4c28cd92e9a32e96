//! Error types for mdsetup-core.

use std::path::PathBuf;

use thiserror::Error;

use crate::types::SimulationProgram;

/// All errors that can arise from core operations.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Filesystem failure, annotated with the path being touched.
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The environment variable a simulation program depends on is not set.
    #[error("{variable} is not defined; it is required for {program}")]
    MissingEnvironmentReference {
        program: SimulationProgram,
        variable: &'static str,
    },
}

/// Convenience constructor for [`CoreError::Io`].
pub(crate) fn io_err(path: impl Into<PathBuf>, source: std::io::Error) -> CoreError {
    CoreError::Io {
        path: path.into(),
        source,
    }
}
