//! Error types for mdsetup-renderer.

use std::path::PathBuf;

use thiserror::Error;

/// All errors that can arise from template rendering operations.
#[derive(Debug, Error)]
pub enum RenderError {
    /// No template set exists for the requested program/phase.
    #[error("template set '{name}' not found (looked under {location})")]
    TemplateSetNotFound { name: String, location: PathBuf },

    /// A single template failed to parse or render.
    #[error("failed to render template '{template}'")]
    TemplateRender {
        template: String,
        #[source]
        source: tera::Error,
    },

    /// Filesystem error while reading templates or writing output.
    #[error("template io error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Convenience constructor for [`RenderError::Io`].
pub(crate) fn io_err(path: impl Into<PathBuf>, source: std::io::Error) -> RenderError {
    RenderError::Io {
        path: path.into(),
        source,
    }
}
