pub mod create;
pub mod init;
pub mod solvate;

use std::path::{Path, PathBuf};

use anyhow::{ensure, Context, Result};

use mdsetup_renderer::TemplateLibrary;

/// Canonical path of an existing regular file.
pub(crate) fn existing_file(path: &Path, what: &str) -> Result<PathBuf> {
    ensure!(path.is_file(), "{what} '{}' does not exist", path.display());
    path.canonicalize()
        .with_context(|| format!("cannot resolve {what} '{}'", path.display()))
}

/// Canonical path of an existing directory.
pub(crate) fn existing_dir(path: &Path, what: &str) -> Result<PathBuf> {
    ensure!(path.is_dir(), "{what} '{}' is not a directory", path.display());
    path.canonicalize()
        .with_context(|| format!("cannot resolve {what} '{}'", path.display()))
}

/// Built-in templates, or the override directory when one was given.
pub(crate) fn template_library(templates: Option<&Path>) -> Result<TemplateLibrary> {
    match templates {
        Some(dir) => Ok(TemplateLibrary::with_override_dir(existing_dir(
            dir,
            "template directory",
        )?)),
        None => Ok(TemplateLibrary::embedded()),
    }
}

/// Name of the current working directory, the default file prefix.
pub(crate) fn current_dir_name() -> Result<String> {
    let cwd = std::env::current_dir().context("cannot read the current directory")?;
    Ok(cwd
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| "simulation".to_string()))
}
