//! Writes a resolved [`TemplateSet`] to disk.
//!
//! ## Output naming
//!
//! For a template `<base>.tera` rendered into `<out>`:
//!
//! | Set location contains `scripts` | Target                     |
//! |---------------------------------|----------------------------|
//! | no                              | `<out>/<base>/<base>.in`   |
//! | yes                             | `<out>/<base>.sh` when `<out>/<base>` has a `Scripts` segment |
//!
//! Both checks are plain string matches on path names; the set directories
//! carry no other marker.

use std::path::{Component, Path, PathBuf};

use mdsetup_core::layout::{ensure_dir, DEFAULT_DIR_MODE};
use mdsetup_core::RenderRequest;

use crate::engine::TemplateEngine;
use crate::error::{io_err, RenderError};
use crate::library::TemplateSet;

/// Extension for rendered simulation inputs.
pub const INPUT_EXTENSION: &str = "in";
/// Extension for rendered shell scripts.
pub const SCRIPT_EXTENSION: &str = "sh";

/// File modes applied while writing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderOptions {
    /// Mode for directories created during rendering.
    pub dir_mode: u32,
    /// Mode the script permission pass gives every `.sh` file.
    pub script_mode: u32,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            dir_mode: DEFAULT_DIR_MODE,
            script_mode: DEFAULT_DIR_MODE,
        }
    }
}

/// Whether outputs of a set at `location` are shell scripts.
pub fn is_script_location(location: &Path) -> bool {
    location.to_string_lossy().to_lowercase().contains("scripts")
}

/// Directory a template with `base_name` is written to.
///
/// Nested one level by base name, except that script outputs are flattened
/// into `output_dir`.
pub fn target_dir(output_dir: &Path, base_name: &str) -> PathBuf {
    let nested = output_dir.join(base_name);
    let flatten = nested.components().any(|c| match c {
        Component::Normal(seg) => seg == "Scripts" || seg == "scripts",
        _ => false,
    });
    if flatten {
        output_dir.to_path_buf()
    } else {
        nested
    }
}

/// Output path for a template with `base_name` from a set at `location`.
pub fn output_path(output_dir: &Path, location: &Path, base_name: &str) -> PathBuf {
    let extension = if is_script_location(location) {
        SCRIPT_EXTENSION
    } else {
        INPUT_EXTENSION
    };
    target_dir(output_dir, base_name).join(format!("{base_name}.{extension}"))
}

/// Render every template of `set` into `output_dir`, in set order.
///
/// Existing files are overwritten. On failure, files written for earlier
/// templates stay on disk.
pub fn render_template_set<E>(
    engine: &E,
    request: &RenderRequest,
    output_dir: &Path,
    set: &TemplateSet,
    options: &RenderOptions,
) -> Result<Vec<PathBuf>, RenderError>
where
    E: TemplateEngine + ?Sized,
{
    let mut written = Vec::with_capacity(set.len());
    for template in &set.templates {
        let base = template.base_name();
        let path = output_path(output_dir, &set.location, base);
        if let Some(dir) = path.parent() {
            ensure_dir(dir, options.dir_mode).map_err(|e| io_err(dir, e))?;
        }

        let body = engine.render(&template.name, &template.source, request)?;
        tracing::info!("Writing {} to {}", template.name, path.display());
        std::fs::write(&path, format!("{body}\n")).map_err(|e| io_err(&path, e))?;
        written.push(path);
    }
    tracing::debug!("{}: {} file(s) written", set.id, written.len());
    Ok(written)
}

/// Give every `*.sh` file directly inside `dir` the mode `mode`.
///
/// Returns the files touched, sorted. A missing `dir` touches nothing.
pub fn fix_script_permissions(dir: &Path, mode: u32) -> Result<Vec<PathBuf>, RenderError> {
    let entries = match std::fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
        Err(e) => return Err(io_err(dir, e)),
    };

    let mut scripts = Vec::new();
    for entry in entries {
        let path = entry.map_err(|e| io_err(dir, e))?.path();
        if path.is_file() && path.extension().and_then(|s| s.to_str()) == Some(SCRIPT_EXTENSION) {
            scripts.push(path);
        }
    }
    scripts.sort();

    tracing::debug!("Changing file permissions to {mode:o}");
    for script in &scripts {
        set_mode(script, mode)?;
    }
    Ok(scripts)
}

#[cfg(unix)]
fn set_mode(path: &Path, mode: u32) -> Result<(), RenderError> {
    use std::os::unix::fs::PermissionsExt;
    std::fs::set_permissions(path, std::fs::Permissions::from_mode(mode))
        .map_err(|e| io_err(path, e))
}

#[cfg(not(unix))]
fn set_mode(_path: &Path, _mode: u32) -> Result<(), RenderError> {
    Ok(())
}
