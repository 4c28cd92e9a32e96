//! Project skeleton.
//!
//! ```text
//! <root>/
//!   Prep/
//!   Equil/
//!     min1/ min2/ min11/ … min15/
//!     md1/  md2/  md11/  … md16/
//!   Prod/
//!     mdst/ mdprod/
//!   Analysis/
//!   Scripts/
//! ```

use std::io;
use std::path::{Path, PathBuf};

use crate::error::{io_err, CoreError};

/// Mode for generated directories and shell scripts.
pub const DEFAULT_DIR_MODE: u32 = 0o755;

/// Top-level directories, in creation order.
pub const TOP_LEVEL_DIRS: &[&str] = &["Prep", "Equil", "Prod", "Analysis", "Scripts"];

const EQUIL_STAGES: &[&str] = &["min", "md"];
const EQUIL_STEPS: &[u32] = &[1, 2, 11, 12, 13, 14, 15, 16];
const PROD_STAGES: &[&str] = &["mdst", "mdprod"];

/// Create `path` and its parents with `mode`; an existing directory is fine.
#[cfg(unix)]
pub fn ensure_dir(path: &Path, mode: u32) -> io::Result<()> {
    use std::os::unix::fs::DirBuilderExt;
    std::fs::DirBuilder::new()
        .recursive(true)
        .mode(mode)
        .create(path)
}

#[cfg(not(unix))]
pub fn ensure_dir(path: &Path, _mode: u32) -> io::Result<()> {
    std::fs::create_dir_all(path)
}

/// Every directory of the skeleton rooted at `root`, in creation order.
pub fn skeleton_paths(root: &Path) -> Vec<PathBuf> {
    let mut paths: Vec<PathBuf> = TOP_LEVEL_DIRS.iter().map(|d| root.join(d)).collect();

    let equil = root.join("Equil");
    for stage in EQUIL_STAGES {
        for step in EQUIL_STEPS {
            let name = format!("{stage}{step}");
            if name != "min16" {
                paths.push(equil.join(name));
            }
        }
    }

    let prod = root.join("Prod");
    paths.extend(PROD_STAGES.iter().map(|s| prod.join(s)));
    paths
}

/// Create the empty project skeleton under `root`.
///
/// Idempotent: directories that already exist are left untouched.
pub fn create_skeleton(root: &Path, mode: u32) -> Result<Vec<PathBuf>, CoreError> {
    let paths = skeleton_paths(root);
    for dir in &paths {
        tracing::info!("Creating {}", dir.display());
        ensure_dir(dir, mode).map_err(|e| io_err(dir, e))?;
    }
    Ok(paths)
}
