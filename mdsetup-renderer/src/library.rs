//! Template sets: built-in ones baked into the binary, plus an optional
//! override directory.
//!
//! # Override layout
//!
//! ```text
//! <override>/
//!   amber/
//!     equil/  md1.tera  min1.tera …
//!     scripts/ equil.tera …
//!   charmm/
//!     …
//! ```
//!
//! When `<override>/<program>/<phase>/` exists it replaces the built-in set
//! for that pair entirely; an empty directory is a valid, empty set.

use std::path::{Path, PathBuf};

use mdsetup_core::TemplateSetId;

use crate::error::{io_err, RenderError};

// ---------------------------------------------------------------------------
// Embedded templates, baked into the binary at compile time via include_str!
// ---------------------------------------------------------------------------

const TPLS: &[(&str, &str)] = &[
    ("amber/equil/md1.tera", include_str!("templates/amber/equil/md1.tera")),
    ("amber/equil/md11.tera", include_str!("templates/amber/equil/md11.tera")),
    ("amber/equil/md12.tera", include_str!("templates/amber/equil/md12.tera")),
    ("amber/equil/md13.tera", include_str!("templates/amber/equil/md13.tera")),
    ("amber/equil/md14.tera", include_str!("templates/amber/equil/md14.tera")),
    ("amber/equil/md15.tera", include_str!("templates/amber/equil/md15.tera")),
    ("amber/equil/md16.tera", include_str!("templates/amber/equil/md16.tera")),
    ("amber/equil/md2.tera", include_str!("templates/amber/equil/md2.tera")),
    ("amber/equil/min1.tera", include_str!("templates/amber/equil/min1.tera")),
    ("amber/equil/min2.tera", include_str!("templates/amber/equil/min2.tera")),
    ("amber/prod/mdprod.tera", include_str!("templates/amber/prod/mdprod.tera")),
    ("amber/prod/mdst.tera", include_str!("templates/amber/prod/mdst.tera")),
    ("amber/scripts/equil.tera", include_str!("templates/amber/scripts/equil.tera")),
    ("amber/scripts/prod.tera", include_str!("templates/amber/scripts/prod.tera")),
    (
        "amber/solvate/solvate.tera",
        include_str!("templates/amber/solvate/solvate.tera"),
    ),
    ("charmm/equil/md1.tera", include_str!("templates/charmm/equil/md1.tera")),
    ("charmm/equil/min1.tera", include_str!("templates/charmm/equil/min1.tera")),
    ("charmm/prod/mdprod.tera", include_str!("templates/charmm/prod/mdprod.tera")),
    ("charmm/scripts/equil.tera", include_str!("templates/charmm/scripts/equil.tera")),
    ("charmm/scripts/prod.tera", include_str!("templates/charmm/scripts/prod.tera")),
    ("gromacs/equil/md1.tera", include_str!("templates/gromacs/equil/md1.tera")),
    ("gromacs/equil/md2.tera", include_str!("templates/gromacs/equil/md2.tera")),
    ("gromacs/equil/min1.tera", include_str!("templates/gromacs/equil/min1.tera")),
    ("gromacs/prod/mdprod.tera", include_str!("templates/gromacs/prod/mdprod.tera")),
    ("gromacs/scripts/equil.tera", include_str!("templates/gromacs/scripts/equil.tera")),
    ("gromacs/scripts/prod.tera", include_str!("templates/gromacs/scripts/prod.tera")),
];

const TEMPLATE_SUFFIX: &str = "tera";

// ---------------------------------------------------------------------------
// TemplateFile / TemplateSet
// ---------------------------------------------------------------------------

/// One template: its file name (e.g. `md1.tera`) and source text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateFile {
    pub name: String,
    pub source: String,
}

impl TemplateFile {
    /// File name with the template suffix stripped (`md1.tera` → `md1`).
    pub fn base_name(&self) -> &str {
        Path::new(&self.name)
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or(&self.name)
    }
}

/// A resolved template set, ordered by file name.
#[derive(Debug, Clone)]
pub struct TemplateSet {
    pub id: TemplateSetId,
    /// Logical location (`templates/<program>/<phase>`) the output naming rules key on.
    pub location: PathBuf,
    /// Where the sources were read from: the override directory, or `None` if built in.
    pub source_dir: Option<PathBuf>,
    pub templates: Vec<TemplateFile>,
}

impl TemplateSet {
    pub fn len(&self) -> usize {
        self.templates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }
}

// ---------------------------------------------------------------------------
// TemplateLibrary
// ---------------------------------------------------------------------------

/// Resolves [`TemplateSetId`]s to [`TemplateSet`]s. Nothing is cached.
#[derive(Debug, Clone, Default)]
pub struct TemplateLibrary {
    override_dir: Option<PathBuf>,
}

impl TemplateLibrary {
    /// Built-in templates only.
    pub fn embedded() -> Self {
        Self { override_dir: None }
    }

    /// Built-in templates, with per-set replacements read from `dir`.
    pub fn with_override_dir(dir: impl Into<PathBuf>) -> Self {
        Self {
            override_dir: Some(dir.into()),
        }
    }

    pub fn override_dir(&self) -> Option<&Path> {
        self.override_dir.as_deref()
    }

    /// Look up the template set for `id`.
    pub fn resolve(&self, id: TemplateSetId) -> Result<TemplateSet, RenderError> {
        if let Some(root) = &self.override_dir {
            let dir = root.join(id.program.as_str()).join(id.phase.as_str());
            if dir.is_dir() {
                tracing::debug!("using template override {}", dir.display());
                let templates = read_template_dir(&dir)?;
                return Ok(TemplateSet {
                    id,
                    location: id.location(),
                    source_dir: Some(dir),
                    templates,
                });
            }
        }

        let templates = embedded_templates(&id);
        if templates.is_empty() {
            return Err(RenderError::TemplateSetNotFound {
                name: id.to_string(),
                location: match &self.override_dir {
                    Some(root) => root.join(id.program.as_str()).join(id.phase.as_str()),
                    None => id.location(),
                },
            });
        }
        Ok(TemplateSet {
            id,
            location: id.location(),
            source_dir: None,
            templates,
        })
    }
}

fn embedded_templates(id: &TemplateSetId) -> Vec<TemplateFile> {
    let prefix = format!("{}/{}/", id.program.as_str(), id.phase.as_str());
    let mut templates: Vec<TemplateFile> = TPLS
        .iter()
        .filter_map(|(path, source)| {
            path.strip_prefix(&prefix).map(|name| TemplateFile {
                name: name.to_string(),
                source: (*source).to_string(),
            })
        })
        .collect();
    templates.sort_by(|a, b| a.name.cmp(&b.name));
    templates
}

fn read_template_dir(dir: &Path) -> Result<Vec<TemplateFile>, RenderError> {
    let entries = std::fs::read_dir(dir).map_err(|e| io_err(dir, e))?;
    let mut templates = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|e| io_err(dir, e))?;
        let path = entry.path();
        // Follows symlinks, so linked templates count as files.
        let meta = std::fs::metadata(&path).map_err(|e| io_err(&path, e))?;
        if !meta.is_file()
            || path.extension().and_then(|s| s.to_str()) != Some(TEMPLATE_SUFFIX)
        {
            continue;
        }
        let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
            tracing::warn!("skipping template with non UTF-8 name: {}", path.display());
            continue;
        };
        let source = std::fs::read_to_string(&path).map_err(|e| io_err(&path, e))?;
        templates.push(TemplateFile {
            name: name.to_string(),
            source,
        });
    }
    templates.sort_by(|a, b| a.name.cmp(&b.name));
    Ok(templates)
}
