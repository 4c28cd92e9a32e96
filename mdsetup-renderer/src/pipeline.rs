//! Rendering entrypoints used by the `create` and `solvate` commands.

use std::path::{Path, PathBuf};

use mdsetup_core::layout::ensure_dir;
use mdsetup_core::{OutputSelection, Phase, RenderRequest, SimulationProgram, TemplateSetId};

use crate::engine::TemplateEngine;
use crate::error::{io_err, RenderError};
use crate::library::{TemplateLibrary, TemplateSet};
use crate::writer::{fix_script_permissions, render_template_set, RenderOptions};

/// Files written for one phase.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhaseOutput {
    pub id: TemplateSetId,
    pub output_dir: PathBuf,
    pub files: Vec<PathBuf>,
}

/// Outcome of a [`render_selection`] run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RenderSummary {
    pub phases: Vec<PhaseOutput>,
    /// Scripts whose mode was set by the permission pass.
    pub scripts: Vec<PathBuf>,
}

impl RenderSummary {
    /// Every file written, in write order.
    pub fn files(&self) -> impl Iterator<Item = &PathBuf> {
        self.phases.iter().flat_map(|p| p.files.iter())
    }
}

fn write_phase<E>(
    engine: &E,
    request: &RenderRequest,
    outdir: &Path,
    set: &TemplateSet,
    options: &RenderOptions,
) -> Result<PhaseOutput, RenderError>
where
    E: TemplateEngine + ?Sized,
{
    let output_dir = outdir.join(set.id.phase.dir_name());
    ensure_dir(&output_dir, options.dir_mode).map_err(|e| io_err(&output_dir, e))?;

    tracing::info!("Template directory: {}", set.location.display());
    tracing::info!("Output files: {}", output_dir.display());
    let files = render_template_set(engine, request, &output_dir, set, options)?;
    Ok(PhaseOutput {
        id: set.id,
        output_dir,
        files,
    })
}

/// Render a single phase into `outdir/<phase dir>`.
pub fn render_phase<E>(
    library: &TemplateLibrary,
    engine: &E,
    request: &RenderRequest,
    outdir: &Path,
    id: TemplateSetId,
    options: &RenderOptions,
) -> Result<PhaseOutput, RenderError>
where
    E: TemplateEngine + ?Sized,
{
    let set = library.resolve(id)?;
    write_phase(engine, request, outdir, &set, options)
}

/// Render every phase of `selection` for `program` into `outdir`.
///
/// All sets are resolved before anything is written, so a missing set leaves
/// the output tree untouched. When the selection includes scripts, the
/// permission pass runs on `outdir/Scripts` after all files are written.
pub fn render_selection<E>(
    library: &TemplateLibrary,
    engine: &E,
    request: &RenderRequest,
    outdir: &Path,
    program: SimulationProgram,
    selection: OutputSelection,
    options: &RenderOptions,
) -> Result<RenderSummary, RenderError>
where
    E: TemplateEngine + ?Sized,
{
    let sets = selection
        .phases()
        .iter()
        .map(|phase| library.resolve(TemplateSetId::new(program, *phase)))
        .collect::<Result<Vec<_>, _>>()?;

    let mut summary = RenderSummary::default();
    for set in &sets {
        summary
            .phases
            .push(write_phase(engine, request, outdir, set, options)?);
    }

    if selection.includes_scripts() {
        let scripts_dir = outdir.join(Phase::Scripts.dir_name());
        summary.scripts = fix_script_permissions(&scripts_dir, options.script_mode)?;
    }
    Ok(summary)
}
