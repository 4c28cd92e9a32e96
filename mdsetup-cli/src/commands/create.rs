//! `mdsetup create -s TOPOLOGY [-d DIR] [--type ...] [--simprog ...]`

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;

use mdsetup_core::environment::resolve_environment;
use mdsetup_core::types::{current_year, DEFAULT_TOPPAR};
use mdsetup_core::{OutputSelection, SimulationParameters, SimulationProgram};
use mdsetup_renderer::{pipeline, RenderOptions, TeraEngine};

use super::{current_dir_name, existing_dir, existing_file, template_library};
use crate::logging::LogArgs;

/// Render equilibration/production input files and run scripts.
#[derive(Args, Debug)]
pub struct CreateArgs {
    /// Topology file the simulation runs on.
    #[arg(short = 's', long = "topology", value_name = "TOPOLOGY", default_value = "amber.parm7")]
    pub topology: PathBuf,

    /// Simulation root; outputs go to `<DIR>/Equil`, `<DIR>/Prod` and `<DIR>/Scripts`.
    #[arg(short = 'd', long = "outdir", value_name = "DIR", default_value = ".")]
    pub outdir: PathBuf,

    /// File prefix. Defaults to the name of the current directory.
    #[arg(short = 'p', long = "prefix", value_name = "PREFIX")]
    pub prefix: Option<String>,

    /// Initial temperature (K).
    #[arg(long, value_name = "TEMP1", default_value_t = 100.0, allow_negative_numbers = true)]
    pub temp1: f64,

    /// Final temperature (K).
    #[arg(long, value_name = "TEMP2", default_value_t = 300.0, allow_negative_numbers = true)]
    pub temp2: f64,

    /// Positional restraint force (kcal/mol/Å²).
    #[arg(long, value_name = "FORCE", default_value_t = 100.0, allow_negative_numbers = true)]
    pub force: f64,

    /// Which files to write: equil | prod | scripts | all.
    #[arg(long = "type", value_name = "TYPE", default_value = "all")]
    pub selection: OutputSelection,

    /// Simulation program: amber | charmm | gromacs.
    #[arg(long = "simprog", value_name = "PROGRAM", default_value = "amber")]
    pub program: SimulationProgram,

    /// CHARMM topology/parameter directory.
    #[arg(long, value_name = "DIR", default_value = DEFAULT_TOPPAR)]
    pub toppar: PathBuf,

    /// CHARMM force-field version.
    #[arg(long = "ff", value_name = "N", default_value_t = 36, allow_negative_numbers = true)]
    pub charmm_ff: i64,

    /// Directory of `<program>/<phase>/*.tera` sets replacing the built-in ones.
    #[arg(long, value_name = "DIR", env = "MDSETUP_TEMPLATES")]
    pub templates: Option<PathBuf>,

    #[command(flatten)]
    pub log: LogArgs,
}

impl CreateArgs {
    pub fn run(self) -> Result<()> {
        let topology = existing_file(&self.topology, "topology")?;
        let outdir = existing_dir(&self.outdir, "output directory")?;
        // Only CHARMM decks read from toppar.
        let toppar = match self.program {
            SimulationProgram::Charmm => existing_dir(&self.toppar, "toppar directory")?,
            _ => self.toppar.clone(),
        };
        let library = template_library(self.templates.as_deref())?;
        let amberhome = resolve_environment(self.program)?;

        let prefix = match self.prefix {
            Some(prefix) => prefix,
            None => current_dir_name()?,
        };
        let params = SimulationParameters {
            topology,
            simdir: outdir.clone(),
            prefix,
            temp1: self.temp1,
            temp2: self.temp2,
            force: self.force,
            toppar,
            charmm_ff: self.charmm_ff,
            year: current_year(),
            amberhome,
        };
        tracing::debug!("{params:?}");

        let summary = pipeline::render_selection(
            &library,
            &TeraEngine,
            &params.to_render_request(),
            &outdir,
            self.program,
            self.selection,
            &RenderOptions::default(),
        )
        .with_context(|| {
            format!(
                "failed to create {} {} files in '{}'",
                self.program,
                self.selection,
                outdir.display()
            )
        })?;

        println!(
            "{} Wrote {} {} file(s) for {} in '{}'",
            "✓".green().bold(),
            summary.files().count(),
            self.selection,
            self.program,
            outdir.display()
        );
        for phase in &summary.phases {
            println!("  {}: {} file(s)", phase.output_dir.display(), phase.files.len());
        }
        Ok(())
    }
}
