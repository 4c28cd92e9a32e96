//! `mdsetup solvate -f STRUCTURE [-s TOPOLOGY] [-o DIR] [--simprog ...]`

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;

use mdsetup_core::environment::resolve_environment;
use mdsetup_core::types::{current_year, DEFAULT_TOPPAR};
use mdsetup_core::{Phase, SimulationProgram, SolvationParameters, TemplateSetId};
use mdsetup_renderer::{pipeline, RenderOptions, TeraEngine};
use mdsetup_runner::CommandRunner;

use super::{existing_dir, existing_file, template_library};
use crate::logging::LogArgs;

/// Render the solvation input and run the program's solvation tool on it.
#[derive(Args, Debug)]
pub struct SolvateArgs {
    /// Structure to neutralize and solvate.
    #[arg(short = 'f', long = "structure", value_name = "STRUCTURE", default_value = "input.pdb")]
    pub structure: PathBuf,

    /// Topology of the structure, for programs whose solvation input needs one.
    #[arg(short = 's', long = "topology", value_name = "TOPOLOGY")]
    pub topology: Option<PathBuf>,

    /// Simulation root; the solvation input goes to `<DIR>/Prep`.
    #[arg(short = 'o', long = "outdir", value_name = "DIR", default_value = ".")]
    pub outdir: PathBuf,

    /// Prefix of the solvated system files.
    #[arg(short = 'p', long = "prefix", value_name = "PREFIX", default_value = "solvated")]
    pub prefix: String,

    /// Minimum distance between the solute and the box edge (Å).
    #[arg(long, value_name = "PADDING", default_value_t = 10.0, allow_negative_numbers = true)]
    pub padding: f64,

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

impl SolvateArgs {
    pub fn run(self) -> Result<()> {
        let structure = existing_file(&self.structure, "structure")?;
        let topology = self
            .topology
            .as_deref()
            .map(|path| existing_file(path, "topology"))
            .transpose()?;
        let outdir = existing_dir(&self.outdir, "output directory")?;
        let library = template_library(self.templates.as_deref())?;
        let amberhome = resolve_environment(self.program)?;
        let log_file = self.log.config("solvate.log").log_file;

        let params = SolvationParameters {
            structure,
            topology,
            simdir: outdir.clone(),
            prefix: self.prefix,
            padding: self.padding,
            toppar: self.toppar,
            charmm_ff: self.charmm_ff,
            year: current_year(),
            amberhome,
        };
        tracing::debug!("{params:?}");

        let output = pipeline::render_phase(
            &library,
            &TeraEngine,
            &params.to_render_request(),
            &outdir,
            TemplateSetId::new(self.program, Phase::Solvate),
            &RenderOptions::default(),
        )
        .with_context(|| {
            format!(
                "failed to write the {} solvation input in '{}'",
                self.program,
                outdir.display()
            )
        })?;

        let command = self.program.solvation_command();
        let runner = CommandRunner::new();
        for input in &output.files {
            runner.run(command, input, &log_file).with_context(|| {
                format!(
                    "solvation of '{}' failed; see '{}'",
                    params.structure.display(),
                    log_file.display()
                )
            })?;
        }

        println!(
            "{} Solvated '{}' with {} ({} input file(s)); output logged to '{}'",
            "✓".green().bold(),
            params.structure.display(),
            command,
            output.files.len(),
            log_file.display()
        );
        Ok(())
    }
}
