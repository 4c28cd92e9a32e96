//! `mdsetup init [-o DIR]`

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;

use mdsetup_core::layout::{create_skeleton, DEFAULT_DIR_MODE};

use crate::logging::LogArgs;

/// Create an empty simulation directory tree.
#[derive(Args, Debug)]
pub struct InitArgs {
    /// Root of the new simulation tree.
    #[arg(short = 'o', long = "outdir", value_name = "DIR", default_value = "amber")]
    pub outdir: PathBuf,

    #[command(flatten)]
    pub log: LogArgs,
}

impl InitArgs {
    pub fn run(self) -> Result<()> {
        let created = create_skeleton(&self.outdir, DEFAULT_DIR_MODE).with_context(|| {
            format!("failed to create project tree in '{}'", self.outdir.display())
        })?;

        println!(
            "✓ Created {} directories under '{}'",
            created.len(),
            self.outdir.display()
        );
        Ok(())
    }
}
