//! mdsetup: molecular-dynamics input deck scaffolder.
//!
//! # Usage
//!
//! ```text
//! mdsetup init [-o DIR]
//! mdsetup create -s TOPOLOGY [-d DIR] [-p PREFIX] [--type equil|prod|scripts|all]
//!                [--simprog amber|charmm|gromacs] [--temp1 K] [--temp2 K] [--force F]
//! mdsetup solvate -f STRUCTURE [-s TOPOLOGY] [-o DIR] [-p PREFIX] [--padding Å]
//! ```
//!
//! Every command takes `-l/--logfile` and `-v/--verbose`.

mod commands;
mod logging;

use anyhow::Result;
use clap::{Parser, Subcommand};

use commands::{create::CreateArgs, init::InitArgs, solvate::SolvateArgs};
use logging::LoggingConfig;

// ---------------------------------------------------------------------------
// CLI entry point
// ---------------------------------------------------------------------------

#[derive(Parser, Debug)]
#[command(
    name = "mdsetup",
    version,
    about = "Scaffold molecular-dynamics simulation directories and input files",
    long_about = None,
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Create an empty simulation directory tree.
    Init(InitArgs),

    /// Render equilibration/production input files and run scripts.
    Create(CreateArgs),

    /// Render the solvation input and run the program's solvation tool on it.
    Solvate(SolvateArgs),
}

impl Commands {
    fn logging(&self) -> LoggingConfig {
        match self {
            Commands::Init(args) => args.log.config("init.log"),
            Commands::Create(args) => args.log.config("create.log"),
            Commands::Solvate(args) => args.log.config("solvate.log"),
        }
    }
}

// ---------------------------------------------------------------------------
// Main
// ---------------------------------------------------------------------------

fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::setup_logging(&cli.command.logging())?;
    tracing::debug!("mdsetup {}", env!("CARGO_PKG_VERSION"));

    let result = match cli.command {
        Commands::Init(args) => args.run(),
        Commands::Create(args) => args.run(),
        Commands::Solvate(args) => args.run(),
    };
    if let Err(e) = &result {
        tracing::error!("{e:#}");
    }
    result
}
