//! Hypersweep
//!
//! Generate simulation scripts from a hyperparameter sweep.
//!
//! Usage: `hypersweep generate <params> [--manifest FILE] [--out DIR] [--cut-across DIM]...`

use std::process;

use clap::{Parser, Subcommand};
use tracing::error;

use hypersweep_tools::commands::generate::{self, GenerateCommand};
use hypersweep_tools::commands::inspect::{self, InspectCommand};
use hypersweep_tools::commands::points::{self, PointsCommand};

#[derive(Parser, Debug)]
#[command(name = "hypersweep")]
#[command(about = "Enumerate a hyperparameter grid into simulation scripts")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Write one script per batch (or per point)
    Generate(GenerateCommand),
    /// Show dimensions, point count and run id range
    Inspect(InspectCommand),
    /// List every point with its run id and file name
    Points(PointsCommand),
}

fn main() {
    hypersweep_tools::init_logging();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Generate(cmd) => generate::run(cmd).map(|_| ()),
        Commands::Inspect(cmd) => inspect::run(cmd),
        Commands::Points(cmd) => points::run(cmd),
    };

    if let Err(e) = result {
        error!("{}", e);
        process::exit(1);
    }
}
