use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Gap-free daily flow and nutrient series from sparse plant samples.
#[derive(Parser)]
#[command(
    name = "hydrofill",
    version,
    about = "Reconstruct gap-free daily flow and nutrient series"
)]
pub struct Cli {
    /// Increase verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Subcommand to run.
    #[command(subcommand)]
    pub command: Command,
}

/// Available subcommands.
#[derive(Subcommand)]
pub enum Command {
    /// Load site files, reconstruct every series and export the result.
    Synthesize(SynthesizeArgs),
    /// Parse and validate a configuration without touching any data.
    Check(CheckArgs),
}

/// Arguments for the `synthesize` subcommand.
#[derive(clap::Args)]
pub struct SynthesizeArgs {
    /// Path to TOML configuration file.
    #[arg(short, long, default_value = "hydrofill.toml")]
    pub config: PathBuf,

    /// Override output Parquet path from config.
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Re-run on a previously exported Parquet file instead of the site CSVs.
    #[arg(long, value_name = "PARQUET")]
    pub from: Option<PathBuf>,
}

/// Arguments for the `check` subcommand.
#[derive(clap::Args)]
pub struct CheckArgs {
    /// Path to TOML configuration file.
    #[arg(short, long, default_value = "hydrofill.toml")]
    pub config: PathBuf,
}
