mod check;
mod cli;
mod config;
mod convert;
mod logging;
mod synthesize;

use std::process;

use anyhow::Result;
use clap::Parser;

use crate::cli::{Cli, Command};

fn main() {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    if let Err(e) = run(cli.command) {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}

fn run(command: Command) -> Result<()> {
    match command {
        Command::Synthesize(args) => synthesize::run(args),
        Command::Check(args) => check::run(args),
    }
}
