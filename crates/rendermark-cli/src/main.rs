mod cli;
mod commands;
mod logging;

use anyhow::Result;
use clap::Parser;

use crate::cli::Cli;

fn main() -> Result<()> {
    logging::init_logging();
    let cli = Cli::parse();
    commands::run(cli.command)
}
