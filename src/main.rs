//! # esgret CLI

use std::process::ExitCode;

use clap::Parser;

use crate::cli::Commands;

mod cli;

#[derive(Parser)]
#[command(version = env!("CARGO_PKG_VERSION"))]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    esgret::init();

    match &cli.command {
        Commands::Analyze(cmd) => cmd.exec(),
        Commands::Config(cmd) => cmd.exec(),
        Commands::Describe(cmd) => cmd.exec(),
        Commands::Returns(cmd) => cmd.exec(),
    }
}
