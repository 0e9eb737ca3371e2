//! Command-line entry point: strips markup from one file into another.

use std::process::ExitCode;

use clap::Parser;

mod cli;

fn main() -> anyhow::Result<ExitCode> {
    cli::Cli::parse().run()
}
