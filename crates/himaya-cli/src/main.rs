//! Himaya CLI binary entrypoint.

use std::io;
use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use himaya_cli::{Cli, OutputFormat, Verdict, commands};

fn main() -> ExitCode {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    match run(&cli) {
        Ok(verdict) => verdict.into(),
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::from(2)
        }
    }
}

fn run(cli: &Cli) -> anyhow::Result<Verdict> {
    let format = OutputFormat::new(cli.format);
    let mut stdout = io::stdout().lock();

    commands::execute(&cli.command, &mut stdout, &format).context("failed to write report")
}
