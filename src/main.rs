//! verbump - CLI entry point.

use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use clap::error::ErrorKind;
use tracing_subscriber::EnvFilter;

use verbump::{BumpConfig, IncrementType, run_bump};

const USAGE: &str = "Usage: verbump [major|minor|patch]";

/// Bump the version declared in pyproject.toml, setup.py and Cargo.toml.
#[derive(Parser, Debug)]
#[command(name = "verbump")]
#[command(about = "Bump the version declared in pyproject.toml, setup.py and Cargo.toml")]
#[command(version)]
struct Cli {
    /// Which component to bump: major, minor or patch (case-insensitive)
    increment: String,
}

fn main() -> ExitCode {
    init_tracing();

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => e.exit(),
        Err(_) => {
            println!("{}", USAGE);
            return ExitCode::FAILURE;
        }
    };

    // Validated before any manifest is touched
    let Ok(increment) = cli.increment.parse::<IncrementType>() else {
        println!("Argument must be 'major', 'minor', or 'patch'");
        return ExitCode::FAILURE;
    };

    match run(increment) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            println!("{:#}", e);
            println!("Failed to update version.");
            ExitCode::FAILURE
        }
    }
}

fn run(increment: IncrementType) -> Result<()> {
    let root = std::env::current_dir().context("Failed to resolve the working directory")?;

    let report = run_bump(&BumpConfig { root, increment })?;

    println!("Current version: {}", report.previous);
    println!("New version: {}", report.next);

    Ok(())
}

/// Log to stderr so the stdout report stays clean. Quiet unless `RUST_LOG`
/// asks for more; user-facing diagnostics are printed, not logged.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("error"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
