//! jarwright CLI - compile Java sources and package them as jars

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

mod cli;
mod commands;

use cli::{Cli, Commands};

fn main() {
    if let Err(e) = run() {
        eprintln!("error: {:#}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    // Parse CLI
    let cli = Cli::parse();

    // Set up logging
    let filter = if cli.verbose {
        EnvFilter::new("jarwright=debug")
    } else {
        EnvFilter::new("jarwright=info")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .with_writer(std::io::stderr)
        .init();

    // Execute command
    match cli.command {
        Commands::Compile(args) => commands::compile::execute(args),
        Commands::Package(args) => commands::package::execute(args),
        Commands::Toolchain(args) => commands::toolchain::execute(args),
    }
}
