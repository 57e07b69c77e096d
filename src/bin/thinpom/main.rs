//! thinpom CLI - rewrite Maven manifests from override directives

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
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("thinpom=debug")
    } else {
        EnvFilter::new("thinpom=info")
    };

    // Logs go to stderr; stdout carries only the rewritten manifest.
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .with_ansi(!cli.no_color)
        .with_writer(std::io::stderr)
        .init();

    let color = !cli.no_color;

    match cli.command {
        Commands::Rewrite(args) => commands::rewrite::execute(args, color),
        Commands::Coords(args) => commands::coords::execute(args, color),
    }
}
