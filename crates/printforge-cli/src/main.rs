//! Printforge CLI entry point.

use clap::Parser;
use tracing_subscriber::{fmt, EnvFilter};

use printforge_cli::cli::Cli;
use printforge_cli::commands;

fn main() {
    let cli = Cli::parse();

    // Initialize tracing
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(cli.log_level().to_string()));

    fmt().with_env_filter(filter).with_target(false).init();

    let data_dir = cli.data_dir();

    if let Err(e) = commands::execute(cli.command, &data_dir) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
