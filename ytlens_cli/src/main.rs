use clap::Parser;
use owo_colors::OwoColorize;
use std::process;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod cli;
mod commands;
mod output;

use cli::{Cli, Commands};
use commands::*;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // Logs go to stderr; -v raises the default filter, RUST_LOG overrides both.
    let default_filter = match cli.verbose {
        0 => "ytlens=warn,ytlens_core=warn",
        1 => "ytlens=info,ytlens_core=info",
        _ => "ytlens=debug,ytlens_core=debug",
    };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let result = match &cli.command {
        Commands::Search { query, limit } => search::run(&cli, query, *limit).await,
        Commands::Info { input } => info::run(&cli, input).await,
        Commands::Transcript { input } => transcript::run(&cli, input).await,
    };

    if let Err(e) = result {
        eprintln!("{}: {}", "Error".red().bold(), e);
        process::exit(1);
    }
}
