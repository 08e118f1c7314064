//! searxng-cli: query a SearXNG instance from the command line
//!
//! Prints exactly one JSON document to stdout; logs go to stderr.

use anyhow::Result;
use clap::Parser;
use searxng_cli::cli::Cli;
use tracing::debug;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    debug!("Starting searxng-cli v{}", searxng_cli::VERSION);

    let output = cli.run().await?;
    println!("{}", output);

    Ok(())
}
