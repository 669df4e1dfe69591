//! xdcrepo CLI - Incremental app catalog generator
//!
//! Entry point for the xdcrepo command-line application.

use anyhow::Result;
use clap::Parser;

use xdcrepo::cli::output::{display_error, init_tracing};
use xdcrepo::cli::Cli;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_tracing(cli.verbose, cli.quiet);

    // Run the command and handle errors
    match cli.run().await {
        Ok(()) => Ok(()),
        Err(e) => {
            display_error(&e);
            std::process::exit(1);
        }
    }
}
