// src/main.rs
// =============================================================================
// This is the entry point of our CLI application.
//
// What happens here:
// 1. Set up logging
// 2. Parse command-line arguments using clap and build the run config
// 3. Create the save directory and mirror the tree
// 4. Print the statistics and exit (0 = finished, 2 = could not start)
//
// A mirror run that hits failing URLs still exits with 0: failures are
// counted in the summary, not turned into an exit code.
// =============================================================================

// Module declarations - tells Rust about our other source files
mod cli; // src/cli.rs - command-line parsing
mod config; // src/config.rs - RunConfig and Depth
mod crawl; // src/crawl/ - fetching and walking the tree
mod error; // src/error.rs - transport / filesystem errors
mod links; // src/links/ - href extraction and resolution
mod logging; // src/logging.rs - tracing setup
mod mime; // src/mime.rs - navigate / download decision
mod paths; // src/paths.rs - URL to local path mapping
mod stats; // src/stats.rs - run statistics

use anyhow::{Context, Result};
use clap::Parser;
use cli::Cli;

#[tokio::main]
async fn main() {
    logging::init();

    let exit_code = match run().await {
        Ok(()) => 0,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            2
        }
    };

    std::process::exit(exit_code);
}

async fn run() -> Result<()> {
    let cli = Cli::parse();
    let json = cli.json;
    let config = cli.into_config()?;

    // Keep stdout pure JSON when asked for it
    if json {
        eprintln!("{}", config);
    } else {
        println!("{}", config);
    }

    tokio::fs::create_dir_all(&config.save_dir)
        .await
        .with_context(|| format!("Cannot create {}", config.save_dir.display()))?;

    let stats = crawl::run(&config).await?;

    if json {
        println!("{}", stats.to_json()?);
    } else {
        println!();
        print!("{}", stats);
    }

    Ok(())
}
