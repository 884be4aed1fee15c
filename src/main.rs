// src/main.rs
// =============================================================================
// This is the entry point of our CLI application.
//
// What happens here:
// 1. Set up logging (stderr, filtered by RUST_LOG)
// 2. Parse command-line arguments using clap
// 3. Build the crawler and the checker from those arguments
// 4. Crawl, check, print the dead links
// 5. Exit with proper code (0 = no dead links, 1 = dead links, 2 = error)
//
// All the real work lives in the library (src/lib.rs); this file only wires
// it to the terminal.
// =============================================================================

mod cli; // src/cli.rs - command-line parsing

use anyhow::{Context, Result};
use clap::Parser; // Parser trait enables the parse() method
use cli::{CheckArgs, Cli, Commands};
use dead_link_checker::{Crawler, LivenessChecker};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    init_logging();

    let exit_code = match run().await {
        Ok(code) => code,
        Err(e) => {
            // If an unexpected error occurred, print it and exit with code 2
            eprintln!("Error: {:#}", e);
            2
        }
    };

    std::process::exit(exit_code);
}

// Logs go to stderr so that stdout carries nothing but the report
fn init_logging() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

// Returns:
//   Ok(0) = no dead links
//   Ok(1) = dead links found
//   Err = unexpected error
async fn run() -> Result<i32> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Check(args) => handle_check(&args).await,
    }
}

// Handles the 'check' subcommand
async fn handle_check(args: &CheckArgs) -> Result<i32> {
    let crawler = Crawler::new(args.crawl_settings()).context("failed to set up crawler")?;
    let checker =
        LivenessChecker::new(args.probe_settings()).context("failed to set up link checker")?;

    // In JSON mode stdout must stay parseable, so no banner lines
    if !args.json {
        println!("Checking {}", args.url);
    }
    let links = crawler.crawl(&args.url).await;
    tracing::info!(count = links.len(), "links discovered");

    if !args.json {
        println!("Collecting dead URLs:");
    }
    let dead_count = if args.json {
        let dead: Vec<_> = checker
            .probe_all(&links)
            .await
            .into_iter()
            .filter(|result| result.is_dead())
            .collect();
        println!("{}", serde_json::to_string_pretty(&dead)?);
        dead.len()
    } else {
        let dead = checker.check_all(&links).await;
        for url in &dead {
            println!("{}", url);
        }
        dead.len()
    };

    if dead_count > 0 {
        Ok(1) // Exit code 1 = dead links found
    } else {
        Ok(0) // Exit code 0 = all good
    }
}
