// src/cli.rs
// =============================================================================
// This file defines our command-line interface using the `clap` crate.
//
// We use the "derive" API which lets us define the CLI structure using
// Rust structs and attributes (the #[...] things).
//
// Every option also reads a DEADLINK_* environment variable, so CI jobs can
// configure the checker without touching the command line. An explicit flag
// always wins over the environment.
// =============================================================================

use clap::{Parser, Subcommand};
use dead_link_checker::{
    CrawlSettings, DuplicatePolicy, ProbeMethod, ProbeSettings, TraversalOrder,
};
use std::time::Duration;

#[derive(Parser, Debug)]
#[command(
    name = "dead-link-checker",
    version,
    about = "Fast, reliable dead link detection for websites",
    long_about = "Dead Link Checker crawls a website to detect broken links. \
                  It follows internal links to map the site, then checks every \
                  link it found for HTTP errors, timeouts and unreachable hosts."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Crawl a website and detect broken links
    ///
    /// Example: dead-link-checker check https://example.com -d 1
    Check(CheckArgs),
}

#[derive(clap::Args, Debug)]
pub struct CheckArgs {
    /// Website URL to start crawling from (e.g., https://example.com)
    pub url: String,

    /// Maximum crawl depth (0 = only the starting page is fetched)
    #[arg(
        short,
        long,
        env = "DEADLINK_DEPTH",
        default_value_t = 2,
        allow_negative_numbers = true
    )]
    pub depth: i32,

    /// Maximum number of link checks in flight at once
    #[arg(long, env = "DEADLINK_CONCURRENCY", default_value_t = 50)]
    pub concurrency: usize,

    /// Per-link timeout in seconds
    #[arg(long, env = "DEADLINK_TIMEOUT", default_value_t = 10)]
    pub timeout: u64,

    /// Per-page timeout in seconds while crawling (0 = no timeout)
    #[arg(long, env = "DEADLINK_FETCH_TIMEOUT", default_value_t = 30)]
    pub fetch_timeout: u64,

    /// Check links with HEAD instead of GET
    #[arg(long, env = "DEADLINK_HEAD")]
    pub head: bool,

    /// Check each distinct link once, even if many pages link to it
    #[arg(long, env = "DEADLINK_DEDUPE")]
    pub dedupe: bool,

    /// Crawl level by level instead of following each link as found
    #[arg(long, env = "DEADLINK_BREADTH_FIRST")]
    pub breadth_first: bool,

    /// Let the crawler follow redirects when fetching pages
    #[arg(long, env = "DEADLINK_FOLLOW_REDIRECTS")]
    pub follow_redirects: bool,

    /// Print dead links as JSON instead of one per line
    #[arg(long)]
    pub json: bool,
}

impl CheckArgs {
    pub fn crawl_settings(&self) -> CrawlSettings {
        let order = if self.breadth_first {
            TraversalOrder::BreadthFirst
        } else {
            TraversalOrder::DepthFirst
        };
        let fetch_timeout = (self.fetch_timeout > 0).then(|| Duration::from_secs(self.fetch_timeout));

        CrawlSettings::default()
            .with_max_depth(self.depth)
            .with_order(order)
            .with_fetch_timeout(fetch_timeout)
            .with_follow_redirects(self.follow_redirects)
    }

    pub fn probe_settings(&self) -> ProbeSettings {
        let method = if self.head { ProbeMethod::Head } else { ProbeMethod::Get };
        let duplicates = if self.dedupe {
            DuplicatePolicy::ProbeOnce
        } else {
            DuplicatePolicy::ProbeEach
        };

        ProbeSettings::default()
            .with_timeout(Duration::from_secs(self.timeout))
            .with_concurrency(self.concurrency)
            .with_method(method)
            .with_duplicates(duplicates)
    }
}
