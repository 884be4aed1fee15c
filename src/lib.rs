// src/lib.rs
// =============================================================================
// The dead-link-checker core.
//
// Two steps, usually run back to back:
//
//   let crawler = Crawler::new(CrawlSettings::default())?;
//   let links = crawler.crawl("https://example.com/").await;
//
//   let checker = LivenessChecker::new(ProbeSettings::default())?;
//   let dead = checker.check_all(&links).await;
//
// The binary in src/main.rs is a thin layer over exactly this.
// =============================================================================

pub mod checker;
pub mod config;
pub mod crawl;
pub mod error;

pub use checker::{extract_links, LinkStatus, LivenessChecker, ProbeResult};
pub use config::{CrawlSettings, DuplicatePolicy, ProbeMethod, ProbeSettings, TraversalOrder};
pub use crawl::Crawler;
pub use error::{Error, Result};
