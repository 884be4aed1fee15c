// src/crawl/mod.rs
// =============================================================================
// This module handles website crawling.
//
// Features:
// - Depth-first (default) or breadth-first traversal from a start URL
// - Same-host restriction: only pages on the start URL's hostname are
//   fetched; every other link is recorded but left alone
// - Configurable depth limit
// - Each page fetched at most once per crawl
//
// Submodules:
// - fetch: Downloads one page (200 OK only)
// - resolve: Relative -> absolute URLs, internal vs external
// - queue: The crawl loop itself
// =============================================================================

mod fetch;
mod queue;
mod resolve;

pub use fetch::PageFetcher;
pub use queue::Crawler;
pub use resolve::{is_internal, resolve, resolve_against};
