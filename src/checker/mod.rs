// src/checker/mod.rs
// =============================================================================
// This module contains the link-level logic.
//
// Submodules:
// - html: Extracts and cleans hyperlink references from HTML pages
// - http: Probes URLs to tell live links from dead ones
//
// This file (mod.rs) is the module root - it ties everything together and
// exports the public API that other parts of our application can use.
// =============================================================================

// Declare submodules (tells Rust to include these files)
mod html;
mod http;

// Re-export public items from submodules
// This lets users write `checker::extract_links()` instead of
// `checker::html::extract_links()`
pub use html::{clean_href, extract_links};
pub use http::{LinkStatus, LivenessChecker, ProbeResult};
