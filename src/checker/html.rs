// src/checker/html.rs
// =============================================================================
// This module extracts links from HTML pages.
//
// We use the `scraper` crate which:
// - Parses HTML into a DOM (Document Object Model)
// - Supports CSS selectors for finding elements
// - Is built on html5ever (Mozilla's HTML parser)
//
// html5ever never rejects a document. Broken markup is repaired the same way
// a browser would repair it, so extraction is best effort and cannot fail.
//
// Extraction does NOT resolve links. It returns the hrefs exactly as the
// crawler should see them (cleaned up, filtered, scheme added where missing);
// turning them into absolute URLs is the crawler's job, because only the
// crawler knows which page they came from.
//
// Rust concepts:
// - Option<T>: For values that may be filtered out
// - Iterators: For processing collections
// - Closures: Anonymous functions (|x| ...)
// =============================================================================

use scraper::{Html, Selector};

// Schemes that never point at a web page
const IGNORED_SCHEMES: [&str; 3] = ["javascript:", "mailto:", "tel:"];

// References that are kept exactly as written
const KEPT_PREFIXES: [&str; 4] = ["http://", "https://", "/", "../"];

// Extracts all hyperlink references from HTML content
//
// Parameters:
//   html: the HTML content to parse (borrowed as &str)
//
// Returns: Vec<String> of cleaned hrefs, in document order
//
// Example:
//   html = "<a href=' /docs '>Docs</a><a href='mailto:me@x.org'>Mail</a>"
//   result = ["/docs"]
pub fn extract_links(html: &str) -> Vec<String> {
    // Parse the HTML into a document
    let document = Html::parse_document(html);

    // Every <a> element, in document order. Anchors without an href simply
    // yield nothing below.
    // The selector is a constant and known to be valid
    let selector = Selector::parse("a").unwrap();

    document
        .select(&selector)
        // attr() returns the first href; the parser already dropped any
        // duplicate attributes
        .filter_map(|element| element.value().attr("href"))
        .filter_map(clean_href)
        .collect()
}

// Normalizes a single href value
//
// Rules, in order:
//   1. Trim whitespace; empty -> None
//   2. javascript:, mailto:, tel: -> None
//   3. http://, https://, /..., ../... -> kept as is
//   4. Anything else is treated as a bare host and gets "http://" in front
//
// Examples:
//   " http://example.com " -> Some("http://example.com")
//   "example.com"          -> Some("http://example.com")
//   "mailto:me@x.org"      -> None
pub fn clean_href(href: &str) -> Option<String> {
    let href = href.trim();
    if href.is_empty() {
        return None;
    }

    if IGNORED_SCHEMES.iter().any(|scheme| has_prefix_ignore_case(href, scheme)) {
        return None;
    }

    if KEPT_PREFIXES.iter().any(|prefix| href.starts_with(prefix)) {
        return Some(href.to_string());
    }

    Some(format!("http://{}", href))
}

// Scheme names are case-insensitive, so "MAILTO:" is still a mail link
fn has_prefix_ignore_case(value: &str, prefix: &str) -> bool {
    value
        .get(..prefix.len())
        .is_some_and(|head| head.eq_ignore_ascii_case(prefix))
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. What is filter_map?
//    - It maps every item and drops the ones that map to None
//    - Here it does two jobs: skip anchors without an href, then skip hrefs
//      that clean_href() rejects
//
// 2. Why pass clean_href directly instead of |href| clean_href(href)?
//    - A function with the right signature can be used wherever a closure is
//      expected
//
// 3. Why .get(..n) instead of &value[..n]?
//    - Slicing a &str panics if n is not on a character boundary
//    - get() returns None instead, which is what we want for odd input
// -----------------------------------------------------------------------------
