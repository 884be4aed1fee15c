// src/config.rs
// =============================================================================
// Settings for the crawler and the liveness checker.
//
// Nothing here is global: the CLI builds one CrawlSettings and one
// ProbeSettings from its flags and hands them to Crawler::new() and
// LivenessChecker::new(). Library users do the same, usually starting from
// Default and tweaking a field or two with the with_* methods.
// =============================================================================

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// User agent sent by the crawler when fetching pages
pub const CRAWLER_USER_AGENT: &str =
    concat!("dead-link-checker/", env!("CARGO_PKG_VERSION"));

/// Browser-like user agent for liveness probes.
///
/// Some sites answer 403 to anything that does not look like a browser,
/// which would make perfectly good links look dead.
pub const BROWSER_USER_AGENT: &str = "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) \
     AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

// How the crawl frontier is consumed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TraversalOrder {
    /// Follow each internal link as soon as it is found (a stack of pages).
    /// Discovery order is per-page document order, depth first.
    #[default]
    DepthFirst,
    /// Finish every page at one depth before going deeper (a FIFO queue)
    BreadthFirst,
}

// Which HTTP method a liveness probe uses
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProbeMethod {
    #[default]
    Get,
    Head,
}

impl ProbeMethod {
    pub fn as_method(self) -> reqwest::Method {
        match self {
            ProbeMethod::Get => reqwest::Method::GET,
            ProbeMethod::Head => reqwest::Method::HEAD,
        }
    }
}

// What to do when the same URL shows up more than once in the input
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DuplicatePolicy {
    /// Probe every occurrence, so a dead URL is reported once per occurrence
    #[default]
    ProbeEach,
    /// Probe the first occurrence only
    ProbeOnce,
}

/// Knobs for Crawler
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CrawlSettings {
    /// Deepest hop count that is still fetched. Negative means nothing is.
    pub max_depth: i32,
    pub order: TraversalOrder,
    /// None leaves the transport default (no timeout at all)
    pub fetch_timeout: Option<Duration>,
    /// When false, a redirect response counts as a failed fetch
    pub follow_redirects: bool,
    pub user_agent: String,
}

impl Default for CrawlSettings {
    fn default() -> Self {
        Self {
            max_depth: 2,
            order: TraversalOrder::DepthFirst,
            fetch_timeout: Some(Duration::from_secs(30)),
            follow_redirects: false,
            user_agent: CRAWLER_USER_AGENT.to_string(),
        }
    }
}

impl CrawlSettings {
    pub fn with_max_depth(mut self, max_depth: i32) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn with_order(mut self, order: TraversalOrder) -> Self {
        self.order = order;
        self
    }

    pub fn with_fetch_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.fetch_timeout = timeout;
        self
    }

    pub fn with_follow_redirects(mut self, follow: bool) -> Self {
        self.follow_redirects = follow;
        self
    }
}

/// Knobs for LivenessChecker
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProbeSettings {
    /// Per-request timeout, covering connect, redirects and headers
    pub timeout: Duration,
    /// Maximum number of probes in flight at once
    pub concurrency: usize,
    pub method: ProbeMethod,
    pub duplicates: DuplicatePolicy,
    /// Redirect hops followed before a probe gives up
    pub max_redirects: usize,
    pub user_agent: String,
}

impl Default for ProbeSettings {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(10),
            concurrency: 50,
            method: ProbeMethod::Get,
            duplicates: DuplicatePolicy::ProbeEach,
            max_redirects: 10,
            user_agent: BROWSER_USER_AGENT.to_string(),
        }
    }
}

impl ProbeSettings {
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// A limit of 0 is bumped to 1 so that checking always makes progress
    pub fn with_concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency.max(1);
        self
    }

    pub fn with_method(mut self, method: ProbeMethod) -> Self {
        self.method = method;
        self
    }

    pub fn with_duplicates(mut self, duplicates: DuplicatePolicy) -> Self {
        self.duplicates = duplicates;
        self
    }
}
