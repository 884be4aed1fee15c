// src/checker/http.rs
// =============================================================================
// This module checks if URLs are alive by making HTTP requests.
//
// Key functionality:
// - One probe (GET by default, HEAD on request) per URL
// - Redirects are followed; only the final response counts
// - A URL is dead if the request can't be built, the network call fails
//   (timeout, refused, DNS...), or the final status is 400 or above
// - Probes run concurrently, capped at `concurrency` in flight
// - Nothing is retried and nothing is cached between calls
//
// Rust concepts:
// - async/await: For concurrent network I/O
// - Enums: To represent different link states
// - Streams: For processing many items concurrently
// =============================================================================

use crate::config::{DuplicatePolicy, ProbeSettings};
use crate::error::{Error, Result};
use futures::stream::{self, StreamExt}; // StreamExt gives us .buffer_unordered()
use reqwest::{redirect, Client};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use tracing::{debug, info};

// Represents the outcome of probing a link
//
// #[derive(Serialize, Deserialize)] lets us convert to/from JSON
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum LinkStatus {
    /// Final response below 400 (2xx, or a 3xx that wasn't followed further)
    Alive { code: u16 },
    /// Final response 400 or above
    HttpError { code: u16 },
    /// Request timed out
    Timeout,
    /// Redirect loop or too many hops
    TooManyRedirects,
    /// Could not resolve hostname
    DnsError,
    /// Connection refused, reset, unreachable...
    ConnectError,
    /// SSL/TLS certificate error
    SslError,
    /// The request could not even be built (malformed URL)
    InvalidRequest,
    /// Other error
    Error,
}

// The result of probing a single URL
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProbeResult {
    /// The URL that was checked
    pub url: String,
    /// The status of the link
    #[serde(flatten)] // This merges the LinkStatus fields into ProbeResult
    pub status: LinkStatus,
    /// Optional message with more details
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl ProbeResult {
    /// Everything except an Alive response counts as dead
    pub fn is_dead(&self) -> bool {
        !matches!(self.status, LinkStatus::Alive { .. })
    }
}

// Probes URLs for liveness
//
// Build one per run and reuse it: the client keeps a connection pool.
#[derive(Debug, Clone)]
pub struct LivenessChecker {
    client: Client,
    settings: ProbeSettings,
}

impl LivenessChecker {
    pub fn new(settings: ProbeSettings) -> Result<Self> {
        let client = Client::builder()
            .timeout(settings.timeout)
            .user_agent(settings.user_agent.as_str())
            .redirect(redirect::Policy::limited(settings.max_redirects))
            .build()
            .map_err(Error::Client)?;

        Ok(Self { client, settings })
    }

    // Returns the URLs from `urls` that are dead
    //
    // The result is a subset of the input, in completion order (not input
    // order). With DuplicatePolicy::ProbeEach a dead URL that appears twice
    // in the input appears twice here.
    pub async fn check_all(&self, urls: &[String]) -> Vec<String> {
        self.probe_all(urls)
            .await
            .into_iter()
            .filter(ProbeResult::is_dead)
            .map(|result| result.url)
            .collect()
    }

    // Probes every URL and returns the full results, dead or alive
    //
    // Returns only once every probe has finished.
    pub async fn probe_all(&self, urls: &[String]) -> Vec<ProbeResult> {
        let targets = self.targets(urls);
        let limit = self.settings.concurrency.max(1);

        info!(
            total = urls.len(),
            probes = targets.len(),
            concurrency = limit,
            "checking links"
        );

        // Create a stream of futures
        // Each future represents checking one URL
        let probes = targets.into_iter().map(|url| self.probe(url));

        // Run up to `limit` probes at once and gather results as they finish.
        // collect() only resolves after the last probe, and the Vec it builds
        // is the one place results are written to.
        let results: Vec<ProbeResult> = stream::iter(probes)
            .buffer_unordered(limit)
            .collect()
            .await;

        let dead = results.iter().filter(|r| r.is_dead()).count();
        info!(checked = results.len(), dead, "link check complete");
        results
    }

    // Applies the duplicate policy to the input list
    fn targets(&self, urls: &[String]) -> Vec<String> {
        match self.settings.duplicates {
            DuplicatePolicy::ProbeEach => urls.to_vec(),
            DuplicatePolicy::ProbeOnce => {
                let mut seen = HashSet::new();
                urls.iter()
                    .filter(|url| seen.insert(*url))
                    .cloned()
                    .collect()
            }
        }
    }

    // Checks a single link
    async fn probe(&self, url: String) -> ProbeResult {
        // Building first separates "this isn't a URL" from network failures
        let request = match self
            .client
            .request(self.settings.method.as_method(), url.as_str())
            .build()
        {
            Ok(request) => request,
            Err(e) => {
                debug!(url = %url, error = %e, "could not build request");
                return ProbeResult {
                    url,
                    status: LinkStatus::InvalidRequest,
                    message: Some(e.to_string()),
                };
            }
        };

        let result = match self.client.execute(request).await {
            Ok(response) => analyze_status(url, response.status().as_u16()),
            Err(e) => categorize_error(url, e),
        };

        debug!(url = %result.url, status = ?result.status, "probe finished");
        result
    }
}

// Classifies the final HTTP status code
//
// Anything below 400 is alive. A 3xx only gets here when there was nothing
// to follow (e.g. no Location header).
fn analyze_status(url: String, code: u16) -> ProbeResult {
    let status = if code >= 400 {
        LinkStatus::HttpError { code }
    } else {
        LinkStatus::Alive { code }
    };

    ProbeResult {
        url,
        status,
        message: Some(format!("HTTP {}", code)),
    }
}

// Categorizes different error types from reqwest
//
// reqwest errors can happen for many reasons:
// - Network timeout
// - DNS resolution failure
// - SSL certificate issues
// - Too many redirects
// - etc.
fn categorize_error(url: String, error: reqwest::Error) -> ProbeResult {
    // Look at the whole chain: the interesting part is usually a source error
    let error_string = error_chain(&error).to_lowercase();

    let (status, message) = if error.is_timeout() {
        (LinkStatus::Timeout, "Request timed out".to_string())
    } else if error.is_redirect() {
        (LinkStatus::TooManyRedirects, "Too many redirects".to_string())
    } else if error.is_connect() {
        if error_string.contains("dns") {
            (LinkStatus::DnsError, "Could not resolve hostname".to_string())
        } else {
            (LinkStatus::ConnectError, "Connection failed".to_string())
        }
    } else if error_string.contains("certificate") || error_string.contains("ssl") {
        (LinkStatus::SslError, "SSL certificate error".to_string())
    } else {
        (LinkStatus::Error, error_string)
    };

    ProbeResult {
        url,
        status,
        message: Some(message),
    }
}

fn error_chain(error: &dyn std::error::Error) -> String {
    let mut text = error.to_string();
    let mut source = error.source();
    while let Some(inner) = source {
        text.push_str(": ");
        text.push_str(&inner.to_string());
        source = inner.source();
    }
    text
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. Where is the Mutex?
//    - There isn't one. buffer_unordered() polls all running probes from a
//      single task and hands finished results to collect() one at a time
//    - Only one piece of code ever pushes into the Vec, so nothing needs
//      locking
//
// 2. Why does buffer_unordered bound concurrency?
//    - It starts at most `limit` futures, and only pulls the next URL from
//      the iterator when one of them finishes
//    - 10,000 URLs never means 10,000 open sockets
//
// 3. Why build() the request before execute()?
//    - client.get(url).send() would also fail on a bad URL, but we couldn't
//      tell that failure apart from a network failure
// -----------------------------------------------------------------------------
