// src/crawl/fetch.rs
// =============================================================================
// This module downloads pages for the crawler.
//
// A page counts only if the server answers exactly 200 OK. Anything else,
// redirects included, is a failed fetch and the crawler abandons that branch.
// (Set follow_redirects to let reqwest chase redirects first; the final
// answer still has to be 200.)
//
// Rust concepts:
// - async functions: For network I/O
// - Result: For error handling
// - map_err: To wrap library errors in our own error type
// =============================================================================

use crate::config::CrawlSettings;
use crate::error::{Error, Result};
use reqwest::{redirect, Client, StatusCode};
use tracing::debug;

// Retrieves raw page content over HTTP
//
// Cloning is cheap: the inner reqwest Client is reference counted.
#[derive(Debug, Clone)]
pub struct PageFetcher {
    client: Client,
}

impl PageFetcher {
    // Builds a fetcher from crawl settings
    //
    // Fails only if reqwest cannot build a client (e.g. TLS backend setup)
    pub fn new(settings: &CrawlSettings) -> Result<Self> {
        let redirect_policy = if settings.follow_redirects {
            redirect::Policy::limited(10)
        } else {
            redirect::Policy::none()
        };

        let mut builder = Client::builder()
            .user_agent(settings.user_agent.as_str())
            .redirect(redirect_policy);

        if let Some(timeout) = settings.fetch_timeout {
            builder = builder.timeout(timeout);
        }

        let client = builder.build().map_err(Error::Client)?;
        Ok(Self { client })
    }

    // Fetches a web page and returns its body as text
    //
    // Errors:
    //   Error::Request - could not connect / send (includes malformed URLs)
    //   Error::Status  - any status other than 200
    //   Error::Body    - connection dropped while reading the body
    pub async fn fetch(&self, url: &str) -> Result<String> {
        debug!(url, "fetching page");

        let response = self.client.get(url).send().await?;

        let status = response.status();
        if status != StatusCode::OK {
            return Err(Error::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        response.text().await.map_err(|source| Error::Body {
            url: url.to_string(),
            source,
        })
    }
}
