// src/error.rs
// =============================================================================
// Error types for the crawling and checking core.
//
// Most of these never reach the user: the crawler swallows fetch and
// resolution errors branch by branch, and the liveness checker folds probe
// failures into a "dead" classification. They still carry enough detail to
// be logged.
// =============================================================================

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    /// The HTTP client could not be built from the given settings
    #[error("failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),

    /// Transport failure while requesting a page
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The page answered, but not with 200 OK
    #[error("HTTP error status code {status} for {url}")]
    Status { url: String, status: u16 },

    /// The response started but the body could not be read
    #[error("HTTP error reading body of {url}: {source}")]
    Body {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("invalid URL '{url}': {source}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },

    /// A link could not be turned into an absolute URL
    #[error("cannot resolve '{link}' against '{base}'")]
    Resolve { link: String, base: String },
}

pub type Result<T> = std::result::Result<T, Error>;
