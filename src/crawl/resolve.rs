// src/crawl/resolve.rs
// =============================================================================
// Turning extracted links into absolute URLs, and deciding which of them
// belong to the site being crawled.
//
// Resolution follows standard URI reference rules (RFC 3986, the same rules a
// browser uses): relative links inherit scheme and host from the page they
// were found on, absolute links pass through.
//
// URLs are compared as text, so the result keeps what the page author wrote:
// an absolute link is recorded verbatim, and a relative one keeps the page's
// scheme and authority exactly as the page URL spells them. The `url` crate
// only validates and merges paths; its canonical form (lowercase host, no
// default port, added root "/") never leaks into the output.
//
// "Internal" means the hostname matches the crawl's starting URL exactly,
// case included. Scheme and port are ignored, subdomains are NOT internal.
// =============================================================================

use crate::error::{Error, Result};
use url::{Position, Url};

// Resolves `link` against the page URL `base`
//
// Examples:
//   resolve("/about", "https://example.com")          -> "https://example.com/about"
//   resolve("#section", "https://example.com/page")   -> "https://example.com/page#section"
//   resolve("../parent", "https://example.com/sub/p") -> "https://example.com/parent"
pub fn resolve(link: &str, base: &str) -> Result<String> {
    let parsed = Url::parse(base).map_err(|source| Error::InvalidUrl {
        url: base.to_string(),
        source,
    })?;
    resolve_against(&parsed, base, link)
}

/// Same as [`resolve`] with the page URL already parsed.
///
/// `page_text` is the page URL as it was written; `page` is its parsed form.
pub fn resolve_against(page: &Url, page_text: &str, link: &str) -> Result<String> {
    let fail = || Error::Resolve {
        link: link.to_string(),
        base: page_text.to_string(),
    };

    if has_malformed_scheme(link) {
        return Err(fail());
    }

    // Validates the reference and does the path merging
    let joined = page.join(link).map_err(|_| fail())?;

    if split_scheme(link).is_some() {
        return Ok(link.to_string());
    }

    let Some((scheme, _)) = split_scheme(page_text) else {
        return Ok(joined.into());
    };

    if link.starts_with("//") {
        // Scheme-relative: only the scheme comes from the page
        return Ok(format!("{}:{}", scheme, link));
    }

    match origin_text(page_text) {
        Some(origin) => Ok(format!("{}{}", origin, &joined[Position::BeforePath..])),
        None => Ok(joined.into()),
    }
}

// True when `link` is internal to the site that `base` belongs to
//
// Unparsable URLs on either side are never internal.
pub fn is_internal(link: &str, base: &str) -> bool {
    if Url::parse(link).is_err() || Url::parse(base).is_err() {
        return false;
    }
    host_text(base).is_some_and(|host| is_internal_to(link, host))
}

pub(crate) fn is_internal_to(link: &str, base_host: &str) -> bool {
    host_text(link) == Some(base_host)
}

// The hostname of an absolute URL, exactly as written
//
//   "https://user@Example.com:8080/x" -> Some("Example.com")
//   "http://[::1]:80/"                -> Some("[::1]")
pub(crate) fn host_text(url: &str) -> Option<&str> {
    let (_, rest) = split_scheme(url)?;
    let authority = authority_of(rest)?;

    let host_port = authority.rsplit_once('@').map_or(authority, |(_, host)| host);
    let host = if host_port.starts_with('[') {
        &host_port[..=host_port.find(']')?]
    } else {
        host_port.split_once(':').map_or(host_port, |(host, _)| host)
    };

    (!host.is_empty()).then_some(host)
}

// "scheme://authority" of an absolute URL, as written
fn origin_text(url: &str) -> Option<&str> {
    let (scheme, rest) = split_scheme(url)?;
    let authority = authority_of(rest)?;
    Some(&url[..scheme.len() + 3 + authority.len()])
}

// The authority part of "//authority/path..."
fn authority_of(after_scheme: &str) -> Option<&str> {
    let rest = after_scheme.strip_prefix("//")?;
    let end = rest.find(['/', '?', '#']).unwrap_or(rest.len());
    Some(&rest[..end])
}

// Splits "scheme:rest" when `link` starts with a valid scheme
fn split_scheme(link: &str) -> Option<(&str, &str)> {
    let end = link.find([':', '/', '?', '#'])?;
    if !link[end..].starts_with(':') {
        return None;
    }
    let scheme = &link[..end];
    is_valid_scheme(scheme).then(|| (scheme, &link[end + 1..]))
}

fn is_valid_scheme(scheme: &str) -> bool {
    let mut chars = scheme.chars();
    chars.next().is_some_and(|c| c.is_ascii_alphabetic())
        && chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'))
}

// A reference whose first segment contains ':' must start with a valid
// scheme. "ht tp://x" or ":bad" are not relative paths, they are garbage,
// and joining them would silently produce a URL nobody wrote.
fn has_malformed_scheme(link: &str) -> bool {
    let Some(end) = link.find([':', '/', '?', '#']) else {
        return false;
    };
    link[end..].starts_with(':') && !is_valid_scheme(&link[..end])
}
