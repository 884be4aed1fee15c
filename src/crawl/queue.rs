// src/crawl/queue.rs
// =============================================================================
// This module implements the website crawl.
//
// How it works:
// 1. Fetch the starting page (depth 0) and extract its links
// 2. Resolve each link against the page it was found on
// 3. Record every resolved link, internal or external, in discovery order
// 4. Internal links (same hostname as the start URL) are expanded in turn,
//    one hop deeper; external links are only recorded
// 5. A page is expanded at most once, and never past max_depth
//
// The frontier is explicit rather than recursive:
// - DepthFirst keeps a stack of pages, each with the links it has left to
//   process. Following a link pushes the new page on top, so links come out
//   in exactly the order a recursive walk would produce.
// - BreadthFirst keeps a FIFO queue of (url, depth) pairs, like a classic BFS.
//
// Nothing in here is allowed to fail the crawl. A page that cannot be fetched
// or a link that cannot be resolved is logged and skipped; the worst outcome
// is a shorter list.
//
// Rust concepts:
// - HashSet: To track visited URLs (O(1) lookup)
// - Vec as a stack, VecDeque as a queue
// - vec::IntoIter: An iterator that remembers where it stopped
// =============================================================================

use crate::checker::extract_links;
use crate::config::{CrawlSettings, TraversalOrder};
use crate::crawl::fetch::PageFetcher;
use crate::crawl::resolve::{host_text, is_internal_to, resolve_against};
use crate::error::Result;
use std::collections::{HashSet, VecDeque};
use tracing::{debug, info, warn};
use url::Url;

pub struct Crawler {
    fetcher: PageFetcher,
    settings: CrawlSettings,
}

// A fetched page whose links still need processing
struct Frame {
    page: Url,
    // The page URL as recorded; relative links inherit its spelling
    text: String,
    links: std::vec::IntoIter<String>,
    depth: i32,
}

// Bookkeeping for one crawl() call; dropped when the crawl ends
struct CrawlState {
    base_host: Option<String>,
    visited: HashSet<String>,
    discovered: Vec<String>,
}

impl Crawler {
    pub fn new(settings: CrawlSettings) -> Result<Self> {
        let fetcher = PageFetcher::new(&settings)?;
        Ok(Self { fetcher, settings })
    }

    // Crawls a website starting from a URL
    //
    // Parameters:
    //   start_url: The URL to start crawling from (also defines "internal")
    //
    // Returns: every absolute URL found on every expanded page, in discovery
    // order. Not deduplicated: a link that appears on three pages is listed
    // three times.
    pub async fn crawl(&self, start_url: &str) -> Vec<String> {
        if let Err(e) = Url::parse(start_url) {
            warn!(url = start_url, error = %e, "invalid start URL, nothing to crawl");
            return Vec::new();
        }

        info!(
            url = start_url,
            max_depth = self.settings.max_depth,
            order = ?self.settings.order,
            "starting crawl"
        );

        let mut state = CrawlState {
            // Compared as written, so "Example.com" is a different site
            base_host: host_text(start_url).map(str::to_string),
            visited: HashSet::new(),
            discovered: Vec::new(),
        };

        match self.settings.order {
            TraversalOrder::DepthFirst => self.depth_first(start_url, &mut state).await,
            TraversalOrder::BreadthFirst => self.breadth_first(start_url, &mut state).await,
        }

        info!(
            pages = state.visited.len(),
            links = state.discovered.len(),
            "crawl complete"
        );
        state.discovered
    }

    async fn depth_first(&self, start_url: &str, state: &mut CrawlState) {
        let mut stack = Vec::new();
        if let Some(frame) = self.expand(start_url, 0, state).await {
            stack.push(frame);
        }

        while let Some(frame) = stack.last_mut() {
            let Some(link) = frame.links.next() else {
                // Every link on this page handled, back to the page below
                stack.pop();
                continue;
            };
            let depth = frame.depth;

            if let Some(internal) = Self::record(&frame.page, &frame.text, &link, state) {
                if let Some(next) = self.expand(&internal, depth.saturating_add(1), state).await {
                    stack.push(next);
                }
            }
        }
    }

    async fn breadth_first(&self, start_url: &str, state: &mut CrawlState) {
        let mut queue = VecDeque::new();
        queue.push_back((start_url.to_string(), 0));

        while let Some((url, depth)) = queue.pop_front() {
            let Some(frame) = self.expand(&url, depth, state).await else {
                continue;
            };

            for link in frame.links {
                if let Some(internal) = Self::record(&frame.page, &frame.text, &link, state) {
                    queue.push_back((internal, depth.saturating_add(1)));
                }
            }
        }
    }

    // Fetches a page and extracts its links, unless the depth limit or the
    // visited set says otherwise
    //
    // Returns None when the page is skipped or its branch is abandoned.
    async fn expand(&self, url: &str, depth: i32, state: &mut CrawlState) -> Option<Frame> {
        if depth > self.settings.max_depth {
            return None;
        }

        // insert() returns false when the URL was already there
        if !state.visited.insert(url.to_string()) {
            return None;
        }

        debug!(url, depth, "crawling");

        let html = match self.fetcher.fetch(url).await {
            Ok(html) => html,
            Err(e) => {
                warn!(url, error = %e, "failed to fetch page, skipping branch");
                return None;
            }
        };

        let page = match Url::parse(url) {
            Ok(page) => page,
            Err(e) => {
                debug!(url, error = %e, "page URL cannot anchor relative links");
                return None;
            }
        };

        let links = extract_links(&html);
        debug!(url, count = links.len(), "links extracted");

        Some(Frame {
            page,
            text: url.to_string(),
            links: links.into_iter(),
            depth,
        })
    }

    // Resolves one link, records it, and returns it again if it should be
    // crawled (i.e. it is internal)
    fn record(page: &Url, page_text: &str, link: &str, state: &mut CrawlState) -> Option<String> {
        let resolved = match resolve_against(page, page_text, link) {
            Ok(url) => url,
            Err(e) => {
                debug!(error = %e, "skipping link");
                return None;
            }
        };

        let internal = state
            .base_host
            .as_deref()
            .is_some_and(|host| is_internal_to(&resolved, host));

        state.discovered.push(resolved.clone());

        internal.then_some(resolved)
    }
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. Why not just write a recursive async fn?
//    - Recursive async functions need boxing (Box::pin) because the future
//      would otherwise contain itself
//    - The call stack grows with every hop; an explicit Vec does not care
//    - Swapping stack for queue turns depth-first into breadth-first
//
// 2. What does stack.last_mut() give us?
//    - A mutable reference to the top frame, without removing it
//    - We advance its link iterator in place and only pop() once it's empty
//
// 3. Why does HashSet::insert() double as the "visited?" check?
//    - insert() returns true if the value was new, false if already present
//    - One hash lookup instead of contains() followed by insert()
//
// 4. What is bool::then_some?
//    - true.then_some(x) is Some(x), false.then_some(x) is None
// -----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::{
        matchers::{method, path},
        Mock, MockServer, ResponseTemplate,
    };

    // Serves `body` as an HTML page at `route`, expecting exactly `hits` fetches
    async fn mount_page(server: &MockServer, route: &str, body: &str, hits: u64) {
        Mock::given(method("GET"))
            .and(path(route))
            .respond_with(
                ResponseTemplate::new(200)
                    .insert_header("content-type", "text/html")
                    .set_body_string(body),
            )
            .expect(hits)
            .mount(server)
            .await;
    }

    fn crawler(max_depth: i32, order: TraversalOrder) -> Crawler {
        let settings = CrawlSettings::default()
            .with_max_depth(max_depth)
            .with_order(order);
        Crawler::new(settings).unwrap()
    }

    #[tokio::test]
    async fn test_negative_depth_returns_nothing() {
        let mock_server = MockServer::start().await;
        mount_page(&mock_server, "/", r#"<a href="/a">A</a>"#, 0).await;

        let start = format!("{}/", mock_server.uri());
        let links = crawler(-1, TraversalOrder::DepthFirst).crawl(&start).await;

        assert!(links.is_empty());
    }

    #[tokio::test]
    async fn test_invalid_start_url_returns_nothing() {
        let links = crawler(2, TraversalOrder::DepthFirst)
            .crawl("not-a-valid-url")
            .await;
        assert!(links.is_empty());
    }

    #[tokio::test]
    async fn test_depth_zero_records_but_does_not_follow() {
        let mock_server = MockServer::start().await;
        let uri = mock_server.uri();

        mount_page(&mock_server, "/", r#"<a href="/a">A</a><a href="/b">B</a>"#, 1).await;
        mount_page(&mock_server, "/a", "", 0).await;
        mount_page(&mock_server, "/b", "", 0).await;

        let links = crawler(0, TraversalOrder::DepthFirst)
            .crawl(&format!("{}/", uri))
            .await;

        assert_eq!(links, vec![format!("{}/a", uri), format!("{}/b", uri)]);
    }

    #[tokio::test]
    async fn test_each_page_fetched_once() {
        let mock_server = MockServer::start().await;
        let uri = mock_server.uri();

        // "/" and "/a" link to each other and to themselves
        mount_page(&mock_server, "/", r#"<a href="/a">A</a><a href="/">Home</a>"#, 1).await;
        mount_page(&mock_server, "/a", r#"<a href="/">Home</a><a href="/a">A</a>"#, 1).await;

        let links = crawler(5, TraversalOrder::DepthFirst)
            .crawl(&format!("{}/", uri))
            .await;

        // Every occurrence is recorded even though nothing is fetched twice
        let home = format!("{}/", uri);
        let a = format!("{}/a", uri);
        assert_eq!(links, vec![a.clone(), home.clone(), a, home]);
    }

    #[tokio::test]
    async fn test_depth_first_order() {
        let mock_server = MockServer::start().await;
        let uri = mock_server.uri();

        mount_page(&mock_server, "/", r#"<a href="/a">A</a><a href="/b">B</a>"#, 1).await;
        mount_page(&mock_server, "/a", r#"<a href="/c">C</a>"#, 1).await;
        mount_page(&mock_server, "/b", "", 1).await;
        mount_page(&mock_server, "/c", "", 1).await;

        let links = crawler(2, TraversalOrder::DepthFirst)
            .crawl(&format!("{}/", uri))
            .await;

        assert_eq!(
            links,
            vec![
                format!("{}/a", uri),
                format!("{}/c", uri),
                format!("{}/b", uri),
            ]
        );
    }

    #[tokio::test]
    async fn test_breadth_first_order() {
        let mock_server = MockServer::start().await;
        let uri = mock_server.uri();

        mount_page(&mock_server, "/", r#"<a href="/a">A</a><a href="/b">B</a>"#, 1).await;
        mount_page(&mock_server, "/a", r#"<a href="/c">C</a>"#, 1).await;
        mount_page(&mock_server, "/b", "", 1).await;
        mount_page(&mock_server, "/c", "", 1).await;

        let links = crawler(2, TraversalOrder::BreadthFirst)
            .crawl(&format!("{}/", uri))
            .await;

        assert_eq!(
            links,
            vec![
                format!("{}/a", uri),
                format!("{}/b", uri),
                format!("{}/c", uri),
            ]
        );
    }

    #[tokio::test]
    async fn test_external_links_recorded_not_fetched() {
        let mock_server = MockServer::start().await;
        let uri = mock_server.uri();
        let port = mock_server.address().port();

        // Same server under another hostname counts as a different site
        let html = format!(
            r#"<a href="http://localhost:{port}/ext">Ext</a>
               <a href="https://sub.example.com/x">Sub</a>
               <a href="page.html">Bare</a>"#
        );
        mount_page(&mock_server, "/", &html, 1).await;
        mount_page(&mock_server, "/ext", "", 0).await;

        let links = crawler(3, TraversalOrder::DepthFirst)
            .crawl(&format!("{}/", uri))
            .await;

        assert_eq!(
            links,
            vec![
                format!("http://localhost:{}/ext", port),
                "https://sub.example.com/x".to_string(),
                "http://page.html".to_string(),
            ]
        );
    }

    #[tokio::test]
    async fn test_broken_page_does_not_stop_crawl() {
        let mock_server = MockServer::start().await;
        let uri = mock_server.uri();

        mount_page(
            &mock_server,
            "/",
            r#"<a href="/broken">Broken</a><a href="/ok">Ok</a>"#,
            1,
        )
        .await;
        Mock::given(method("GET"))
            .and(path("/broken"))
            .respond_with(ResponseTemplate::new(500))
            .expect(1)
            .mount(&mock_server)
            .await;
        mount_page(&mock_server, "/ok", r#"<a href="/leaf">Leaf</a>"#, 1).await;
        mount_page(&mock_server, "/leaf", "", 1).await;

        let links = crawler(2, TraversalOrder::DepthFirst)
            .crawl(&format!("{}/", uri))
            .await;

        assert_eq!(
            links,
            vec![
                format!("{}/broken", uri),
                format!("{}/ok", uri),
                format!("{}/leaf", uri),
            ]
        );
    }

    #[tokio::test]
    async fn test_unreachable_start_page_returns_nothing() {
        let links = crawler(2, TraversalOrder::DepthFirst)
            .crawl("http://127.0.0.1:1/")
            .await;
        assert!(links.is_empty());
    }
    #[tokio::test]
    async fn test_links_recorded_as_written_and_host_case_matters() {
        let mock_server = MockServer::start().await;
        let port = mock_server.address().port();

        let html = format!(
            r#"<a href="http://LocalHost:{port}/upper">Upper</a>
               <a href="http://example.com:80/p">Default port</a>
               <a href="other.org">Bare host</a>
               <a href="/lower">Lower</a>"#
        );
        mount_page(&mock_server, "/", &html, 1).await;
        // Same server, but "LocalHost" is not the hostname the crawl started on
        mount_page(&mock_server, "/upper", "", 0).await;
        mount_page(&mock_server, "/lower", "", 1).await;

        let links = crawler(2, TraversalOrder::DepthFirst)
            .crawl(&format!("http://localhost:{}/", port))
            .await;

        assert_eq!(
            links,
            vec![
                format!("http://LocalHost:{}/upper", port),
                "http://example.com:80/p".to_string(),
                "http://other.org".to_string(),
                format!("http://localhost:{}/lower", port),
            ]
        );
    }

    #[tokio::test]
    async fn test_unresolvable_link_does_not_affect_siblings() {
        let mock_server = MockServer::start().await;
        let uri = mock_server.uri();

        mount_page(
            &mock_server,
            "/",
            r#"<a href="/first">First</a>
               <a href="http://#top">No host</a>
               <a href="http://a:bad/">Bad port</a>
               <a href="/second">Second</a>"#,
            1,
        )
        .await;
        mount_page(&mock_server, "/first", "", 1).await;
        mount_page(&mock_server, "/second", "", 1).await;

        let links = crawler(2, TraversalOrder::DepthFirst)
            .crawl(&format!("{}/", uri))
            .await;

        assert_eq!(links, vec![format!("{}/first", uri), format!("{}/second", uri)]);
    }

    #[tokio::test]
    async fn test_fragment_and_query_only_hrefs_are_dropped() {
        let mock_server = MockServer::start().await;
        let uri = mock_server.uri();

        // The extractor turns these into "http://#top" and "http://?q=1",
        // which have no host and cannot be resolved
        mount_page(
            &mock_server,
            "/",
            r##"<a href="#top">Top</a><a href="?q=1">Query</a><a href="/real">Real</a>"##,
            1,
        )
        .await;
        mount_page(&mock_server, "/real", "", 1).await;

        let links = crawler(2, TraversalOrder::DepthFirst)
            .crawl(&format!("{}/", uri))
            .await;

        assert_eq!(links, vec![format!("{}/real", uri)]);
    }
}
