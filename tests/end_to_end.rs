// End-to-end: crawl a small site, then check everything that was found

use dead_link_checker::{CrawlSettings, Crawler, LivenessChecker, ProbeSettings};
use wiremock::{
    matchers::{method, path},
    Mock, MockServer, ResponseTemplate,
};

async fn mount(server: &MockServer, route: &str, response: ResponseTemplate) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(response)
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_crawl_then_check_reports_only_error_statuses() {
    let mock_server = MockServer::start().await;
    let uri = mock_server.uri();

    let home = r#"<html><body>
        <a href="/alive">Redirects to a live page</a>
        <a href="/moved">Plain redirect</a>
        <a href="/missing">Not found</a>
        <a href="/error">Server error</a>
    </body></html>"#;

    mount(
        &mock_server,
        "/",
        ResponseTemplate::new(200)
            .insert_header("content-type", "text/html")
            .set_body_string(home),
    )
    .await;
    mount(
        &mock_server,
        "/alive",
        ResponseTemplate::new(301).insert_header("Location", format!("{}/accepted", uri).as_str()),
    )
    .await;
    mount(&mock_server, "/accepted", ResponseTemplate::new(202)).await;
    mount(&mock_server, "/moved", ResponseTemplate::new(301)).await;
    mount(&mock_server, "/missing", ResponseTemplate::new(404)).await;
    mount(&mock_server, "/error", ResponseTemplate::new(500)).await;

    let crawler = Crawler::new(CrawlSettings::default()).unwrap();
    let links = crawler.crawl(&format!("{}/", uri)).await;

    assert_eq!(
        links,
        vec![
            format!("{}/alive", uri),
            format!("{}/moved", uri),
            format!("{}/missing", uri),
            format!("{}/error", uri),
        ]
    );

    let checker = LivenessChecker::new(ProbeSettings::default()).unwrap();
    let mut dead = checker.check_all(&links).await;
    dead.sort();

    assert_eq!(dead, vec![format!("{}/error", uri), format!("{}/missing", uri)]);
}

#[tokio::test]
async fn test_unreachable_external_link_is_dead() {
    let mock_server = MockServer::start().await;
    let uri = mock_server.uri();

    // Port 1 on localhost: a different host, and nothing listening
    let home = r#"<a href="/fine">Fine</a><a href="http://localhost:1/nowhere">Nowhere</a>"#;
    mount(&mock_server, "/", ResponseTemplate::new(200).set_body_string(home)).await;
    mount(&mock_server, "/fine", ResponseTemplate::new(200)).await;

    let crawler = Crawler::new(CrawlSettings::default()).unwrap();
    let links = crawler.crawl(&format!("{}/", uri)).await;
    assert_eq!(links.len(), 2);

    let checker = LivenessChecker::new(ProbeSettings::default()).unwrap();
    let dead = checker.check_all(&links).await;

    assert_eq!(dead, vec!["http://localhost:1/nowhere".to_string()]);
}
