//! Integration tests for `PageClient::fetch_page`.
//!
//! Uses `wiremock` to stand up a local HTTP server for each test so no real
//! network traffic is made.

use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use scoretrack_scraper::{PageClient, ScraperError};

/// Builds a `PageClient` suitable for tests: 5-second timeout, descriptive UA.
fn test_client() -> PageClient {
    PageClient::new(5, "scoretrack-test/0.1").expect("failed to build test PageClient")
}

#[tokio::test]
async fn fetch_page_returns_body_text() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/profile/alice"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>Score: 42</html>"))
        .mount(&server)
        .await;

    let client = test_client();
    let body = client
        .fetch_page(&format!("{}/profile/alice", server.uri()))
        .await
        .unwrap();

    assert_eq!(body, "<html>Score: 42</html>");
}

#[tokio::test]
async fn fetch_page_maps_404_to_unexpected_status() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let client = test_client();
    let err = client
        .fetch_page(&format!("{}/gone", server.uri()))
        .await
        .unwrap_err();

    assert!(
        matches!(err, ScraperError::UnexpectedStatus { status: 404, .. }),
        "expected UnexpectedStatus(404), got: {err:?}"
    );
}

#[tokio::test]
async fn fetch_page_maps_500_to_unexpected_status() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let client = test_client();
    let err = client.fetch_page(&server.uri()).await.unwrap_err();

    assert!(
        matches!(err, ScraperError::UnexpectedStatus { status: 500, .. }),
        "expected UnexpectedStatus(500), got: {err:?}"
    );
}

#[tokio::test]
async fn fetch_page_surfaces_connection_failure_as_http_error() {
    // Bind-then-drop leaves a port nothing is listening on. A pooled server
    // from `MockServer::start()` keeps listening after drop, so build a
    // dedicated one that actually shuts down.
    let server = MockServer::builder().start().await;
    let uri = server.uri();
    drop(server);

    let client = test_client();
    let err = client.fetch_page(&uri).await.unwrap_err();

    assert!(
        matches!(err, ScraperError::Http(_)),
        "expected Http transport error, got: {err:?}"
    );
}
