//! Portal client behavior against a mock portal.

use std::time::Duration;

use keepers_query::{FetchOutcome, Fetcher, PortalClient, QueryConfig, RetryPolicy};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const ISSN: &str = "0378-5955";

fn record_request(issn: &str) -> wiremock::MockBuilder {
    Mock::given(method("GET"))
        .and(path(format!("/resource/ISSN/{issn}")))
        .and(query_param("format", "json"))
}

/// Fetch `issn` from the mock portal with a blocking client.
///
/// The blocking client owns its own runtime, so it is built, used and
/// dropped on a blocking thread.
async fn fetch(server: &MockServer, issn: &'static str, max_retries: u32) -> FetchOutcome {
    let config = QueryConfig::new()
        .with_base_url(server.uri())
        .with_retry(RetryPolicy {
            max_retries,
            backoff_factor: 0.0,
            ..RetryPolicy::default()
        });

    tokio::task::spawn_blocking(move || {
        let http = reqwest::blocking::Client::builder()
            .no_proxy()
            .timeout(Duration::from_secs(10))
            .build()
            .unwrap();
        PortalClient::with_client(http, &config).fetch(issn)
    })
    .await
    .unwrap()
    .unwrap()
}

#[tokio::test]
async fn test_transient_status_is_retried() {
    let server = MockServer::start().await;
    record_request(ISSN)
        .respond_with(ResponseTemplate::new(503).insert_header("Retry-After", "0"))
        .up_to_n_times(1)
        .expect(1)
        .with_priority(1)
        .mount(&server)
        .await;
    record_request(ISSN)
        .respond_with(
            ResponseTemplate::new(200).set_body_raw(r#"{"@graph": []}"#, "application/json"),
        )
        .expect(1)
        .mount(&server)
        .await;

    let outcome = fetch(&server, ISSN, 3).await;

    assert!(matches!(outcome, FetchOutcome::Success { .. }));
}

#[tokio::test]
async fn test_forbidden_is_not_retried() {
    let server = MockServer::start().await;
    record_request(ISSN)
        .respond_with(ResponseTemplate::new(403).set_body_string("go away"))
        .expect(1)
        .mount(&server)
        .await;

    let outcome = fetch(&server, ISSN, 3).await;

    assert_eq!(outcome, FetchOutcome::Blocked);
}

#[tokio::test]
async fn test_exhausted_retries_report_last_status() {
    let server = MockServer::start().await;
    record_request(ISSN)
        .respond_with(ResponseTemplate::new(500).set_body_string("oops"))
        .expect(3)
        .mount(&server)
        .await;

    let outcome = fetch(&server, ISSN, 2).await;

    assert_eq!(outcome, FetchOutcome::HttpError(500));
}

#[tokio::test]
async fn test_unknown_issn_page() {
    let server = MockServer::start().await;
    record_request("0000-0000")
        .respond_with(ResponseTemplate::new(200).set_body_raw(
            "<p>The requested numbers do not correspond to valid ISSNs</p>",
            "text/html",
        ))
        .expect(1)
        .mount(&server)
        .await;

    let outcome = fetch(&server, "0000-0000", 0).await;

    assert_eq!(outcome, FetchOutcome::NotFound);
}
