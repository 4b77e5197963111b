//! Browsing-session behavior: ready-wait polling and block detection

use crate::common::{mount_html, scorecard_html, session_config};
use scorecrawl::config::SessionConfig;
use scorecrawl::fetch::{HttpSession, PageFetcher, ReadyCondition};
use scorecrawl::ScrapeError;
use url::Url;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn test_fetch_waits_for_ready_marker() {
    let server = MockServer::start().await;

    // First response is a loading shell; subsequent polls get the content
    Mock::given(method("GET"))
        .and(path("/m-1/full-scorecard"))
        .respond_with(
            ResponseTemplate::new(200).set_body_string("<html><body>loading</body></html>"),
        )
        .up_to_n_times(1)
        .mount(&server)
        .await;
    mount_html(&server, "/m-1/full-scorecard", scorecard_html()).await;

    let mut session = HttpSession::new(&session_config(), None).unwrap();
    let url = Url::parse(&format!("{}/m-1/full-scorecard", server.uri())).unwrap();
    let ready = ReadyCondition::css("table.ci-scorecard-table");

    let page = session.fetch(&url, &ready).await.unwrap();
    assert!(page.html.contains("ci-scorecard-table"));
}

#[tokio::test]
async fn test_fetch_times_out_when_content_never_ready() {
    let server = MockServer::start().await;
    mount_html(
        &server,
        "/m-1/full-scorecard",
        "<html><body>loading</body></html>".to_string(),
    )
    .await;

    let config = SessionConfig {
        ready_timeout_ms: 1_000,
        poll_interval_ms: 100,
        ..SessionConfig::default()
    };
    let mut session = HttpSession::new(&config, None).unwrap();
    let url = Url::parse(&format!("{}/m-1/full-scorecard", server.uri())).unwrap();
    let ready = ReadyCondition::css("table.ci-scorecard-table");

    let result = session.fetch(&url, &ready).await;
    match result {
        Err(ScrapeError::FetchTimeout { waited_ms, .. }) => {
            // The wait stops within one poll interval of the bound
            assert!(waited_ms < 2_000);
        }
        other => panic!("expected fetch timeout, got {:?}", other.map(|p| p.url)),
    }
}

#[tokio::test]
async fn test_blocked_response_is_a_session_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/m-1/full-scorecard"))
        .respond_with(ResponseTemplate::new(403))
        .mount(&server)
        .await;

    let mut session = HttpSession::new(&session_config(), None).unwrap();
    let url = Url::parse(&format!("{}/m-1/full-scorecard", server.uri())).unwrap();
    let ready = ReadyCondition::css("table.ci-scorecard-table");

    let result = session.fetch(&url, &ready).await;
    match result {
        Err(e @ ScrapeError::Session { .. }) => {
            assert!(e.to_string().contains("anti-bot"));
            assert!(e.is_retryable());
        }
        other => panic!("expected session error, got {:?}", other.map(|p| p.url)),
    }
}
