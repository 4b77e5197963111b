//! Discovery behavior against a mock site

use crate::common::{listing_html, listing_row, mount_html, scorecard_html, session_config};
use scorecrawl::discover::{discover_matches, discover_profiles, ReferenceKind};
use scorecrawl::fetch::HttpSession;
use scorecrawl::ScrapeError;
use url::Url;
use wiremock::MockServer;

#[tokio::test]
async fn test_discovery_collects_scorecard_links() {
    let server = MockServer::start().await;

    let rows = format!(
        r#"<html><body><table class="engineTable">{}{}{}{}</table></body></html>"#,
        listing_row("India", "Pakistan", Some("/m-1/full-scorecard")),
        listing_row("England", "Australia", Some("/m-2/full-scorecard")),
        listing_row("India", "England", None),
        listing_row("Pakistan", "Australia", Some("/m-3/full-scorecard")),
    );
    mount_html(&server, "/results.html", rows).await;

    let mut session = HttpSession::new(&session_config(), None).unwrap();
    let listing = Url::parse(&format!("{}/results.html", server.uri())).unwrap();

    let references = discover_matches(&mut session, &[listing]).await.unwrap();
    assert_eq!(references.len(), 3);
    for reference in &references {
        assert_eq!(reference.kind, ReferenceKind::Detail);
        assert!(reference.canonical_url.path().ends_with("/full-scorecard"));
    }
}

#[tokio::test]
async fn test_overlapping_listings_merge_by_url() {
    let server = MockServer::start().await;

    mount_html(
        &server,
        "/page1.html",
        listing_html(&["/m-1/full-scorecard", "/m-2/full-scorecard", "/m-3/full-scorecard"]),
    )
    .await;
    // Two of these repeat links from the first page
    mount_html(
        &server,
        "/page2.html",
        listing_html(&["/m-2/full-scorecard", "/m-3/full-scorecard", "/m-4/full-scorecard"]),
    )
    .await;

    let mut session = HttpSession::new(&session_config(), None).unwrap();
    let listings = vec![
        Url::parse(&format!("{}/page1.html", server.uri())).unwrap(),
        Url::parse(&format!("{}/page2.html", server.uri())).unwrap(),
    ];

    let references = discover_matches(&mut session, &listings).await.unwrap();
    assert_eq!(references.len(), 4);
    // First-seen order is preserved
    assert!(references[0].canonical_url.path().starts_with("/m-1/"));
    assert!(references[3].canonical_url.path().starts_with("/m-4/"));
}

#[tokio::test]
async fn test_listing_without_links_is_fatal() {
    let server = MockServer::start().await;

    // A table is present (so the page counts as ready) but no row carries
    // a scorecard anchor and no structural fallback matches
    let html = r#"<html><body><table class="engineTable">
        <tbody><tr><td>India</td><td>Pakistan</td></tr></tbody>
    </table></body></html>"#;
    mount_html(&server, "/results.html", html.to_string()).await;

    let mut session = HttpSession::new(&session_config(), None).unwrap();
    let listing = Url::parse(&format!("{}/results.html", server.uri())).unwrap();

    let result = discover_matches(&mut session, &[listing]).await;
    assert!(matches!(result, Err(ScrapeError::Discovery { .. })));
}

#[tokio::test]
async fn test_profile_discovery_follows_two_hops() {
    let server = MockServer::start().await;

    mount_html(
        &server,
        "/results.html",
        listing_html(&["/m-1/full-scorecard", "/m-2/full-scorecard"]),
    )
    .await;
    // Both scorecards list the same players; references must merge
    mount_html(&server, "/m-1/full-scorecard", scorecard_html()).await;
    mount_html(&server, "/m-2/full-scorecard", scorecard_html()).await;

    let mut session = HttpSession::new(&session_config(), None).unwrap();
    let listing = Url::parse(&format!("{}/results.html", server.uri())).unwrap();

    let references = discover_profiles(&mut session, &[listing]).await.unwrap();
    // Five distinct players across both scorecards after deduplication
    assert_eq!(references.len(), 5);
    for reference in &references {
        assert_eq!(reference.kind, ReferenceKind::Profile);
        assert!(reference.canonical_url.path().starts_with("/cricketers/"));
    }
}
