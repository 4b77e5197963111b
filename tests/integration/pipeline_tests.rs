//! Full pipeline runs against a mock site

use crate::common::{listing_html, mount_html, scorecard_html, session_config};
use scorecrawl::checkpoint::CheckpointStore;
use scorecrawl::fetch::HttpSession;
use scorecrawl::pipeline::{PipelineKind, PipelineRunner, RunnerOptions};
use scorecrawl::politeness::NoDelayPolicy;
use std::path::Path;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use url::Url;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn options(listing: &str, dir: &Path, max_retries: u32) -> RunnerOptions {
    RunnerOptions {
        listing_urls: vec![Url::parse(listing).unwrap()],
        max_retries,
        retry_backoff_ms: 0,
        config_hash: "test-hash".to_string(),
        records_dir: dir.join("records"),
    }
}

fn runner(
    kind: PipelineKind,
    opts: RunnerOptions,
    dir: &Path,
) -> PipelineRunner<HttpSession, NoDelayPolicy> {
    let session = HttpSession::new(&session_config(), None).unwrap();
    PipelineRunner::new(
        session,
        NoDelayPolicy,
        CheckpointStore::new(dir.join("checkpoint.json")),
        kind,
        opts,
        Arc::new(AtomicBool::new(false)),
    )
}

#[tokio::test]
async fn test_match_results_end_to_end() {
    let server = MockServer::start().await;
    let dir = tempfile::tempdir().unwrap();

    mount_html(
        &server,
        "/results.html",
        listing_html(&["/m-1/full-scorecard", "/m-2/full-scorecard"]),
    )
    .await;

    let listing = format!("{}/results.html", server.uri());
    let report = runner(
        PipelineKind::MatchResults,
        options(&listing, dir.path(), 3),
        dir.path(),
    )
    .run(false)
    .await
    .unwrap();

    assert_eq!(report.total_tasks, 1);
    assert_eq!(report.succeeded, 1);
    assert_eq!(report.records, 2);

    let artifact =
        std::fs::read_to_string(dir.path().join("records/match_results.json")).unwrap();
    let summaries: Vec<serde_json::Value> = serde_json::from_str(&artifact).unwrap();
    assert_eq!(summaries.len(), 2);
    assert_eq!(summaries[0]["team1"], "India");
    assert_eq!(summaries[0]["team2"], "Pakistan");
    assert!(summaries[0]["canonicalURL"]
        .as_str()
        .unwrap()
        .ends_with("/m-1/full-scorecard"));

    let links =
        std::fs::read_to_string(dir.path().join("records/match_links.json")).unwrap();
    let links: Vec<String> = serde_json::from_str(&links).unwrap();
    assert_eq!(links.len(), 2);
}

#[tokio::test]
async fn test_batting_run_survives_one_broken_scorecard() {
    let server = MockServer::start().await;
    let dir = tempfile::tempdir().unwrap();

    mount_html(
        &server,
        "/results.html",
        listing_html(&["/m-1/full-scorecard", "/m-2/full-scorecard"]),
    )
    .await;
    mount_html(&server, "/m-1/full-scorecard", scorecard_html()).await;
    Mock::given(method("GET"))
        .and(path("/m-2/full-scorecard"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let listing = format!("{}/results.html", server.uri());
    let report = runner(
        PipelineKind::Batting,
        options(&listing, dir.path(), 1),
        dir.path(),
    )
    .run(false)
    .await
    .unwrap();

    assert_eq!(report.total_tasks, 2);
    assert_eq!(report.succeeded, 1);
    assert_eq!(report.failed, 1);

    let artifact =
        std::fs::read_to_string(dir.path().join("records/batting_summary.json")).unwrap();
    let lines: Vec<serde_json::Value> = serde_json::from_str(&artifact).unwrap();
    assert_eq!(lines.len(), 3);
    assert_eq!(lines[0]["playerName"], "KL Rahul");
    assert_eq!(lines[0]["teamInnings"], "India");
    assert_eq!(lines[0]["battingPosition"], 1);
}

#[tokio::test]
async fn test_second_run_resumes_without_rediscovery() {
    let server = MockServer::start().await;
    let dir = tempfile::tempdir().unwrap();

    // The listing may be fetched exactly once across both runs; the
    // second run must reuse the checkpointed references instead
    Mock::given(method("GET"))
        .and(path("/results.html"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(listing_html(&["/m-1/full-scorecard"]))
                .insert_header("content-type", "text/html"),
        )
        .expect(1)
        .mount(&server)
        .await;
    mount_html(&server, "/m-1/full-scorecard", scorecard_html()).await;

    let listing = format!("{}/results.html", server.uri());

    let first = runner(
        PipelineKind::Batting,
        options(&listing, dir.path(), 3),
        dir.path(),
    )
    .run(false)
    .await
    .unwrap();
    assert_eq!(first.succeeded, 1);

    let second = runner(
        PipelineKind::Batting,
        options(&listing, dir.path(), 3),
        dir.path(),
    )
    .run(false)
    .await
    .unwrap();
    // Everything was already done; no task ran, records were retained
    assert_eq!(second.succeeded, 0);
    assert_eq!(second.failed, 0);
    assert_eq!(second.records, first.records);
}

#[tokio::test]
async fn test_bowling_run_attributes_opposition() {
    let server = MockServer::start().await;
    let dir = tempfile::tempdir().unwrap();

    mount_html(&server, "/results.html", listing_html(&["/m-1/full-scorecard"])).await;
    mount_html(&server, "/m-1/full-scorecard", scorecard_html()).await;

    let listing = format!("{}/results.html", server.uri());
    let report = runner(
        PipelineKind::Bowling,
        options(&listing, dir.path(), 3),
        dir.path(),
    )
    .run(false)
    .await
    .unwrap();
    assert_eq!(report.records, 2);

    let artifact =
        std::fs::read_to_string(dir.path().join("records/bowling_summary.json")).unwrap();
    let lines: Vec<serde_json::Value> = serde_json::from_str(&artifact).unwrap();
    // India bat first, so the first innings is bowled by Pakistan
    assert_eq!(lines[0]["playerName"], "Shaheen Afridi");
    assert_eq!(lines[0]["bowlingTeam"], "Pakistan");
    assert_eq!(lines[1]["bowlingTeam"], "India");
}
