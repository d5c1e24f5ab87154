//! Integration tests for the comment change detector using wiremock mocks.

use chrono::{DateTime, TimeDelta};
use linkpulse_engine::{detect_new_comments, EngineError, PollWindow};
use linkpulse_linkedin::LinkedinClient;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn test_client(base_url: &str) -> LinkedinClient {
    LinkedinClient::with_base_url("test-token", "202502", "linkpulse-test/0", 30, base_url)
        .expect("client construction should not fail")
}

/// A window whose watermark lands exactly on the given epoch millisecond.
fn window_with_watermark(millis: i64) -> PollWindow {
    let watermark = DateTime::from_timestamp_millis(millis).expect("valid millis");
    PollWindow::scheduled(watermark + TimeDelta::seconds(1800), 1800)
}

fn comments_body(times: &[i64]) -> serde_json::Value {
    let elements: Vec<serde_json::Value> = times
        .iter()
        .enumerate()
        .map(|(i, t)| {
            serde_json::json!({
                "id": format!("c{i}"),
                "commentUrn": format!("urn:li:comment:(urn:li:share:1,{i})"),
                "message": { "text": format!("comment {i}") },
                "actor": "urn:li:person:abc",
                "created": { "time": t }
            })
        })
        .collect();
    serde_json::json!({ "elements": elements })
}

#[tokio::test]
async fn reports_every_comment_after_the_watermark() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/socialActions/urn%3Ali%3Ashare%3A1/comments"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(comments_body(&[1_700_000_000_000, 1_700_001_000_000])),
        )
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let targets = vec!["urn:li:share:1".to_string()];
    let result = detect_new_comments(&client, &targets, window_with_watermark(1_699_999_000_000))
        .await
        .expect("cycle should succeed")
        .expect("two comments qualify, an event is due");

    assert_eq!(result.count, 2);
    assert_eq!(result.new_comments.len(), 2);
    assert_eq!(
        result.latest.created_at,
        DateTime::from_timestamp_millis(1_700_001_000_000).unwrap()
    );
    assert_eq!(result.latest.text, "comment 1");
}

#[tokio::test]
async fn watermark_excludes_older_comments() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/socialActions/urn%3Ali%3Ashare%3A1/comments"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(comments_body(&[1_700_000_000_000, 1_700_001_000_000])),
        )
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let targets = vec!["urn:li:share:1".to_string()];
    let result = detect_new_comments(&client, &targets, window_with_watermark(1_700_000_500_000))
        .await
        .expect("cycle should succeed")
        .expect("one comment qualifies");

    assert_eq!(result.count, 1);
    assert_eq!(
        result.latest.created_at,
        DateTime::from_timestamp_millis(1_700_001_000_000).unwrap()
    );
}

#[tokio::test]
async fn comment_exactly_at_the_watermark_is_excluded() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/socialActions/urn%3Ali%3Ashare%3A1/comments"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(comments_body(&[1_700_000_000_000, 1_700_000_000_001])),
        )
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let targets = vec!["urn:li:share:1".to_string()];
    let result = detect_new_comments(&client, &targets, window_with_watermark(1_700_000_000_000))
        .await
        .expect("cycle should succeed")
        .expect("the strictly-newer comment qualifies");

    assert_eq!(result.count, 1);
    assert_eq!(
        result.latest.created_at,
        DateTime::from_timestamp_millis(1_700_000_000_001).unwrap()
    );
}

#[tokio::test]
async fn zero_qualifying_comments_produce_no_event() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/socialActions/urn%3Ali%3Ashare%3A1/comments"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(comments_body(&[1_600_000_000_000])),
        )
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let targets = vec!["urn:li:share:1".to_string()];
    let result = detect_new_comments(&client, &targets, window_with_watermark(1_700_000_000_000))
        .await
        .expect("cycle should succeed");

    assert!(result.is_none(), "stale comments must not emit an event");
}

#[tokio::test]
async fn empty_target_list_is_a_no_op() {
    let server = MockServer::start().await;

    let client = test_client(&server.uri());
    let result = detect_new_comments(&client, &[], PollWindow::starting_now(1800))
        .await
        .expect("an empty watch list is not an error");

    assert!(result.is_none());
    assert!(
        server.received_requests().await.unwrap_or_default().is_empty(),
        "no requests should be issued for an empty watch list"
    );
}

#[tokio::test]
async fn elements_missing_required_fields_are_dropped() {
    let server = MockServer::start().await;

    let body = serde_json::json!({
        "elements": [
            {
                "id": "valid",
                "message": { "text": "kept" },
                "created": { "time": 1_700_001_000_000_i64 }
            },
            {
                "id": "no-message",
                "created": { "time": 1_700_001_000_000_i64 }
            },
            {
                "id": "no-created",
                "message": { "text": "dropped" }
            },
            {
                "id": "created-without-time",
                "message": { "text": "dropped" },
                "created": {}
            }
        ]
    });

    Mock::given(method("GET"))
        .and(path("/socialActions/urn%3Ali%3Ashare%3A1/comments"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&body))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let targets = vec!["urn:li:share:1".to_string()];
    let result = detect_new_comments(&client, &targets, window_with_watermark(1_700_000_000_000))
        .await
        .expect("cycle should succeed")
        .expect("the complete element qualifies");

    assert_eq!(result.count, 1);
    assert_eq!(result.latest.comment_id.as_deref(), Some("valid"));
    assert_eq!(result.latest.text, "kept");
}

#[tokio::test]
async fn any_fetch_failure_aborts_the_whole_cycle() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/socialActions/urn%3Ali%3Ashare%3A1/comments"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    // The second target must never be fetched once the first has failed.
    Mock::given(method("GET"))
        .and(path("/socialActions/urn%3Ali%3Ashare%3A2/comments"))
        .respond_with(ResponseTemplate::new(200).set_body_json(comments_body(&[])))
        .expect(0)
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let targets = vec!["urn:li:share:1".to_string(), "urn:li:share:2".to_string()];
    let err = detect_new_comments(&client, &targets, window_with_watermark(1_700_000_000_000))
        .await
        .expect_err("a failing target must abort the cycle");

    match err {
        EngineError::CommentFetch { target, .. } => assert_eq!(target, "urn:li:share:1"),
        other => panic!("expected CommentFetch, got: {other:?}"),
    }
}

#[tokio::test]
async fn equal_timestamps_resolve_to_the_first_target() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/socialActions/urn%3Ali%3Ashare%3A1/comments"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(comments_body(&[1_700_001_000_000])),
        )
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/socialActions/urn%3Ali%3Ashare%3A2/comments"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(comments_body(&[1_700_001_000_000])),
        )
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let targets = vec!["urn:li:share:1".to_string(), "urn:li:share:2".to_string()];
    let result = detect_new_comments(&client, &targets, window_with_watermark(1_700_000_000_000))
        .await
        .expect("cycle should succeed")
        .expect("both comments qualify");

    assert_eq!(result.count, 2);
    assert_eq!(result.latest.target, "urn:li:share:1");
}

#[tokio::test]
async fn newest_comment_can_come_from_a_later_target() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/socialActions/urn%3Ali%3Ashare%3A1/comments"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(comments_body(&[1_700_001_000_000])),
        )
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/socialActions/urn%3Ali%3Ashare%3A2/comments"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(comments_body(&[1_700_002_000_000])),
        )
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let targets = vec!["urn:li:share:1".to_string(), "urn:li:share:2".to_string()];
    let result = detect_new_comments(&client, &targets, window_with_watermark(1_700_000_000_000))
        .await
        .expect("cycle should succeed")
        .expect("both comments qualify");

    assert_eq!(result.latest.target, "urn:li:share:2");
    assert_eq!(
        result.latest.created_at,
        DateTime::from_timestamp_millis(1_700_002_000_000).unwrap()
    );
}
