//! X publisher against a mocked API

use publisher::{PublisherError, XConfig, XPublisher};
use review_core::{PublishFailureReason, Publisher};
use serde_json::json;
use std::time::Duration;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const TOKEN: &str = "mock-user-token";

fn publisher_for(server: &MockServer) -> XPublisher {
    XPublisher::new(XConfig::new(TOKEN, "company_x").with_base_url(server.uri())).unwrap()
}

async fn mount_status(server: &MockServer, status: u16) {
    Mock::given(method("POST"))
        .and(path("/2/tweets"))
        .respond_with(ResponseTemplate::new(status).set_body_json(json!({
            "title": "error",
            "detail": "mocked failure"
        })))
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_publish_posts_text_and_builds_url() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/2/tweets"))
        .and(header("authorization", "Bearer mock-user-token"))
        .and(body_json(json!({"text": "Company X ships! #launch"})))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "data": {
                "id": "1790000000000000001",
                "text": "Company X ships! #launch",
                "edit_history_tweet_ids": ["1790000000000000001"]
            }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let post = publisher_for(&server)
        .publish("Company X ships! #launch")
        .await
        .unwrap();

    assert_eq!(post.id, "1790000000000000001");
    assert_eq!(post.url, "https://twitter.com/company_x/status/1790000000000000001");
}

#[tokio::test]
async fn test_rate_limit_maps_to_rate_limited() {
    let server = MockServer::start().await;
    mount_status(&server, 429).await;

    let err = publisher_for(&server).publish("hello").await.unwrap_err();
    assert_eq!(err, PublishFailureReason::RateLimited);
}

#[tokio::test]
async fn test_auth_failures_map_to_unauthorized() {
    for status in [401, 403] {
        let server = MockServer::start().await;
        mount_status(&server, status).await;

        let err = publisher_for(&server).publish("hello").await.unwrap_err();
        assert_eq!(err, PublishFailureReason::Unauthorized, "status {}", status);
    }
}

#[tokio::test]
async fn test_other_statuses_map_to_other() {
    let server = MockServer::start().await;
    mount_status(&server, 503).await;

    let err = publisher_for(&server).publish("hello").await.unwrap_err();
    match err {
        PublishFailureReason::Other { message } => assert!(message.contains("503")),
        other => panic!("expected Other, got {:?}", other),
    }
}

#[tokio::test]
async fn test_too_long_never_reaches_the_api() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/2/tweets"))
        .respond_with(ResponseTemplate::new(201))
        .expect(0)
        .mount(&server)
        .await;

    let text = "🚀".repeat(281);
    let err = publisher_for(&server).publish(&text).await.unwrap_err();

    assert_eq!(err, PublishFailureReason::TooLong { length: 281, limit: 280 });
}

#[tokio::test]
async fn test_slow_api_maps_to_other() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/2/tweets"))
        .respond_with(ResponseTemplate::new(201).set_delay(Duration::from_secs(5)))
        .mount(&server)
        .await;

    let config = XConfig::new(TOKEN, "company_x")
        .with_base_url(server.uri())
        .with_timeout(Duration::from_millis(200));
    let err = XPublisher::new(config).unwrap().publish("hello").await.unwrap_err();

    assert!(matches!(err, PublishFailureReason::Other { .. }));
}

#[tokio::test]
async fn test_verify_credentials_returns_username() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/2/users/me"))
        .and(header("authorization", "Bearer mock-user-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": {"id": "42", "name": "Company X", "username": "company_x"}
        })))
        .mount(&server)
        .await;

    let username = publisher_for(&server).verify_credentials().await.unwrap();
    assert_eq!(username, "company_x");
}

#[tokio::test]
async fn test_verify_credentials_rejected_token() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/2/users/me"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    let err = publisher_for(&server).verify_credentials().await.unwrap_err();
    assert!(matches!(err, PublisherError::Unauthorized(_)));
}
