//! Ollama producer against a mocked HTTP server

use llm::{LlmError, LocalLlmConfig, OllamaClient};
use review_core::{ContentProducer, GenerationError};
use serde_json::json;
use std::time::Duration;
use wiremock::matchers::{body_partial_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn chat_reply(content: &str) -> serde_json::Value {
    json!({
        "model": "llama3.2",
        "created_at": "2024-05-01T12:00:00Z",
        "message": {"role": "assistant", "content": content},
        "done": true,
        "eval_count": 42
    })
}

fn client_for(server: &MockServer) -> OllamaClient {
    OllamaClient::new(LocalLlmConfig::new(server.uri(), "llama3.2")).unwrap()
}

#[tokio::test]
async fn test_generate_sends_initial_prompt_and_trims_reply() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/chat"))
        .and(body_partial_json(json!({
            "model": "llama3.2",
            "stream": false,
            "options": {"temperature": 0.7}
        })))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(chat_reply("\n  Company X ships! #launch #tech  \n")),
        )
        .expect(1)
        .mount(&server)
        .await;

    let draft = client_for(&server)
        .generate("Company X launches new product.")
        .await
        .unwrap();

    assert_eq!(draft, "Company X ships! #launch #tech");

    let requests = server.received_requests().await.unwrap();
    let body: serde_json::Value = serde_json::from_slice(&requests[0].body).unwrap();
    assert_eq!(body["messages"][0]["role"], "system");
    assert!(body["messages"][0]["content"]
        .as_str()
        .unwrap()
        .contains("under 280 characters"));
    assert!(body["messages"][1]["content"]
        .as_str()
        .unwrap()
        .contains("Company X launches new product."));
}

#[tokio::test]
async fn test_revise_sends_feedback() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/chat"))
        .respond_with(ResponseTemplate::new(200).set_body_json(chat_reply("Punchier! #launch")))
        .mount(&server)
        .await;

    let draft = client_for(&server)
        .revise("Company X launches new product.", "make it punchier")
        .await
        .unwrap();
    assert_eq!(draft, "Punchier! #launch");

    let requests = server.received_requests().await.unwrap();
    let body: serde_json::Value = serde_json::from_slice(&requests[0].body).unwrap();
    let user = body["messages"][1]["content"].as_str().unwrap();
    assert!(user.contains("make it punchier"));
    assert!(user.contains("Original article:"));
}

#[tokio::test]
async fn test_server_error_is_generation_failed() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/chat"))
        .respond_with(ResponseTemplate::new(500).set_body_string("out of memory"))
        .mount(&server)
        .await;

    let err = client_for(&server).generate("article").await.unwrap_err();

    match err {
        GenerationError::Failed(message) => assert!(message.contains("out of memory")),
        other => panic!("expected failure, got {:?}", other),
    }
}

#[tokio::test]
async fn test_busy_server_is_generation_unavailable() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/chat"))
        .respond_with(ResponseTemplate::new(503).set_body_string("server busy"))
        .mount(&server)
        .await;

    let err = client_for(&server).revise("article", "shorter").await.unwrap_err();

    match err {
        GenerationError::Unavailable(message) => assert!(message.contains("server busy")),
        other => panic!("expected unavailable, got {:?}", other),
    }
}

#[tokio::test]
async fn test_missing_model_is_generation_failed() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/chat"))
        .respond_with(
            ResponseTemplate::new(404).set_body_json(json!({"error": "model \"llama3.2\" not found"})),
        )
        .mount(&server)
        .await;

    let err = client_for(&server).generate("article").await.unwrap_err();

    match err {
        GenerationError::Failed(message) => assert!(message.contains("ollama pull llama3.2")),
        other => panic!("expected failure, got {:?}", other),
    }
}

#[tokio::test]
async fn test_malformed_body_is_generation_failed() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/chat"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"unexpected": true})))
        .mount(&server)
        .await;

    let err = client_for(&server).generate("article").await.unwrap_err();
    assert!(matches!(err, GenerationError::Failed(_)));
}

#[tokio::test]
async fn test_unreachable_server_is_generation_unavailable() {
    // Port 9 (discard) is closed on test machines.
    let client = OllamaClient::new(LocalLlmConfig::new("http://127.0.0.1:9", "llama3.2")).unwrap();

    let err = client.generate("article").await.unwrap_err();
    assert!(matches!(err, GenerationError::Unavailable(_)));
}

#[tokio::test]
async fn test_slow_server_is_generation_unavailable() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/chat"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(chat_reply("too late"))
                .set_delay(Duration::from_secs(5)),
        )
        .mount(&server)
        .await;

    let config = LocalLlmConfig::new(server.uri(), "llama3.2").with_timeout(Duration::from_millis(200));
    let err = OllamaClient::new(config).unwrap().generate("article").await.unwrap_err();

    assert!(matches!(err, GenerationError::Unavailable(_)));
}

#[tokio::test]
async fn test_health_and_models() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/tags"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "models": [
                {"name": "llama3.2:latest", "size": 2019393189u64, "modified_at": "2024-09-25T10:00:00Z"},
                {"name": "mistral:7b"}
            ]
        })))
        .mount(&server)
        .await;

    let client = client_for(&server);
    assert!(client.check_health().await.unwrap());

    let models = client.fetch_models().await.unwrap();
    assert_eq!(models.len(), 2);
    assert_eq!(models[0].name, "llama3.2:latest");
    assert_eq!(models[0].size, Some(2019393189));
    assert_eq!(models[1].size, None);
}

#[tokio::test]
async fn test_health_is_false_when_down() {
    let client = OllamaClient::new(LocalLlmConfig::new("http://127.0.0.1:9", "llama3.2")).unwrap();

    assert!(!client.check_health().await.unwrap());
    assert!(matches!(client.fetch_models().await, Err(LlmError::HttpError(_))));
}
