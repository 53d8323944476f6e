use chrono::NaiveDate;
use mockito::Matcher;
use serde_json::json;
use serial_test::serial;

use recap::error::RecapError;
use recap::server::models::task::{Focus, TaskBatch, TaskRecord};
use recap::server::services::generator::{
  render_prompt, AnthropicGenerator, GeneratorConfig, SummaryGenerator,
};

const KEY_VAR: &str = "RECAP_TEST_ANTHROPIC_KEY";

fn batch() -> TaskBatch {
  let day = NaiveDate::from_ymd_opt(2024, 1, 3).unwrap();
  TaskBatch::new(vec![
    TaskRecord::new("Refactor parser", 120, Focus::High, day),
    TaskRecord::new("Standup", 15, Focus::Low, day),
  ])
}

fn generator_for(server: &mockito::Server) -> AnthropicGenerator {
  AnthropicGenerator::new(GeneratorConfig {
    api_base: server.url(),
    model: "claude-test".to_string(),
    max_tokens: 300,
    timeout_secs: 5,
    api_key_var: KEY_VAR.to_string(),
  })
  .unwrap()
}

fn assert_external(result: recap::error::Result<String>, expected_status: Option<u16>) {
  match result {
    Err(RecapError::ExternalService { status, .. }) => assert_eq!(status, expected_status),
    other => panic!("expected ExternalService, got {other:?}"),
  }
}

#[tokio::test]
#[serial]
async fn test_generate_sends_prompt_and_trims_reply() {
  std::env::set_var(KEY_VAR, "sk-test");
  let mut server = mockito::Server::new_async().await;
  let mock = server
    .mock("POST", "/v1/messages")
    .match_header("x-api-key", "sk-test")
    .match_header("anthropic-version", "2023-06-01")
    .match_body(Matcher::PartialJson(json!({
      "model": "claude-test",
      "max_tokens": 300,
      "messages": [{ "role": "user", "content": render_prompt(&batch()) }]
    })))
    .with_status(200)
    .with_header("content-type", "application/json")
    .with_body(r#"{"content":[{"type":"text","text":"  A focused week.\n"}]}"#)
    .create_async()
    .await;

  let summary = generator_for(&server).generate(&batch()).await.unwrap();

  assert_eq!(summary, "A focused week.");
  mock.assert_async().await;
  std::env::remove_var(KEY_VAR);
}

#[tokio::test]
#[serial]
async fn test_missing_key_is_left_to_provider() {
  std::env::remove_var(KEY_VAR);
  let mut server = mockito::Server::new_async().await;
  server
    .mock("POST", "/v1/messages")
    .with_status(401)
    .with_body(r#"{"type":"error","error":{"type":"authentication_error"}}"#)
    .create_async()
    .await;

  assert_external(generator_for(&server).generate(&batch()).await, Some(401));
}

#[tokio::test]
#[serial]
async fn test_server_error_is_external() {
  let mut server = mockito::Server::new_async().await;
  server.mock("POST", "/v1/messages").with_status(500).create_async().await;

  assert_external(generator_for(&server).generate(&batch()).await, Some(500));
}

#[tokio::test]
#[serial]
async fn test_malformed_body_is_external() {
  let mut server = mockito::Server::new_async().await;
  server
    .mock("POST", "/v1/messages")
    .with_status(200)
    .with_body("<html>gateway</html>")
    .create_async()
    .await;

  assert_external(generator_for(&server).generate(&batch()).await, Some(200));
}

#[tokio::test]
#[serial]
async fn test_reply_without_text_block_is_external() {
  let mut server = mockito::Server::new_async().await;
  server
    .mock("POST", "/v1/messages")
    .with_status(200)
    .with_body(r#"{"content":[{"type":"tool_use","id":"t1"}]}"#)
    .create_async()
    .await;

  assert_external(generator_for(&server).generate(&batch()).await, Some(200));
}

#[tokio::test]
#[serial]
async fn test_blank_text_block_is_external() {
  let mut server = mockito::Server::new_async().await;
  server
    .mock("POST", "/v1/messages")
    .with_status(200)
    .with_body(r#"{"content":[{"type":"text","text":"   \n"}]}"#)
    .create_async()
    .await;

  assert_external(generator_for(&server).generate(&batch()).await, Some(200));
}

#[tokio::test]
#[serial]
async fn test_unreachable_provider_is_external() {
  let generator = AnthropicGenerator::new(GeneratorConfig {
    api_base: "http://127.0.0.1:9".to_string(),
    timeout_secs: 2,
    api_key_var: KEY_VAR.to_string(),
    ..GeneratorConfig::default()
  })
  .unwrap();

  assert_external(generator.generate(&batch()).await, None);
}
