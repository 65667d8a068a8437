//! Wire-level tests for the Anthropic client against a mock HTTP server.
//!
//! These pin the outbound request shape (headers, body layout, stringified
//! tool results) and the mapping of responses onto service replies.

use mockito::{Matcher, Server};
use serde_json::json;

use sciscinet_agent::service::{
    ReasoningService, RoundRequest, ServiceError, StopCondition,
};
use sciscinet_agent::types::{ContentBlock, Message, MessageRole, ToolSchema};
use sciscinet_agent::AnthropicClient;

fn stats_schema() -> ToolSchema {
    ToolSchema {
        name: "citation-stats".to_string(),
        description: "Overall citation statistics".to_string(),
        input_schema: json!({"type": "object", "properties": {}, "required": []}),
    }
}

fn test_client(base_url: &str) -> AnthropicClient {
    AnthropicClient::with_api_key("test-key", "claude-test", 512)
        .unwrap()
        .with_base_url(base_url)
}

#[tokio::test]
async fn test_tool_use_round_trip() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", "/v1/messages")
        .match_header("x-api-key", "test-key")
        .match_header("anthropic-version", "2023-06-01")
        .match_body(Matcher::PartialJson(json!({
            "model": "claude-test",
            "max_tokens": 512,
            "system": "You answer from the dataset.",
            "tools": [{"name": "citation-stats"}],
            "messages": [{"role": "user", "content": "How many papers?"}],
        })))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            json!({
                "id": "msg_01",
                "type": "message",
                "role": "assistant",
                "model": "claude-test",
                "content": [
                    {"type": "text", "text": "Checking the data."},
                    {"type": "tool_use", "id": "toolu_01", "name": "citation-stats", "input": {}}
                ],
                "stop_reason": "tool_use",
                "usage": {"input_tokens": 120, "output_tokens": 40}
            })
            .to_string(),
        )
        .create();

    let client = test_client(&server.url());
    let tools = vec![stats_schema()];
    let messages = vec![Message::user("How many papers?")];

    let reply = client
        .round(RoundRequest {
            system: "You answer from the dataset.",
            tools: &tools,
            messages: &messages,
        })
        .await
        .unwrap();

    mock.assert();
    assert_eq!(reply.stop, StopCondition::ToolUse);
    let requests = reply.tool_requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].id, "toolu_01");
    assert_eq!(requests[0].name, "citation-stats");
}

#[tokio::test]
async fn test_tool_results_travel_as_json_strings() {
    let mut server = Server::new_async().await;
    // The result payload must be serialized text on the wire, not a nested
    // object.
    let mock = server
        .mock("POST", "/v1/messages")
        .match_body(Matcher::PartialJson(json!({
            "messages": [
                {"role": "user", "content": "How many papers?"},
                {"role": "assistant", "content": [
                    {"type": "tool_use", "id": "toolu_01", "name": "citation-stats", "input": {}}
                ]},
                {"role": "user", "content": [
                    {"type": "tool_result", "tool_use_id": "toolu_01", "content": "{\"total_papers\":8}"}
                ]},
            ],
        })))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            json!({
                "content": [{"type": "text", "text": "The corpus holds 8 papers."}],
                "stop_reason": "end_turn"
            })
            .to_string(),
        )
        .create();

    let client = test_client(&server.url());
    let tools = vec![stats_schema()];
    let messages = vec![
        Message::user("How many papers?"),
        Message::from_blocks(
            MessageRole::Assistant,
            vec![ContentBlock::tool_use("toolu_01", "citation-stats", json!({}))],
        ),
        Message::from_blocks(
            MessageRole::User,
            vec![ContentBlock::tool_result(
                "toolu_01",
                json!({"total_papers": 8}),
            )],
        ),
    ];

    let reply = client
        .round(RoundRequest {
            system: "You answer from the dataset.",
            tools: &tools,
            messages: &messages,
        })
        .await
        .unwrap();

    mock.assert();
    assert_eq!(reply.stop, StopCondition::Final);
    assert_eq!(reply.text(), "The corpus holds 8 papers.");
}

#[tokio::test]
async fn test_api_error_carries_status_and_message() {
    let mut server = Server::new_async().await;
    server
        .mock("POST", "/v1/messages")
        .with_status(500)
        .with_header("content-type", "application/json")
        .with_body(json!({"error": {"type": "overloaded_error", "message": "overloaded"}}).to_string())
        .create();

    let client = test_client(&server.url());
    let messages = vec![Message::user("hello")];

    let err = client
        .round(RoundRequest {
            system: "sys",
            tools: &[],
            messages: &messages,
        })
        .await
        .unwrap_err();

    match err {
        ServiceError::Api { status, message } => {
            assert_eq!(status, 500);
            assert_eq!(message, "overloaded");
        }
        other => panic!("expected api error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_unparseable_error_body_falls_back_to_raw_text() {
    let mut server = Server::new_async().await;
    server
        .mock("POST", "/v1/messages")
        .with_status(429)
        .with_body("rate limited\n")
        .create();

    let client = test_client(&server.url());
    let messages = vec![Message::user("hello")];

    let err = client
        .round(RoundRequest {
            system: "sys",
            tools: &[],
            messages: &messages,
        })
        .await
        .unwrap_err();

    match err {
        ServiceError::Api { status, message } => {
            assert_eq!(status, 429);
            assert_eq!(message, "rate limited");
        }
        other => panic!("expected api error, got {:?}", other),
    }
}
