//! Anthropic Messages API 客户端 — 推理服务的生产实现
//!
//! Reasoning-service client speaking the Anthropic Messages protocol.
//! Wire details handled here so the orchestrator stays provider-neutral:
//! - The system instruction is a top-level `system` parameter, not a
//!   history message.
//! - Content uses typed blocks; tool-result content is serialized as a
//!   JSON string at the boundary.
//! - `stop_reason == "tool_use"` is the only tool-use signal; everything
//!   else finalizes the round.
//! - `max_tokens` is required by the API.

use std::env;
use std::time::Duration;

use async_trait::async_trait;
use keyring::Entry;
use serde_json::{json, Value};
use tracing::{debug, warn};

use super::{ReasoningService, RoundRequest, ServiceError, ServiceReply, StopCondition};
use crate::types::{ContentBlock, Message, MessageContent, MessageRole};
use crate::{Error, Result};

pub const DEFAULT_MODEL: &str = "claude-sonnet-4-20250514";
pub const DEFAULT_MAX_TOKENS: u32 = 4096;

const DEFAULT_BASE_URL: &str = "https://api.anthropic.com";
const ANTHROPIC_VERSION: &str = "2023-06-01";
const KEYRING_SERVICE: &str = "sciscinet-agent";
const API_KEY_ENV: &str = "ANTHROPIC_API_KEY";

/// Production [`ReasoningService`] backed by the Anthropic Messages API.
pub struct AnthropicClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
    model: String,
    max_tokens: u32,
}

impl AnthropicClient {
    /// Resolve the credential and build the client. Fails fast with a
    /// configuration error when no credential can be found, so a missing
    /// key never surfaces mid-conversation.
    pub fn from_env(model: impl Into<String>, max_tokens: u32) -> Result<Self> {
        let api_key = Self::resolve_api_key().ok_or_else(|| {
            Error::configuration(
                "Anthropic API key not found: set ANTHROPIC_API_KEY or store it in the OS keyring",
            )
        })?;
        Self::with_api_key(api_key, model, max_tokens)
    }

    /// Build the client with an explicit credential.
    pub fn with_api_key(
        api_key: impl Into<String>,
        model: impl Into<String>,
        max_tokens: u32,
    ) -> Result<Self> {
        // Env-overridable request timeout; the round-trip is the only
        // suspension point of a conversation, so this bounds it.
        let timeout_secs = env::var("SCISCI_HTTP_TIMEOUT_SECS")
            .ok()
            .and_then(|s| s.parse::<u64>().ok())
            .unwrap_or(30);

        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .map_err(|e| Error::configuration(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self {
            http,
            base_url: DEFAULT_BASE_URL.to_string(),
            api_key: api_key.into(),
            model: model.into(),
            max_tokens,
        })
    }

    /// Override the endpoint base URL. Primarily for testing with mock
    /// servers.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    /// True when a credential is resolvable right now. Used by health
    /// reporting; construction performs the authoritative check.
    pub fn credential_available() -> bool {
        Self::resolve_api_key().is_some()
    }

    fn resolve_api_key() -> Option<String> {
        // 1. OS keyring
        if let Ok(entry) = Entry::new(KEYRING_SERVICE, "anthropic") {
            if let Ok(key) = entry.get_password() {
                return Some(key);
            }
        }

        // 2. Environment variable
        env::var(API_KEY_ENV).ok()
    }

    fn build_body(&self, request: &RoundRequest<'_>) -> Value {
        json!({
            "model": self.model,
            "max_tokens": self.max_tokens,
            "system": request.system,
            "tools": request.tools,
            "messages": wire_messages(request.messages),
        })
    }
}

/// Convert history messages to the wire shape. Plain text stays a plain
/// string; block content becomes a typed array.
fn wire_messages(messages: &[Message]) -> Vec<Value> {
    messages
        .iter()
        .map(|m| {
            let role = match m.role {
                MessageRole::User => "user",
                MessageRole::Assistant => "assistant",
            };
            let content = match &m.content {
                MessageContent::Text(text) => Value::String(text.clone()),
                MessageContent::Blocks(blocks) => {
                    Value::Array(blocks.iter().map(wire_block).collect())
                }
            };
            json!({ "role": role, "content": content })
        })
        .collect()
}

fn wire_block(block: &ContentBlock) -> Value {
    match block {
        ContentBlock::Text { text } => json!({ "type": "text", "text": text }),
        ContentBlock::ToolUse { id, name, input } => json!({
            "type": "tool_use",
            "id": id,
            "name": name,
            "input": input,
        }),
        // The API wants string content here; the stringified payload is
        // what the model reads back.
        ContentBlock::ToolResult {
            tool_use_id,
            content,
        } => json!({
            "type": "tool_result",
            "tool_use_id": tool_use_id,
            "content": content.to_string(),
        }),
    }
}

fn parse_reply(body: &Value) -> std::result::Result<ServiceReply, ServiceError> {
    let blocks = body
        .get("content")
        .and_then(|c| c.as_array())
        .ok_or_else(|| ServiceError::MalformedReply("missing content array".to_string()))?;

    let mut content = Vec::with_capacity(blocks.len());
    for block in blocks {
        match block.get("type").and_then(|t| t.as_str()) {
            Some("text") => {
                let text = block
                    .get("text")
                    .and_then(|t| t.as_str())
                    .ok_or_else(|| {
                        ServiceError::MalformedReply("text block without text".to_string())
                    })?;
                content.push(ContentBlock::text(text));
            }
            Some("tool_use") => {
                let id = block.get("id").and_then(|v| v.as_str()).ok_or_else(|| {
                    ServiceError::MalformedReply("tool_use block without id".to_string())
                })?;
                let name = block.get("name").and_then(|v| v.as_str()).ok_or_else(|| {
                    ServiceError::MalformedReply("tool_use block without name".to_string())
                })?;
                let input = block.get("input").cloned().unwrap_or_else(|| json!({}));
                content.push(ContentBlock::tool_use(id, name, input));
            }
            other => {
                debug!(block_type = ?other, "skipping unrecognized content block");
            }
        }
    }

    let stop = StopCondition::from_stop_reason(body.get("stop_reason").and_then(|r| r.as_str()));
    Ok(ServiceReply { stop, content })
}

#[async_trait]
impl ReasoningService for AnthropicClient {
    async fn round(&self, request: RoundRequest<'_>) -> std::result::Result<ServiceReply, ServiceError> {
        let url = format!("{}/v1/messages", self.base_url);
        let body = self.build_body(&request);
        debug!(
            model = %self.model,
            messages = request.messages.len(),
            tools = request.tools.len(),
            "dispatching reasoning round"
        );

        let response = self
            .http
            .post(&url)
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", ANTHROPIC_VERSION)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let raw = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<Value>(&raw)
                .ok()
                .and_then(|v| {
                    v.pointer("/error/message")
                        .and_then(|m| m.as_str())
                        .map(String::from)
                })
                .unwrap_or_else(|| raw.trim().to_string());
            warn!(status = status.as_u16(), "reasoning service rejected the round");
            return Err(ServiceError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let body: Value = response.json().await?;
        parse_reply(&body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ToolSchema;

    fn client() -> AnthropicClient {
        AnthropicClient::with_api_key("test-key", DEFAULT_MODEL, 1024).unwrap()
    }

    #[test]
    fn test_build_body_carries_system_tools_and_model() {
        let schema = ToolSchema {
            name: "citation-stats".to_string(),
            description: "Overall citation statistics".to_string(),
            input_schema: json!({"type": "object", "properties": {}, "required": []}),
        };
        let messages = vec![Message::user("What are the citation stats?")];
        let request = RoundRequest {
            system: "You are a data analysis assistant.",
            tools: std::slice::from_ref(&schema),
            messages: &messages,
        };
        let body = client().build_body(&request);

        assert_eq!(body["model"], DEFAULT_MODEL);
        assert_eq!(body["max_tokens"], 1024);
        assert_eq!(body["system"], "You are a data analysis assistant.");
        assert_eq!(body["tools"][0]["name"], "citation-stats");
        assert_eq!(body["messages"][0]["role"], "user");
        assert_eq!(body["messages"][0]["content"], "What are the citation stats?");
    }

    #[test]
    fn test_tool_result_content_is_stringified() {
        let messages = vec![Message::from_blocks(
            MessageRole::User,
            vec![ContentBlock::tool_result(
                "toolu_01",
                json!({"total_papers": 42}),
            )],
        )];
        let wire = wire_messages(&messages);
        let content = &wire[0]["content"][0];
        assert_eq!(content["type"], "tool_result");
        assert_eq!(content["tool_use_id"], "toolu_01");
        assert_eq!(content["content"], "{\"total_papers\":42}");
    }

    #[test]
    fn test_assistant_blocks_round_trip_to_wire() {
        let messages = vec![Message::from_blocks(
            MessageRole::Assistant,
            vec![
                ContentBlock::text("Checking."),
                ContentBlock::tool_use("toolu_02", "yearly-trend", json!({"metric": "papers"})),
            ],
        )];
        let wire = wire_messages(&messages);
        assert_eq!(wire[0]["role"], "assistant");
        assert_eq!(wire[0]["content"][0]["text"], "Checking.");
        assert_eq!(wire[0]["content"][1]["name"], "yearly-trend");
        assert_eq!(wire[0]["content"][1]["input"]["metric"], "papers");
    }

    #[test]
    fn test_parse_reply_with_tool_use() {
        let body = json!({
            "content": [
                {"type": "text", "text": "Let me query that."},
                {"type": "tool_use", "id": "toolu_03", "name": "papers-by-year",
                 "input": {"start_year": 2020, "end_year": 2024}}
            ],
            "stop_reason": "tool_use"
        });
        let reply = parse_reply(&body).unwrap();
        assert_eq!(reply.stop, StopCondition::ToolUse);
        let requests = reply.tool_requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].name, "papers-by-year");
        assert_eq!(requests[0].input["start_year"], 2020);
    }

    #[test]
    fn test_parse_reply_final_answer() {
        let body = json!({
            "content": [{"type": "text", "text": "There were 120 papers."}],
            "stop_reason": "end_turn"
        });
        let reply = parse_reply(&body).unwrap();
        assert_eq!(reply.stop, StopCondition::Final);
        assert_eq!(reply.text(), "There were 120 papers.");
    }

    #[test]
    fn test_parse_reply_skips_unknown_block_types() {
        let body = json!({
            "content": [
                {"type": "thinking", "thinking": "..."},
                {"type": "text", "text": "Done."}
            ],
            "stop_reason": "end_turn"
        });
        let reply = parse_reply(&body).unwrap();
        assert_eq!(reply.content.len(), 1);
        assert_eq!(reply.text(), "Done.");
    }

    #[test]
    fn test_parse_reply_without_content_is_malformed() {
        let err = parse_reply(&json!({"stop_reason": "end_turn"})).unwrap_err();
        assert!(matches!(err, ServiceError::MalformedReply(_)));
    }
}
