//! The reasoning-service seam.
//!
//! The orchestrator depends only on [`ReasoningService`]: one blocking
//! round-trip per call, taking the full conversation state and yielding a
//! reply with a stop condition. [`anthropic::AnthropicClient`] is the
//! production implementation; tests script the trait directly.

use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;

use crate::types::{ContentBlock, Message, ToolSchema};

pub mod anthropic;

pub use anthropic::AnthropicClient;

/// Everything the service needs for one round: the fixed system
/// instruction, the declared tools, and the history so far.
#[derive(Debug, Clone, Copy)]
pub struct RoundRequest<'a> {
    pub system: &'a str,
    pub tools: &'a [ToolSchema],
    pub messages: &'a [Message],
}

/// The service's declared stop condition for a reply.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopCondition {
    /// The reply carries tool-invocation requests that must be answered
    /// before the conversation can continue.
    ToolUse,
    /// The reply is the final answer.
    Final,
}

impl StopCondition {
    /// Map a wire-level stop reason onto the two-way condition the
    /// protocol cares about. Anything that is not an explicit tool-use
    /// request finalizes the conversation.
    pub fn from_stop_reason(reason: Option<&str>) -> Self {
        match reason {
            Some("tool_use") => StopCondition::ToolUse,
            _ => StopCondition::Final,
        }
    }
}

/// One tool-invocation request extracted from a reply.
#[derive(Debug, Clone, Copy)]
pub struct ToolRequest<'a> {
    pub id: &'a str,
    pub name: &'a str,
    pub input: &'a Value,
}

/// One reply from the reasoning service.
#[derive(Debug, Clone)]
pub struct ServiceReply {
    pub stop: StopCondition,
    pub content: Vec<ContentBlock>,
}

impl ServiceReply {
    /// All tool-invocation requests in the reply, in content order.
    pub fn tool_requests(&self) -> Vec<ToolRequest<'_>> {
        self.content
            .iter()
            .filter_map(|block| match block {
                ContentBlock::ToolUse { id, name, input } => Some(ToolRequest {
                    id,
                    name,
                    input,
                }),
                _ => None,
            })
            .collect()
    }

    /// Concatenate the plain-text parts of the reply, in order.
    pub fn text(&self) -> String {
        let mut out = String::new();
        for block in &self.content {
            if let ContentBlock::Text { text } = block {
                out.push_str(text);
            }
        }
        out
    }
}

/// Failure of one round-trip. Not retried; the caller decides what to do.
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("service returned HTTP {status}: {message}")]
    Api { status: u16, message: String },

    #[error("malformed service reply: {0}")]
    MalformedReply(String),
}

/// External collaborator that decides, per round, whether to request tool
/// invocations or produce the final answer.
#[async_trait]
pub trait ReasoningService: Send + Sync {
    async fn round(&self, request: RoundRequest<'_>) -> Result<ServiceReply, ServiceError>;
}
