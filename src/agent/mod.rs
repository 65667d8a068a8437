//! 对话编排器 — 工具增强的多轮推理循环
//!
//! The conversation orchestrator. One `chat` call runs the full
//! tool-augmented loop against the reasoning service:
//!
//! 1. seed history with the user's question;
//! 2. send { system instruction, tool schemas, history } for a round;
//! 3. on a tool-use stop, execute every requested tool, record the calls,
//!    append the assistant reply and one combined tool-result message, and
//!    loop;
//! 4. on a final stop, concatenate the text parts, extract any fenced
//!    Vega-Lite spec, and return.
//!
//! Rounds are capped so a service that keeps requesting tools terminates
//! with a distinct [`Error::RoundLimit`] instead of looping forever.

use std::sync::Arc;

use serde::Serialize;
use serde_json::Value;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::config::Settings;
use crate::dataset::DatasetStore;
use crate::service::{AnthropicClient, ReasoningService, RoundRequest, StopCondition};
use crate::tools::{catalog, ToolRegistry};
use crate::types::{ContentBlock, Message, MessageRole, ToolCallRecord};
use crate::{Error, Result};

pub mod prompt;

pub use prompt::SYSTEM_PROMPT;

/// Default cap on reasoning rounds per conversation.
pub const DEFAULT_MAX_ROUNDS: u32 = 8;

/// The result of one conversation.
#[derive(Debug, Clone, Serialize)]
pub struct ChatOutcome {
    /// Concatenated text parts of the final reply.
    pub text: String,
    /// First fenced Vega-Lite spec found in the text, if any.
    pub visualization: Option<Value>,
    /// Audit trail of every tool invocation, in execution order.
    pub tool_calls: Vec<ToolCallRecord>,
}

/// Tool-augmented conversation orchestrator.
///
/// Holds no per-conversation state; a single `Agent` serves concurrent
/// `chat` calls.
pub struct Agent {
    service: Box<dyn ReasoningService>,
    registry: ToolRegistry,
    system_prompt: String,
    max_rounds: u32,
}

impl Agent {
    pub fn builder() -> AgentBuilder {
        AgentBuilder::new()
    }

    /// Run one conversation to completion.
    pub async fn chat(&self, user_message: impl Into<String>) -> Result<ChatOutcome> {
        let conversation = Uuid::new_v4();
        let schemas = self.registry.schemas();
        let mut messages = vec![Message::user(user_message)];
        let mut tool_calls: Vec<ToolCallRecord> = Vec::new();

        info!(%conversation, tools = schemas.len(), "starting conversation");

        for round in 0..self.max_rounds {
            let reply = self
                .service
                .round(RoundRequest {
                    system: &self.system_prompt,
                    tools: &schemas,
                    messages: &messages,
                })
                .await?;

            if reply.stop == StopCondition::ToolUse {
                let requests = reply.tool_requests();
                if requests.is_empty() {
                    // Declared tool-use with nothing to execute; treat the
                    // reply as final rather than re-sending an unchanged
                    // history.
                    warn!(%conversation, round, "tool-use stop without tool requests");
                    return Ok(self.finalize(conversation, reply.text(), tool_calls));
                }

                let mut results = Vec::with_capacity(requests.len());
                for request in &requests {
                    debug!(%conversation, round, tool = request.name, "executing tool");
                    let result = self.registry.execute(request.name, request.input);
                    tool_calls.push(ToolCallRecord {
                        tool: request.name.to_string(),
                        args: request.input.clone(),
                        result: result.clone(),
                    });
                    results.push(ContentBlock::tool_result(request.id, result));
                }

                messages.push(Message::from_blocks(MessageRole::Assistant, reply.content));
                messages.push(Message::from_blocks(MessageRole::User, results));
                continue;
            }

            return Ok(self.finalize(conversation, reply.text(), tool_calls));
        }

        warn!(%conversation, rounds = self.max_rounds, "round limit exceeded");
        Err(Error::RoundLimit {
            rounds: self.max_rounds,
        })
    }

    fn finalize(
        &self,
        conversation: Uuid,
        text: String,
        tool_calls: Vec<ToolCallRecord>,
    ) -> ChatOutcome {
        let visualization = crate::viz::extract_visualization(&text);
        info!(
            %conversation,
            tool_calls = tool_calls.len(),
            visualization = visualization.is_some(),
            "conversation finished"
        );
        ChatOutcome {
            text,
            visualization,
            tool_calls,
        }
    }
}

/// Explicit construction for [`Agent`]. Anything not supplied falls back
/// to the environment: the Anthropic client for the service, the dataset
/// catalog for the registry, [`SYSTEM_PROMPT`] for the instruction.
pub struct AgentBuilder {
    service: Option<Box<dyn ReasoningService>>,
    registry: Option<ToolRegistry>,
    system_prompt: Option<String>,
    max_rounds: Option<u32>,
}

impl AgentBuilder {
    pub fn new() -> Self {
        Self {
            service: None,
            registry: None,
            system_prompt: None,
            max_rounds: None,
        }
    }

    pub fn with_service(mut self, service: impl ReasoningService + 'static) -> Self {
        self.service = Some(Box::new(service));
        self
    }

    pub fn with_registry(mut self, registry: ToolRegistry) -> Self {
        self.registry = Some(registry);
        self
    }

    pub fn with_system_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.system_prompt = Some(prompt.into());
        self
    }

    pub fn with_max_rounds(mut self, max_rounds: u32) -> Self {
        self.max_rounds = Some(max_rounds);
        self
    }

    /// Build the agent. Fails here, not on the first `chat`, when the
    /// default service is wanted but no credential can be resolved.
    pub fn build(self) -> Result<Agent> {
        let settings = Settings::from_env();

        let service: Box<dyn ReasoningService> = match self.service {
            Some(service) => service,
            None => Box::new(AnthropicClient::from_env(
                settings.model,
                settings.max_tokens,
            )?),
        };

        let registry = match self.registry {
            Some(registry) => registry,
            None => catalog::dataset_registry(Arc::new(DatasetStore::new(settings.data_dir))),
        };

        Ok(Agent {
            service,
            registry,
            system_prompt: self
                .system_prompt
                .unwrap_or_else(|| SYSTEM_PROMPT.to_string()),
            max_rounds: self.max_rounds.unwrap_or(settings.max_rounds),
        })
    }
}

impl Default for AgentBuilder {
    fn default() -> Self {
        Self::new()
    }
}
