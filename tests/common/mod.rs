//! Shared test doubles and fixtures for the integration tests.

use std::collections::VecDeque;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use serde_json::Value;

use sciscinet_agent::service::{
    ReasoningService, RoundRequest, ServiceError, ServiceReply, StopCondition,
};
use sciscinet_agent::types::{ContentBlock, Message};
use sciscinet_agent::DatasetStore;

/// Directory with the four sample dataset tables.
pub fn fixture_dir() -> PathBuf {
    std::path::Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
}

pub fn fixture_store() -> Arc<DatasetStore> {
    Arc::new(DatasetStore::new(fixture_dir()))
}

/// Plays back a scripted sequence of replies and snapshots the history it
/// was shown on every round, so tests can assert on exactly what the
/// orchestrator sent. Clones share state: hand one handle to the agent and
/// keep another for assertions.
#[derive(Clone)]
pub struct ScriptedService {
    state: Arc<ScriptState>,
}

struct ScriptState {
    replies: Mutex<VecDeque<ServiceReply>>,
    histories: Mutex<Vec<Vec<Message>>>,
}

impl ScriptedService {
    pub fn new(replies: Vec<ServiceReply>) -> Self {
        Self {
            state: Arc::new(ScriptState {
                replies: Mutex::new(replies.into()),
                histories: Mutex::new(Vec::new()),
            }),
        }
    }

    /// History snapshots, one per round served.
    pub fn histories(&self) -> Vec<Vec<Message>> {
        self.state.histories.lock().unwrap().clone()
    }

    pub fn rounds_served(&self) -> usize {
        self.state.histories.lock().unwrap().len()
    }
}

#[async_trait]
impl ReasoningService for ScriptedService {
    async fn round(&self, request: RoundRequest<'_>) -> Result<ServiceReply, ServiceError> {
        self.state
            .histories
            .lock()
            .unwrap()
            .push(request.messages.to_vec());
        self.state
            .replies
            .lock()
            .unwrap()
            .pop_front()
            .ok_or_else(|| ServiceError::MalformedReply("script exhausted".to_string()))
    }
}

pub fn tool_use_reply(blocks: Vec<ContentBlock>) -> ServiceReply {
    ServiceReply {
        stop: StopCondition::ToolUse,
        content: blocks,
    }
}

pub fn final_reply(text: &str) -> ServiceReply {
    ServiceReply {
        stop: StopCondition::Final,
        content: vec![ContentBlock::text(text)],
    }
}

pub fn tool_use_block(id: &str, name: &str, input: Value) -> ContentBlock {
    ContentBlock::tool_use(id, name, input)
}
