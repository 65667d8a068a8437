//! 工具注册表 — 工具声明、调度与故障隔离
//!
//! Tool registry and execution engine. Tools are registered once at
//! startup as (descriptor, handler) pairs in declaration order; the
//! registry derives the service-facing schemas and dispatches invocation
//! requests by name. Execution is a fault boundary: an unknown name or a
//! failing handler becomes an `{"error": ...}` payload for the reasoning
//! service to react to, never an interruption of the conversation.

use serde_json::{json, Value};
use tracing::{debug, warn};

use crate::dataset::DatasetError;
use crate::types::ToolSchema;

pub mod catalog;
mod descriptor;

pub use descriptor::{normalize_type, ParamSpec, ToolDescriptor};

/// Fault raised by a tool handler. Its display text is what the reasoning
/// service sees in the error payload.
#[derive(Debug, thiserror::Error)]
pub enum ToolError {
    #[error("invalid arguments: {0}")]
    InvalidArguments(String),

    #[error(transparent)]
    Dataset(#[from] DatasetError),

    #[error(transparent)]
    Serialization(#[from] serde_json::Error),

    #[error("{0}")]
    Failed(String),
}

impl ToolError {
    pub fn failed(message: impl Into<String>) -> Self {
        ToolError::Failed(message.into())
    }
}

/// A tool implementation: pure lookup over process-lifetime data, so
/// handlers are synchronous and shareable across conversations.
pub type ToolHandler = Box<dyn Fn(&Value) -> Result<Value, ToolError> + Send + Sync>;

struct RegisteredTool {
    descriptor: ToolDescriptor,
    handler: ToolHandler,
}

/// Ordered mapping from tool name to handler plus descriptor. Immutable
/// once built; safe for concurrent reads.
#[derive(Default)]
pub struct ToolRegistry {
    tools: Vec<RegisteredTool>,
}

impl ToolRegistry {
    pub fn new() -> Self {
        Self { tools: Vec::new() }
    }

    /// Register a tool. Names are expected to be unique; lookup returns
    /// the first registration for a name.
    pub fn register(&mut self, descriptor: ToolDescriptor, handler: ToolHandler) {
        self.tools.push(RegisteredTool {
            descriptor,
            handler,
        });
    }

    /// Derive the service-facing schema for every tool, in registration
    /// order.
    pub fn schemas(&self) -> Vec<ToolSchema> {
        self.tools.iter().map(|t| t.descriptor.schema()).collect()
    }

    /// Iterate the registered descriptors in registration order.
    pub fn descriptors(&self) -> impl Iterator<Item = &ToolDescriptor> {
        self.tools.iter().map(|t| &t.descriptor)
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }

    /// Dispatch one invocation. Always yields a result payload: an unknown
    /// name or a handler fault is converted into an `{"error": ...}`
    /// envelope carrying the fault's message. Local lookups are
    /// deterministic, so there are no retries.
    pub fn execute(&self, name: &str, args: &Value) -> Value {
        let tool = match self.tools.iter().find(|t| t.descriptor.name == name) {
            Some(tool) => tool,
            None => {
                warn!(tool = name, "unknown tool requested");
                return json!({ "error": format!("Unknown tool: {}", name) });
            }
        };

        debug!(tool = name, "executing tool");
        match (tool.handler)(args) {
            Ok(result) => result,
            Err(err) => {
                warn!(tool = name, error = %err, "tool execution fault");
                json!({ "error": err.to_string() })
            }
        }
    }
}
