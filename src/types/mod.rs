//! 类型系统模块：会话消息与工具调用的核心数据类型。
//!
//! # Types Module
//!
//! Core data types shared across the agent: conversation messages in the
//! reasoning service's wire shape, derived tool schemas, and the audit
//! record kept for every tool invocation.
//!
//! ## Key Types
//!
//! | Type | Description |
//! |------|-------------|
//! | [`Message`] | Conversation message with role and content |
//! | [`MessageRole`] | Message role (user, assistant) |
//! | [`ContentBlock`] | Typed content part (text, tool_use, tool_result) |
//! | [`ToolSchema`] | Service-facing tool declaration |
//! | [`ToolCallRecord`] | Audit entry for one tool invocation |

pub mod message;
pub mod tool;

pub use message::{ContentBlock, Message, MessageContent, MessageRole};
pub use tool::{ToolCallRecord, ToolSchema};
