//! # sciscinet-agent
//!
//! 基于工具调用的科研数据问答 Agent，面向 SciSciNet UMD 计算机科学数据集。
//!
//! A tool-augmented conversation agent over a SciSciNet-derived corpus of
//! UMD Computer Science papers, authors, and citations, with Vega-Lite
//! chart extraction.
//!
//! ## Overview
//!
//! A question runs through a capped multi-round loop against the Anthropic
//! Messages API: the model requests dataset queries, the agent executes
//! them and feeds the results back, and the final reply is returned
//! together with any Vega-Lite spec the model emitted and the full audit
//! trail of tool calls.
//!
//! ## Key Features
//!
//! - **Tool Registry**: declarative [`ToolDescriptor`]s, derived JSON
//!   schemas, and dispatch that converts unknown names and handler faults
//!   into error payloads the model can read and self-correct from
//! - **Conversation Orchestrator**: [`Agent`] owns the round loop, the
//!   per-call audit trail, and the round cap that turns a tool-happy model
//!   into a clean [`Error::RoundLimit`] instead of an endless conversation
//! - **Dataset Store**: four JSON tables loaded once per process, six
//!   aggregate queries over papers, authors, and citations
//! - **Visualization**: duck-typed extraction of fenced Vega-Lite specs
//!   from replies, plus chart builders for the raw data endpoints
//! - **HTTP Facade**: axum endpoints mirroring the chat and raw-data
//!   surface (feature `server`, enabled by default)
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use sciscinet_agent::Agent;
//!
//! #[tokio::main]
//! async fn main() -> sciscinet_agent::Result<()> {
//!     let agent = Agent::builder().build()?;
//!
//!     let outcome = agent
//!         .chat("How many papers were published each year from 2020 to 2024?")
//!         .await?;
//!
//!     println!("{}", outcome.text);
//!     if let Some(chart) = outcome.visualization {
//!         println!("{}", chart);
//!     }
//!
//!     Ok(())
//! }
//! ```
//!
//! Construction fails fast when no Anthropic credential is resolvable
//! (OS keyring first, then `ANTHROPIC_API_KEY`). Runtime knobs come from
//! `SCISCI_*` environment variables; see [`config::Settings`].
//!
//! ## Module Organization
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`agent`] | Conversation orchestrator, builder, system instruction |
//! | [`tools`] | Tool descriptors, schema derivation, registry dispatch |
//! | [`dataset`] | JSON table store and the six aggregate queries |
//! | [`service`] | Reasoning-service seam and the Anthropic client |
//! | [`viz`] | Vega-Lite extraction and chart construction |
//! | [`types`] | Core message and tool types |
//! | [`config`] | Environment-driven settings |
//! | [`server`] | axum HTTP facade (feature `server`) |

pub mod agent;
pub mod config;
pub mod dataset;
pub mod service;
pub mod tools;
pub mod types;
pub mod viz;

#[cfg(feature = "server")]
pub mod server;

// Re-export main types for convenience
pub use agent::{Agent, AgentBuilder, ChatOutcome};
pub use config::Settings;
pub use dataset::DatasetStore;
pub use service::{AnthropicClient, ReasoningService};
pub use tools::{ToolDescriptor, ToolRegistry};
pub use types::{ToolCallRecord, ToolSchema};

/// Result type alias for the library
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for the library
pub mod error;
pub use error::Error;
