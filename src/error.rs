use crate::dataset::DatasetError;
use crate::service::ServiceError;
use thiserror::Error;

/// Unified error type for the agent runtime.
/// Aggregates module-level errors into the categories callers act on.
#[derive(Debug, Error)]
pub enum Error {
    /// Missing or unusable runtime configuration (credential, bind address).
    /// Raised at construction time, never mid-conversation.
    #[error("Configuration error: {message}")]
    Configuration { message: String },

    /// A round-trip to the reasoning service failed. Propagated to the
    /// caller without retries.
    #[error("Reasoning service error: {0}")]
    Service(#[from] ServiceError),

    /// The underlying dataset tables could not be loaded or parsed.
    #[error("Dataset error: {0}")]
    Dataset(#[from] DatasetError),

    /// The service kept requesting tools past the configured round cap.
    /// Distinct from `Service` so callers can tell "service unreachable"
    /// from "service never produced a final answer".
    #[error("Conversation exceeded {rounds} tool rounds without a final answer")]
    RoundLimit { rounds: u32 },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl Error {
    /// Create a configuration error from any printable message.
    pub fn configuration(message: impl Into<String>) -> Self {
        Error::Configuration {
            message: message.into(),
        }
    }

    /// True when the conversation was aborted by the round cap.
    pub fn is_round_limit(&self) -> bool {
        matches!(self, Error::RoundLimit { .. })
    }
}
