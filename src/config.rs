//! Runtime configuration resolved from the process environment.
//!
//! Every knob has a compiled-in default and an `SCISCI_`-prefixed override,
//! so a bare `scisci-server` start works against the bundled data directory.
//! The API credential is NOT part of [`Settings`]; it is resolved by the
//! service client at construction (keyring, then `ANTHROPIC_API_KEY`).

use std::env;
use std::path::PathBuf;

use crate::agent::DEFAULT_MAX_ROUNDS;
use crate::service::anthropic::{DEFAULT_MAX_TOKENS, DEFAULT_MODEL};

pub const DEFAULT_DATA_DIR: &str = "data";
pub const DEFAULT_BIND: &str = "127.0.0.1:5001";

#[derive(Debug, Clone)]
pub struct Settings {
    /// Model identifier sent on every round. `SCISCI_MODEL`.
    pub model: String,
    /// Per-reply token ceiling. `SCISCI_MAX_TOKENS`.
    pub max_tokens: u32,
    /// Tool-round cap per conversation. `SCISCI_MAX_ROUNDS`.
    pub max_rounds: u32,
    /// Directory holding the dataset JSON tables. `SCISCI_DATA_DIR`.
    pub data_dir: PathBuf,
    /// Listen address for the HTTP facade. `SCISCI_BIND`.
    pub bind: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            model: DEFAULT_MODEL.to_string(),
            max_tokens: DEFAULT_MAX_TOKENS,
            max_rounds: DEFAULT_MAX_ROUNDS,
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
            bind: DEFAULT_BIND.to_string(),
        }
    }
}

impl Settings {
    /// Read settings from the environment, falling back to the defaults
    /// for anything unset or unparseable.
    pub fn from_env() -> Self {
        Self {
            model: env::var("SCISCI_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.to_string()),
            max_tokens: env::var("SCISCI_MAX_TOKENS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(DEFAULT_MAX_TOKENS),
            max_rounds: env::var("SCISCI_MAX_ROUNDS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(DEFAULT_MAX_ROUNDS),
            data_dir: env::var("SCISCI_DATA_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from(DEFAULT_DATA_DIR)),
            bind: env::var("SCISCI_BIND").unwrap_or_else(|_| DEFAULT_BIND.to_string()),
        }
    }
}
