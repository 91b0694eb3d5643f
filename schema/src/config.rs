//! Engine configuration
//!
//! Every field has a default so an empty JSON object is a valid configuration.

use std::path::Path;

use serde::Deserialize;
use serde::Serialize;
use strum::Display;

use crate::error::Error;
use crate::error::Result;

/// What to do when two properties of one type end up with the same visible name
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Display, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum DuplicatePropertyPolicy {
    /// Keep the first declaration and log a warning
    #[default]
    KeepFirst,
    /// Fail the request
    Reject,
}

/// What to do with a literal override pointer naming no known type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Display, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum LiteralRefPolicy {
    /// Fail the request
    #[default]
    RejectUnknown,
    /// Emit the pointer text unchanged
    KeepUnknown,
}

/// Knobs shared by every request of one assembler
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Reuse finished documents across requests
    pub warm_cache:           bool,
    /// Handling of properties that collide after renaming
    pub duplicate_properties: DuplicatePropertyPolicy,
    /// Handling of `#/$defs/` pointers naming no known type
    pub literal_refs:         LiteralRefPolicy,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            warm_cache:           true,
            duplicate_properties: DuplicatePropertyPolicy::default(),
            literal_refs:         LiteralRefPolicy::default(),
        }
    }
}

impl EngineConfig {
    /// Parse a configuration from JSON text
    pub fn from_json_str(text: &str) -> Result<Self> {
        serde_json::from_str(text)
            .map_err(|e| Error::invalid("engine configuration", e).into())
    }

    /// Read a JSON configuration file
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| {
            Error::failed_to("read engine configuration", format!("{}: {e}", path.display()))
        })?;
        Self::from_json_str(&text)
    }

    /// Same configuration with the warm cache disabled
    #[must_use]
    pub const fn without_cache(mut self) -> Self {
        self.warm_cache = false;
        self
    }
}
