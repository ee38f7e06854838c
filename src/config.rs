//! Configuration for paragraph sorting.

use crate::error::Result;
use serde::{Deserialize, Serialize};

/// Direction in which alphabet ranks are ordered.
///
/// Only affects strings made entirely of alphabet letters. Strings with
/// characters outside the alphabet always fall back to ascending code-point
/// order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortDirection {
    /// Higher rank first at the first differing letter; a prefix sorts
    /// after its extensions.
    #[default]
    Descending,
    /// Lower rank first; a prefix sorts before its extensions.
    Ascending,
}

/// Paragraph sorting configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SortConfig {
    /// Rank ordering policy.
    pub direction: SortDirection,

    /// WordprocessingML namespace prefix used for `body`, `p` and `t`.
    pub namespace_prefix: String,

    /// Re-parse the serialized output and reject it if it is not well-formed.
    pub verify_output: bool,
}

impl Default for SortConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl SortConfig {
    /// Create new configuration with defaults.
    pub fn new() -> Self {
        Self {
            direction: SortDirection::Descending,
            namespace_prefix: "w".to_string(),
            verify_output: true,
        }
    }

    /// Set the rank ordering policy.
    pub fn with_direction(mut self, direction: SortDirection) -> Self {
        self.direction = direction;
        self
    }

    /// Set the WordprocessingML namespace prefix (empty for unprefixed XML).
    pub fn with_namespace_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.namespace_prefix = prefix.into();
        self
    }

    /// Enable or disable the output well-formedness check.
    pub fn with_verify_output(mut self, enable: bool) -> Self {
        self.verify_output = enable;
        self
    }

    /// Load configuration from JSON. Missing fields keep their defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Qualified element name for a WordprocessingML local name.
    pub(crate) fn qualified(&self, local: &str) -> Vec<u8> {
        if self.namespace_prefix.is_empty() {
            local.as_bytes().to_vec()
        } else {
            format!("{}:{}", self.namespace_prefix, local).into_bytes()
        }
    }
}
