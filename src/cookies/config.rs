//! Codec configuration.

use crate::base::error::CookieError;
use serde::{Deserialize, Serialize};

/// What the read path does with a segment that has no `=`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MalformedSegmentPolicy {
    /// Ignore the segment and keep scanning.
    #[default]
    Skip,
    /// End the scan; later entries are unreachable.
    Stop,
}

/// Cookie codec configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CodecConfig {
    /// Handling of segments without a `=`
    pub malformed_segments: MalformedSegmentPolicy,
}

impl CodecConfig {
    /// Create a new config with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the malformed segment policy.
    pub fn malformed_segments(mut self, policy: MalformedSegmentPolicy) -> Self {
        self.malformed_segments = policy;
        self
    }

    /// Load from a JSON object such as `{"malformed_segments": "stop"}`.
    pub fn from_json(json: &str) -> Result<Self, CookieError> {
        serde_json::from_str(json).map_err(|e| {
            tracing::debug!(error = %e, "rejecting codec config");
            CookieError::validation("config", "a JSON object with known codec options")
        })
    }
}
