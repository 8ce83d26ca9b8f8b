//! Decoder configuration.

use serde::{Deserialize, Serialize};
use std::env;

/// Default limit on element nesting accepted by the XML tree builder.
pub const DEFAULT_MAX_DEPTH: usize = 256;

/// Environment variable overriding [`DecodeOptions::max_depth`].
pub const MAX_DEPTH_ENV: &str = "WMS_CAPABILITIES_MAX_DEPTH";

/// Options controlling how a capabilities document is read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecodeOptions {
    /// Maximum element nesting depth. Deeper documents are rejected before
    /// decoding starts.
    pub max_depth: usize,
}

impl Default for DecodeOptions {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

impl DecodeOptions {
    /// Load options from environment variables, falling back to defaults.
    pub fn from_env() -> Self {
        Self::from_env_value(env::var(MAX_DEPTH_ENV).ok())
    }

    /// Override the maximum nesting depth. Zero is ignored.
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        if max_depth > 0 {
            self.max_depth = max_depth;
        }
        self
    }

    fn from_env_value(value: Option<String>) -> Self {
        let max_depth = value
            .and_then(|v| v.trim().parse::<usize>().ok())
            .filter(|depth| *depth > 0)
            .unwrap_or(DEFAULT_MAX_DEPTH);
        Self { max_depth }
    }
}
