//! # Configuration
//!
//! Bridge behavior that is a policy choice rather than part of the protocol is
//! configured through [`BridgeConfig`], loaded with [`confique`].
//!
//! ## Resolution Order
//!
//! 1. **Environment variables**: `ATTR_BRIDGE_RENDER_FAILURE`, `ATTR_BRIDGE_STRICT_NAMES`.
//! 2. **Config file**: an optional TOML file passed to [`BridgeConfig::load`].
//! 3. **Compiled defaults**: via `#[config(default = ...)]`.
//!
//! ## Available Settings
//!
//! | Key | Default | Description |
//! |-----|---------|-------------|
//! | `render_failure` | `"commit"` | `"commit"` keeps attribute/state writes when a render fails; `"rollback"` restores them |
//! | `strict_names` | `true` | Reject registry names that are not valid custom element names |

use crate::error::Result;
use confique::Config;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// What an update does with its writes when the render it triggered fails.
///
/// Parsed from a plain string so environment variables, TOML and compiled
/// defaults all accept the same spelling.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase", try_from = "String")]
pub enum RenderFailurePolicy {
    /// Keep attribute writes and the state merge; only the error is reported.
    #[default]
    Commit,
    /// Restore touched state entries and attribute texts, then report the error.
    Rollback,
}

impl TryFrom<String> for RenderFailurePolicy {
    type Error = String;

    fn try_from(value: String) -> std::result::Result<Self, Self::Error> {
        match value.trim().to_ascii_lowercase().as_str() {
            "commit" => Ok(RenderFailurePolicy::Commit),
            "rollback" => Ok(RenderFailurePolicy::Rollback),
            other => Err(format!(
                "unknown render failure policy `{other}` (expected `commit` or `rollback`)"
            )),
        }
    }
}

#[derive(Config, Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct BridgeConfig {
    #[config(env = "ATTR_BRIDGE_RENDER_FAILURE", default = "commit")]
    pub render_failure: RenderFailurePolicy,

    #[config(env = "ATTR_BRIDGE_STRICT_NAMES", default = true)]
    pub strict_names: bool,
}

impl Default for BridgeConfig {
    fn default() -> Self {
        Self {
            render_failure: RenderFailurePolicy::Commit,
            strict_names: true,
        }
    }
}

impl BridgeConfig {
    /// Load from the environment, then `file` (if given and present), then defaults.
    pub fn load(file: Option<&Path>) -> Result<Self> {
        let mut builder = Self::builder().env();
        if let Some(path) = file {
            builder = builder.file(path);
        }
        Ok(builder.load()?)
    }

    pub fn with_render_failure(mut self, policy: RenderFailurePolicy) -> Self {
        self.render_failure = policy;
        self
    }

    pub fn with_strict_names(mut self, strict: bool) -> Self {
        self.strict_names = strict;
        self
    }
}
