//! Builder and serializer settings.
//!
//! Both structs deserialize with defaults for every missing field, so they
//! can be embedded in a larger configuration document.

use serde::{Deserialize, Serialize};

/// What to do when the event stream is structurally odd.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AnomalyPolicy {
    /// Log the anomaly, record a diagnostic and keep building.
    #[default]
    Degrade,
    /// Fail the whole document.
    Abort,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct BuildOptions {
    pub anomaly_policy: AnomalyPolicy,

    /// Deepest nesting accepted before the build fails.
    pub max_depth: usize,

    /// Cap on live records; `None` means unbounded.
    pub record_limit: Option<usize>,
}

impl Default for BuildOptions {
    fn default() -> Self {
        Self {
            anomaly_policy: AnomalyPolicy::Degrade,
            max_depth: 256,
            record_limit: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct SerializeOptions {
    /// Spaces added per nesting level.
    pub indent_step: usize,
}

impl Default for SerializeOptions {
    fn default() -> Self {
        Self { indent_step: 2 }
    }
}
