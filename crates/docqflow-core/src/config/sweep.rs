//! Reminder sweep trigger configuration.

use serde::{Deserialize, Serialize};

/// Configuration for the periodic reminder sweep.
///
/// The sweep itself is stateless; this only controls how the in-process
/// cron trigger fires and which pre-shared secret unscoped HTTP callers
/// must present.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SweepConfig {
    /// Whether the in-process cron trigger runs at all. Disable when an
    /// external cron invokes the sweep endpoint or CLI instead.
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    /// Six-field cron expression for the trigger (seconds resolution).
    #[serde(default = "default_cron")]
    pub cron: String,
    /// Pre-shared secret required from unscoped HTTP sweep callers.
    /// When unset, only authenticated scoped callers and the CLI may sweep.
    #[serde(default)]
    pub shared_secret: Option<String>,
}

impl Default for SweepConfig {
    fn default() -> Self {
        Self {
            enabled: default_enabled(),
            cron: default_cron(),
            shared_secret: None,
        }
    }
}

fn default_enabled() -> bool {
    true
}

fn default_cron() -> String {
    // top of every minute
    "0 * * * * *".to_string()
}
