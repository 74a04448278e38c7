//! `[watch]` section configuration.
//!
//! # Example
//!
//! ```toml
//! [watch]
//! enable = true               # Regenerate the manifest on asset changes
//! debounce_ms = 0             # 0 = one regeneration per filesystem event
//! ```

use serde::{Deserialize, Serialize};

/// Asset watcher settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WatchConfig {
    /// Enable the asset watcher.
    pub enable: bool,

    /// Quiet period (milliseconds) used to coalesce event bursts.
    ///
    /// `0` disables coalescing: every delivered event regenerates.
    pub debounce_ms: u64,
}

impl Default for WatchConfig {
    fn default() -> Self {
        Self {
            enable: true,
            debounce_ms: 0,
        }
    }
}
