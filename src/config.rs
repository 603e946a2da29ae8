/// Per-channel configuration for the replacer.
///
/// The host owns storage and scoping (per channel, per network); this crate
/// only consumes a resolved snapshot per invocation. The struct derives
/// serde so hosts can load it straight from TOML.
use serde::{Deserialize, Serialize};
use std::time::Duration;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReplacerConfig {
    /// Whether history correction is active at all.
    #[serde(default = "default_enabled")]
    pub enabled: bool,

    /// Surface parse/regex/timeout errors and "not found" notices to the
    /// user instead of only logging them.
    #[serde(default)]
    pub display_errors: bool,

    /// Wrap the replacement text in bold markers so the changed portion
    /// stands out in the corrected line.
    #[serde(default = "default_bold_replacement_text")]
    pub bold_replacement_text: bool,

    /// Skip messages that are themselves correction output.
    #[serde(default)]
    pub ignore_replaced: bool,

    /// Wall-clock budget for each regex match/substitution step, in
    /// milliseconds. Zero disables the budget.
    #[serde(default = "default_process_timeout_ms")]
    pub process_timeout_ms: u64,
}

fn default_enabled() -> bool {
    true
}

fn default_bold_replacement_text() -> bool {
    true
}

fn default_process_timeout_ms() -> u64 {
    500
}

impl Default for ReplacerConfig {
    fn default() -> Self {
        Self {
            enabled: default_enabled(),
            display_errors: false,
            bold_replacement_text: default_bold_replacement_text(),
            ignore_replaced: false,
            process_timeout_ms: default_process_timeout_ms(),
        }
    }
}

impl ReplacerConfig {
    /// Budget for a single regex step. `None` means unbounded.
    pub fn process_timeout(&self) -> Option<Duration> {
        if self.process_timeout_ms == 0 {
            None
        } else {
            Some(Duration::from_millis(self.process_timeout_ms))
        }
    }
}
