//! Per-machine configuration.

use serde::{Deserialize, Serialize};

/// Default bound on queued transition requests applied by one outer call.
pub const DEFAULT_MAX_CHAINED_TRANSITIONS: usize = 64;

/// Tunables for a single [`StateMachine`](super::StateMachine).
///
/// None of these change transition semantics; they only control what the
/// machine remembers and reports.
///
/// # Example
///
/// ```rust
/// use stance::machine::MachineConfig;
///
/// let config: MachineConfig =
///     serde_json::from_str(r#"{ "label": "player", "history_capacity": 16 }"#).unwrap();
///
/// assert_eq!(config.label.as_deref(), Some("player"));
/// assert_eq!(config.history_capacity, 16);
/// assert!(!config.trace_rejections);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MachineConfig {
    /// Name attached to every log line of this machine
    pub label: Option<String>,

    /// Number of committed transitions kept in history (0 disables history)
    pub history_capacity: usize,

    /// Maximum transitions committed per outer call; later requests are dropped.
    /// Values below 1 behave as 1.
    pub max_chained_transitions: usize,

    /// Log every rejected transition at debug level
    pub trace_rejections: bool,
}

impl Default for MachineConfig {
    fn default() -> Self {
        Self {
            label: None,
            history_capacity: 0,
            max_chained_transitions: DEFAULT_MAX_CHAINED_TRANSITIONS,
            trace_rejections: false,
        }
    }
}

impl MachineConfig {
    pub fn labeled(label: impl Into<String>) -> Self {
        Self {
            label: Some(label.into()),
            ..Self::default()
        }
    }

    pub(crate) fn chain_limit(&self) -> usize {
        self.max_chained_transitions.max(1)
    }
}
