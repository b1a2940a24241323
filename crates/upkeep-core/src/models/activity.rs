//! Audit trail entries.

use jiff::Timestamp;
use serde::{Deserialize, Serialize};

/// Verb recorded when a plan's asset list is edited.
pub const PLAN_ASSETS_CHANGED: &str = "changed the asset list of the plan";

/// Target kind used for maintenance plans in the activity log.
pub const PLAN_TARGET: &str = "maintenance_plan";

/// Window in which consecutive edits by the same actor are merged.
pub const GROUPING_WINDOW_MINUTES: i64 = 15;

/// Number of change lines kept in a merged entry.
pub const HISTORY_LIMIT: usize = 20;

/// One line in the station's activity log.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ActivityEntry {
    pub id: u64,
    pub station_id: u64,

    /// Who made the change; `None` for system jobs
    pub actor: Option<String>,

    pub verb: String,
    pub target_kind: String,
    pub target_id: u64,

    /// Free-form payload, see [`ChangeDetails`] for plan asset edits
    pub details: serde_json::Value,

    pub recorded_at: Timestamp,
}

/// Details payload for grouped plan asset edits.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ChangeDetails {
    #[serde(default)]
    pub total_changes: u32,
    #[serde(default)]
    pub change_history: Vec<String>,
}

impl ChangeDetails {
    /// Appends a change line, keeping only the most recent
    /// [`HISTORY_LIMIT`] lines.
    pub fn push(&mut self, line: String) {
        self.change_history.push(line);
        if self.change_history.len() > HISTORY_LIMIT {
            let excess = self.change_history.len() - HISTORY_LIMIT;
            self.change_history.drain(..excess);
        }
        self.total_changes += 1;
    }
}
