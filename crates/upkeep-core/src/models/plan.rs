//! Maintenance plan model definition.

use jiff::{Timestamp, civil::Date};
use serde::{Deserialize, Serialize};

use super::{Frequency, TriggerType, Weekday};

/// A recurring-maintenance definition attached to a set of assets.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MaintenancePlan {
    /// Unique identifier for the plan
    pub id: u64,

    /// Station (tenant) that owns the plan
    pub station_id: u64,

    /// Human-readable name of the plan
    pub name: String,

    /// Only active plans take part in order generation
    pub active: bool,

    /// Whether the plan follows the calendar or usage hours
    pub trigger_type: TriggerType,

    /// Anchor date every occurrence is computed from
    pub start_date: Date,

    /// Calendar unit, required for time-triggered plans
    pub frequency: Option<Frequency>,

    /// Every `interval` units of `frequency`; at least 1
    pub interval: i64,

    /// Pinned day of week for weekly plans
    pub weekday: Option<Weekday>,

    /// Usage hours between services for usage-triggered plans
    pub usage_hours_trigger: Option<f64>,

    /// Asset IDs covered by the plan
    #[serde(default)]
    pub assets: Vec<u64>,

    /// Timestamp when the plan was created (UTC)
    pub created_at: Timestamp,

    /// Timestamp when the plan was last modified (UTC)
    pub updated_at: Timestamp,
}

impl MaintenancePlan {
    /// Whether the plan is a candidate for the daily calendar run on `date`.
    pub fn is_candidate_on(&self, date: Date) -> bool {
        self.active && self.trigger_type == TriggerType::Time && self.start_date <= date
    }
}
