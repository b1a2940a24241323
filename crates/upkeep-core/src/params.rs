//! Parameter structures for maintenance operations
//!
//! These structures are shared by every interface (the CLI today) and carry
//! no framework-specific derives. Interface layers wrap them with their own
//! argument types and convert via `From`:
//!
//! ```text
//! ┌─────────────────┐    ┌─────────────────┐    ┌─────────────────┐
//! │   CLI Args      │    │  Core Params    │    │    Planner      │
//! │  (clap derives) │───▶│ (serde derives) │───▶│   operations    │
//! └─────────────────┘    └─────────────────┘    └─────────────────┘
//! ```

use jiff::civil::Date;
use serde::{Deserialize, Serialize};

use crate::models::{Frequency, OrderStatus, OrderType, TriggerType, Weekday};

/// Generic parameters for operations requiring just an ID.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Id {
    /// The ID of the resource to operate on
    pub id: u64,
}

/// Parameters for registering a station.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreateStation {
    pub name: String,
}

/// Parameters for registering an asset at a station.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreateAsset {
    pub station_id: u64,
    /// Inventory code, unique within the station
    pub code: String,
    pub name: String,
}

/// Parameters for listing assets.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ListAssets {
    pub station_id: Option<u64>,
}

/// Parameters for creating a maintenance plan.
///
/// Trigger fields are normalized by
/// [`validate_schedule`](crate::validation::validate_schedule) before the
/// plan is stored.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatePlan {
    pub station_id: u64,
    pub name: String,
    pub start_date: Date,
    #[serde(default)]
    pub trigger_type: TriggerType,
    pub frequency: Option<Frequency>,
    pub interval: Option<i64>,
    pub weekday: Option<Weekday>,
    pub usage_hours_trigger: Option<f64>,
    #[serde(default = "default_active")]
    pub active: bool,
}

fn default_active() -> bool {
    true
}

/// Parameters for editing a maintenance plan. `None` keeps the stored value.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdatePlan {
    pub id: u64,
    pub name: Option<String>,
    pub start_date: Option<Date>,
    pub active: Option<bool>,
    pub trigger_type: Option<TriggerType>,
    pub frequency: Option<Frequency>,
    pub interval: Option<i64>,
    pub weekday: Option<Weekday>,
    /// Remove the pinned weekday
    #[serde(default)]
    pub clear_weekday: bool,
    pub usage_hours_trigger: Option<f64>,
}

/// Parameters for listing plans.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ListPlans {
    pub station_id: Option<u64>,
    /// Also show plans switched off in the system
    #[serde(default)]
    pub include_inactive: bool,
    pub trigger_type: Option<TriggerType>,
    /// Case-insensitive partial match on the plan name
    pub search: Option<String>,
}

/// Parameters for permanently deleting a plan.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DeletePlan {
    pub id: u64,
    /// Must be true, deletion cannot be undone
    #[serde(default)]
    pub confirmed: bool,
}

/// Parameters for attaching an asset to or detaching it from a plan.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PlanAsset {
    pub plan_id: u64,
    pub asset_id: u64,
    /// Recorded in the activity log
    pub actor: Option<String>,
}

/// Parameters for listing work orders.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ListOrders {
    pub station_id: Option<u64>,
    pub plan_id: Option<u64>,
    pub status: Option<OrderStatus>,
    pub order_type: Option<OrderType>,
    pub from: Option<Date>,
    pub to: Option<Date>,
}

/// Parameters for raising a corrective (manual) work order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateCorrectiveOrder {
    pub station_id: u64,
    pub scheduled_date: Date,
    pub assignee: Option<String>,
    #[serde(default)]
    pub assets: Vec<u64>,
}

/// Parameters for the daily generation run.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GenerateOrders {
    /// Target date; today in the configured time zone when absent
    pub date: Option<Date>,
}

/// Parameters for previewing a plan's next occurrences.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpcomingOrders {
    pub plan_id: u64,
    /// First date to consider; today when absent
    pub from: Option<Date>,
    #[serde(default = "default_upcoming_limit")]
    pub limit: usize,
}

fn default_upcoming_limit() -> usize {
    5
}
