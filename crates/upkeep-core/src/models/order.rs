//! Work order model definition.

use jiff::{Timestamp, civil::Date};
use serde::{Deserialize, Serialize};

use super::{OrderStatus, OrderType};

/// A single maintenance occurrence, either generated from a plan or raised
/// manually.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WorkOrder {
    /// Unique identifier for the order
    pub id: u64,

    /// Plan that spawned the order; `None` for corrective orders and for
    /// orders whose plan has since been deleted
    pub origin_plan_id: Option<u64>,

    /// Station copied from the plan at creation time
    pub station_id: u64,

    /// Date the occurrence targets
    pub scheduled_date: Date,

    pub order_type: OrderType,

    pub status: OrderStatus,

    /// Person responsible for carrying out the work
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assignee: Option<String>,

    /// Asset IDs snapshotted when the order was created
    #[serde(default)]
    pub affected_assets: Vec<u64>,

    /// Timestamp when the order was created (UTC)
    pub created_at: Timestamp,

    /// Timestamp when the order was last updated (UTC)
    pub updated_at: Timestamp,
}
