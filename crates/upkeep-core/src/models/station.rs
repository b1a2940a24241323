//! Station and asset records referenced by plans and orders.

use jiff::Timestamp;
use serde::{Deserialize, Serialize};

/// A fire station; every plan, asset and order belongs to exactly one.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Station {
    pub id: u64,
    pub name: String,
    pub created_at: Timestamp,
}

/// A piece of equipment that maintenance plans can cover.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Asset {
    pub id: u64,

    /// Station that owns the asset
    pub station_id: u64,

    /// Short inventory code, unique within a station
    pub code: String,

    pub name: String,

    pub created_at: Timestamp,
}
