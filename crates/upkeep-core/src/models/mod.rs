//! Data models for stations, assets, maintenance plans and work orders.
//!
//! Display implementations for these models live in
//! [`crate::display::models`], keeping data structures apart from
//! presentation logic.
//!
//! # Examples
//!
//! ```rust
//! use jiff::{Timestamp, civil::date};
//! use upkeep_core::models::{Frequency, MaintenancePlan, TriggerType, Weekday};
//!
//! let plan = MaintenancePlan {
//!     id: 1,
//!     station_id: 1,
//!     name: "Chainsaw service".to_string(),
//!     active: true,
//!     trigger_type: TriggerType::Time,
//!     start_date: date(2024, 1, 1),
//!     frequency: Some(Frequency::Weekly),
//!     interval: 1,
//!     weekday: Some(Weekday::Monday),
//! #   usage_hours_trigger: None,
//! #   assets: vec![],
//! #   created_at: Timestamp::now(),
//! #   updated_at: Timestamp::now(),
//! };
//! println!("{}", plan); // Markdown header, schedule and asset list
//! ```

pub mod activity;
pub mod filters;
pub mod order;
pub mod plan;
pub mod station;
pub mod status;
pub mod summary;


pub use activity::{ActivityEntry, ChangeDetails};
pub use filters::{OrderFilter, PlanFilter};
pub use order::WorkOrder;
pub use plan::MaintenancePlan;
pub use station::{Asset, Station};
pub use status::{Frequency, OrderStatus, OrderType, TriggerType, Weekday};
pub use summary::{GenerationSummary, Outcome, PlanOutcome};
