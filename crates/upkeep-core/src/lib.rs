//! Core library for the upkeep preventive-maintenance engine.
//!
//! Fire stations register their equipment as assets and describe recurring
//! maintenance as plans ("service the chainsaws every 2 weeks on Monday").
//! Once a day the generation run turns the plans due that day into work
//! orders, each carrying a frozen snapshot of the plan's assets.
//!
//! # Layers
//!
//! - [`recurrence`]: Pure calendar rules deciding whether a plan fires on a
//!   date
//! - [`generation`]: The daily run over a [`MaintenanceStore`], with per-plan
//!   failure isolation and idempotent reruns
//! - [`db`]: SQLite persistence, including the transactional order
//!   materializer and the grouped activity log
//! - [`planner`]: Async facade used by interfaces, configured by
//!   [`PlannerBuilder`]
//! - [`display`]: Markdown `Display` implementations for terminal output
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use jiff::civil::date;
//! use upkeep_core::{
//!     PlannerBuilder,
//!     models::{Frequency, TriggerType, Weekday},
//!     params::{CreatePlan, CreateStation, GenerateOrders},
//! };
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let planner = PlannerBuilder::new()
//!     .with_database_path(Some("upkeep.db"))
//!     .build()
//!     .await?;
//!
//! let station = planner
//!     .create_station(&CreateStation { name: "Station 2".to_string() })
//!     .await?;
//!
//! let plan = planner
//!     .create_plan(&CreatePlan {
//!         station_id: station.id,
//!         name: "Chainsaw service".to_string(),
//!         start_date: date(2024, 1, 1),
//!         trigger_type: TriggerType::Time,
//!         frequency: Some(Frequency::Weekly),
//!         interval: Some(2),
//!         weekday: Some(Weekday::Monday),
//!         usage_hours_trigger: None,
//!         active: true,
//!     })
//!     .await?;
//! println!("Created plan: {}", plan);
//!
//! let summary = planner
//!     .generate_orders(&GenerateOrders { date: Some(date(2024, 1, 15)) })
//!     .await?;
//! assert_eq!(summary.created, 1);
//! # Ok(())
//! # }
//! ```

pub mod clock;
pub mod db;
pub mod display;
pub mod error;
pub mod generation;
pub mod models;
pub mod params;
pub mod planner;
pub mod recurrence;
pub mod validation;

// Re-export commonly used types
pub use clock::{Clock, FixedClock, SystemClock};
pub use db::Database;
pub use display::{
    ActivityLog, Assets, CreateResult, DeleteResult, OperationStatus, Orders, Plans, Stations,
    UpdateResult,
};
pub use error::{Result, UpkeepError};
pub use generation::{MaintenanceStore, generate_for_date, run_daily_generation};
pub use models::{
    ActivityEntry, Asset, Frequency, GenerationSummary, MaintenancePlan, OrderFilter,
    OrderStatus, OrderType, Outcome, PlanFilter, Station, TriggerType, Weekday, WorkOrder,
};
pub use planner::{Planner, PlannerBuilder};
pub use recurrence::{RecurrenceError, should_fire};
