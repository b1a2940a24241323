//! High-level async API over the maintenance database.
//!
//! The [`Planner`] is the entry point interfaces use. Every operation opens a
//! fresh [`Database`](crate::db::Database) inside
//! [`tokio::task::spawn_blocking`], so callers never block the runtime on
//! SQLite I/O.
//!
//! ```text
//! ┌─────────────────┐    ┌─────────────────┐    ┌─────────────────┐
//! │    Handlers     │    │   Operations    │    │    Database     │
//! │ (plan_handlers) │───▶│ (station_ops,   │───▶│   (via db/)     │
//! │                 │    │  plan_ops, ...) │    │                 │
//! └─────────────────┘    └─────────────────┘    └─────────────────┘
//! ```
//!
//! ## Submodules
//!
//! - [`builder`]: Factory for [`Planner`] instances with configuration
//! - [`station_ops`]: Stations and their assets
//! - [`plan_ops`]: Maintenance plan CRUD and schedule previews
//! - [`plan_handlers`]: Confirmed deletion and audited asset-list edits
//! - [`order_ops`]: Work order queries, corrective orders, status changes
//! - [`generation_ops`]: The daily generation run
//!
//! # Examples
//!
//! ```rust,no_run
//! use jiff::civil::date;
//! use upkeep_core::{
//!     PlannerBuilder,
//!     models::{Frequency, TriggerType},
//!     params::{CreatePlan, CreateStation, GenerateOrders},
//! };
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let planner = PlannerBuilder::new()
//!     .with_database_path(Some("/tmp/upkeep.db"))
//!     .with_time_zone(Some("America/Santiago"))
//!     .build()
//!     .await?;
//!
//! let station = planner
//!     .create_station(&CreateStation { name: "Station 1".to_string() })
//!     .await?;
//!
//! planner
//!     .create_plan(&CreatePlan {
//!         station_id: station.id,
//!         name: "Pump check".to_string(),
//!         start_date: date(2024, 1, 1),
//!         trigger_type: TriggerType::Time,
//!         frequency: Some(Frequency::Daily),
//!         interval: Some(1),
//!         weekday: None,
//!         usage_hours_trigger: None,
//!         active: true,
//!     })
//!     .await?;
//!
//! let summary = planner.generate_orders(&GenerateOrders::default()).await?;
//! println!("{summary}");
//! # Ok(())
//! # }
//! ```

use std::path::PathBuf;

use jiff::{civil::Date, tz::TimeZone};

use crate::clock::{Clock, SystemClock};

pub mod builder;
pub mod generation_ops;
pub mod order_ops;
pub mod plan_handlers;
pub mod plan_ops;
pub mod station_ops;


pub use builder::PlannerBuilder;

/// Main interface for stations, plans, orders and the daily run.
pub struct Planner {
    pub(crate) db_path: PathBuf,
    pub(crate) time_zone: TimeZone,
}

impl Planner {
    /// Creates a new planner with the specified database path and zone.
    pub(crate) fn new(db_path: PathBuf, time_zone: TimeZone) -> Self {
        Self { db_path, time_zone }
    }

    /// Wall clock in the configured time zone.
    pub fn clock(&self) -> SystemClock {
        SystemClock::new(self.time_zone.clone())
    }

    /// Today's date in the configured time zone.
    pub fn today(&self) -> Date {
        self.clock().now().date()
    }
}
