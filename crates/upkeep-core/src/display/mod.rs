//! Display formatting wrappers and result types.
//!
//! Domain models implement [`std::fmt::Display`] directly (see [`models`]);
//! this module adds newtype wrappers for collections and operation results so
//! the same data can be formatted for lists, confirmations and reports.
//!
//! ```text
//! ┌──────────────────┐    ┌─────────────────┐    ┌─────────────────┐
//! │  Domain Models   │    │ Wrapper Types   │    │   Markdown      │
//! │ (Plan, WorkOrder)│───▶│ (Plans, Orders, │───▶│    Output       │
//! │                  │    │  CreateResult)  │    │   (Terminal)    │
//! └──────────────────┘    └─────────────────┘    └─────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`collections`]: Collection wrappers (Stations, Assets, Plans, Orders,
//!   ActivityLog, Occurrences)
//! - [`results`]: Operation results (CreateResult, UpdateResult, DeleteResult)
//! - [`status`]: Confirmation messages (OperationStatus)
//! - [`datetime`]: Date and timestamp formatting
//! - [`models`]: Display implementations for domain models
//!
//! # Examples
//!
//! ```rust
//! use upkeep_core::display::OperationStatus;
//!
//! let status = OperationStatus::success("Asset attached to plan 4");
//! assert!(status.to_string().starts_with("Success:"));
//! ```

pub mod collections;
pub mod datetime;
pub mod models;
pub mod results;
pub mod status;

pub use collections::{ActivityLog, Assets, Occurrences, Orders, Plans, Stations};
pub use datetime::{LocalDateTime, ShortDate};
pub use models::ScheduleDescription;
pub use results::{CreateResult, DeleteResult, UpdateResult};
pub use status::OperationStatus;
