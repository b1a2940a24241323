//! Database operations and SQLite management.
//!
//! This module owns the SQLite connection, schema management and one query
//! module per entity: stations, assets, maintenance plans, work orders and
//! the activity log.

use std::path::Path;

use rusqlite::Connection;

use crate::error::{DatabaseResultExt, Result};

pub mod activity_queries;
pub mod asset_queries;
pub mod migrations;
pub mod order_queries;
pub mod plan_queries;
pub mod station_queries;
pub mod utils;

/// Database connection and operations handler.
pub struct Database {
    connection: Connection,
}

impl Database {
    /// Creates a new database connection and initializes the schema.
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self> {
        let connection = Connection::open(path).db_context("Failed to open database connection")?;

        let db = Self { connection };
        db.initialize_schema()?;
        Ok(db)
    }
}
