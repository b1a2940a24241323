//! Station CRUD operations.

use jiff::Timestamp;
use rusqlite::{OptionalExtension, params};

use super::utils::{id_column, parse_column};
use crate::{
    error::{DatabaseResultExt, Result, UpkeepError},
    models::Station,
};

const INSERT_STATION_SQL: &str = "INSERT INTO stations (name, created_at) VALUES (?1, ?2)";
const SELECT_STATION_SQL: &str = "SELECT id, name, created_at FROM stations WHERE id = ?1";
const SELECT_STATIONS_SQL: &str = "SELECT id, name, created_at FROM stations ORDER BY name";
pub(super) const CHECK_STATION_EXISTS_SQL: &str =
    "SELECT EXISTS(SELECT 1 FROM stations WHERE id = ?1)";

impl super::Database {
    fn build_station_from_row(row: &rusqlite::Row) -> rusqlite::Result<Station> {
        Ok(Station {
            id: id_column(row, 0)?,
            name: row.get(1)?,
            created_at: parse_column::<Timestamp>(row, 2)?,
        })
    }

    /// Registers a new station. Station names are unique.
    pub fn create_station(&mut self, name: &str) -> Result<Station> {
        let name = name.trim();
        if name.is_empty() {
            return Err(UpkeepError::invalid_input("name").with_reason("cannot be empty"));
        }

        let now = Timestamp::now();
        self.connection
            .execute(INSERT_STATION_SQL, params![name, now.to_string()])
            .db_context("Failed to insert station")?;

        Ok(Station {
            id: self.connection.last_insert_rowid() as u64,
            name: name.to_string(),
            created_at: now,
        })
    }

    /// Retrieves a station by its ID.
    pub fn get_station(&self, id: u64) -> Result<Option<Station>> {
        self.connection
            .query_row(
                SELECT_STATION_SQL,
                params![id as i64],
                Self::build_station_from_row,
            )
            .optional()
            .db_context("Failed to query station")
    }

    /// Lists every station ordered by name.
    pub fn list_stations(&self) -> Result<Vec<Station>> {
        let mut stmt = self
            .connection
            .prepare(SELECT_STATIONS_SQL)
            .db_context("Failed to prepare query")?;

        stmt.query_map([], Self::build_station_from_row)
            .db_context("Failed to query stations")?
            .collect::<rusqlite::Result<Vec<_>>>()
            .db_context("Failed to fetch stations")
    }

    pub(crate) fn station_exists(conn: &rusqlite::Connection, id: u64) -> Result<bool> {
        conn.query_row(CHECK_STATION_EXISTS_SQL, params![id as i64], |row| {
            row.get(0)
        })
        .db_context("Failed to check station existence")
    }
}
