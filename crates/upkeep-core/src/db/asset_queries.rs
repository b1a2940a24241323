//! Asset CRUD operations.

use jiff::Timestamp;
use rusqlite::{OptionalExtension, params};

use super::utils::{id_column, parse_column};
use crate::{
    error::{DatabaseResultExt, Result, UpkeepError},
    models::Asset,
};

const INSERT_ASSET_SQL: &str =
    "INSERT INTO assets (station_id, code, name, created_at) VALUES (?1, ?2, ?3, ?4)";
const SELECT_ASSET_SQL: &str =
    "SELECT id, station_id, code, name, created_at FROM assets WHERE id = ?1";
const SELECT_ASSETS_SQL: &str = "SELECT id, station_id, code, name, created_at FROM assets";
const SELECT_ASSET_STATION_SQL: &str = "SELECT station_id FROM assets WHERE id = ?1";

impl super::Database {
    fn build_asset_from_row(row: &rusqlite::Row) -> rusqlite::Result<Asset> {
        Ok(Asset {
            id: id_column(row, 0)?,
            station_id: id_column(row, 1)?,
            code: row.get(2)?,
            name: row.get(3)?,
            created_at: parse_column::<Timestamp>(row, 4)?,
        })
    }

    /// Registers a new asset at a station.
    pub fn create_asset(&mut self, station_id: u64, code: &str, name: &str) -> Result<Asset> {
        let code = code.trim();
        if code.is_empty() {
            return Err(UpkeepError::invalid_input("code").with_reason("cannot be empty"));
        }

        let tx = self
            .connection
            .transaction()
            .db_context("Failed to begin transaction")?;

        if !Self::station_exists(&tx, station_id)? {
            return Err(UpkeepError::StationNotFound { id: station_id });
        }

        let now = Timestamp::now();
        tx.execute(
            INSERT_ASSET_SQL,
            params![station_id as i64, code, name, now.to_string()],
        )
        .db_context("Failed to insert asset")?;
        let id = tx.last_insert_rowid() as u64;

        tx.commit().db_context("Failed to commit transaction")?;

        Ok(Asset {
            id,
            station_id,
            code: code.to_string(),
            name: name.to_string(),
            created_at: now,
        })
    }

    /// Retrieves an asset by its ID.
    pub fn get_asset(&self, id: u64) -> Result<Option<Asset>> {
        self.connection
            .query_row(SELECT_ASSET_SQL, params![id as i64], Self::build_asset_from_row)
            .optional()
            .db_context("Failed to query asset")
    }

    /// Lists assets, optionally restricted to one station.
    pub fn list_assets(&self, station_id: Option<u64>) -> Result<Vec<Asset>> {
        let mut query = SELECT_ASSETS_SQL.to_string();
        let mut params_vec: Vec<Box<dyn rusqlite::ToSql>> = Vec::new();
        if let Some(station_id) = station_id {
            query.push_str(" WHERE station_id = ?");
            params_vec.push(Box::new(station_id as i64));
        }
        query.push_str(" ORDER BY station_id, code");

        let mut stmt = self
            .connection
            .prepare(&query)
            .db_context("Failed to prepare query")?;
        let params_refs: Vec<&dyn rusqlite::ToSql> = params_vec.iter().map(|b| &**b).collect();

        stmt.query_map(&params_refs[..], Self::build_asset_from_row)
            .db_context("Failed to query assets")?
            .collect::<rusqlite::Result<Vec<_>>>()
            .db_context("Failed to fetch assets")
    }

    /// Ensures `asset_id` exists and belongs to `station_id`.
    pub(crate) fn ensure_asset_in_station(
        conn: &rusqlite::Connection,
        asset_id: u64,
        station_id: u64,
    ) -> Result<()> {
        let owner: Option<i64> = conn
            .query_row(SELECT_ASSET_STATION_SQL, params![asset_id as i64], |row| {
                row.get(0)
            })
            .optional()
            .db_context("Failed to query asset station")?;

        match owner {
            None => Err(UpkeepError::AssetNotFound { id: asset_id }),
            Some(owner) if owner as u64 != station_id => Err(UpkeepError::invalid_input(
                "asset_id",
            )
            .with_reason(format!(
                "asset {asset_id} belongs to station {owner}, not station {station_id}"
            ))),
            Some(_) => Ok(()),
        }
    }
}
