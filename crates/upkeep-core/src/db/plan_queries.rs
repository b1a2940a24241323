//! Maintenance plan CRUD operations and queries.

use jiff::{Timestamp, civil::Date};
use rusqlite::{OptionalExtension, params, types::Type};

use super::utils::{collect_ids, id_column, parse_column, parse_optional_column};
use crate::{
    error::{DatabaseResultExt, Result, UpkeepError},
    models::{MaintenancePlan, PlanFilter, Weekday},
    validation::Schedule,
};

const PLAN_COLUMNS: &str = "id, station_id, name, active, trigger_type, start_date, frequency, recurrence_interval, weekday, usage_hours_trigger, created_at, updated_at";
const INSERT_PLAN_SQL: &str = "INSERT INTO maintenance_plans (station_id, name, active, trigger_type, start_date, frequency, recurrence_interval, weekday, usage_hours_trigger, created_at, updated_at) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)";
const UPDATE_PLAN_SQL: &str = "UPDATE maintenance_plans SET name = ?1, active = ?2, trigger_type = ?3, start_date = ?4, frequency = ?5, recurrence_interval = ?6, weekday = ?7, usage_hours_trigger = ?8, updated_at = ?9 WHERE id = ?10";
const CHECK_PLAN_EXISTS_SQL: &str = "SELECT EXISTS(SELECT 1 FROM maintenance_plans WHERE id = ?1)";
const SELECT_PLAN_STATION_SQL: &str = "SELECT station_id FROM maintenance_plans WHERE id = ?1";
const DELETE_PLAN_SQL: &str = "DELETE FROM maintenance_plans WHERE id = ?1";
const SELECT_PLAN_ASSETS_SQL: &str =
    "SELECT asset_id FROM plan_assets WHERE plan_id = ?1 ORDER BY asset_id";
const INSERT_PLAN_ASSET_SQL: &str =
    "INSERT OR IGNORE INTO plan_assets (plan_id, asset_id) VALUES (?1, ?2)";
const DELETE_PLAN_ASSET_SQL: &str = "DELETE FROM plan_assets WHERE plan_id = ?1 AND asset_id = ?2";
const TOUCH_PLAN_SQL: &str = "UPDATE maintenance_plans SET updated_at = ?1 WHERE id = ?2";

impl super::Database {
    /// Helper function to construct a plan (without assets) from a row
    fn build_plan_from_row(row: &rusqlite::Row) -> rusqlite::Result<MaintenancePlan> {
        let weekday = match row.get::<_, Option<i64>>(8)? {
            Some(index) => Some(
                u8::try_from(index)
                    .ok()
                    .and_then(Weekday::from_index)
                    .ok_or_else(|| {
                        rusqlite::Error::FromSqlConversionFailure(
                            8,
                            Type::Integer,
                            format!("Invalid weekday: {index}").into(),
                        )
                    })?,
            ),
            None => None,
        };

        Ok(MaintenancePlan {
            id: id_column(row, 0)?,
            station_id: id_column(row, 1)?,
            name: row.get(2)?,
            active: row.get(3)?,
            trigger_type: parse_column(row, 4)?,
            start_date: parse_column::<Date>(row, 5)?,
            frequency: parse_optional_column(row, 6)?,
            interval: row.get(7)?,
            weekday,
            usage_hours_trigger: row.get(9)?,
            assets: Vec::new(),
            created_at: parse_column::<Timestamp>(row, 10)?,
            updated_at: parse_column::<Timestamp>(row, 11)?,
        })
    }

    pub(crate) fn load_plan_assets(conn: &rusqlite::Connection, plan_id: u64) -> Result<Vec<u64>> {
        let mut stmt = conn
            .prepare(SELECT_PLAN_ASSETS_SQL)
            .db_context("Failed to prepare query")?;
        collect_ids(&mut stmt, params![plan_id as i64]).db_context("Failed to fetch plan assets")
    }

    fn plan_exists(conn: &rusqlite::Connection, id: u64) -> Result<bool> {
        conn.query_row(CHECK_PLAN_EXISTS_SQL, params![id as i64], |row| row.get(0))
            .db_context("Failed to check plan existence")
    }

    /// Creates a new plan from an already validated schedule.
    pub fn create_plan(
        &mut self,
        station_id: u64,
        name: &str,
        start_date: Date,
        active: bool,
        schedule: &Schedule,
    ) -> Result<MaintenancePlan> {
        let tx = self
            .connection
            .transaction()
            .db_context("Failed to begin transaction")?;

        if !Self::station_exists(&tx, station_id)? {
            return Err(UpkeepError::StationNotFound { id: station_id });
        }

        let now = Timestamp::now();
        let now_str = now.to_string();

        tx.execute(
            INSERT_PLAN_SQL,
            params![
                station_id as i64,
                name,
                active,
                schedule.trigger_type.as_str(),
                start_date.to_string(),
                schedule.frequency.map(|f| f.as_str()),
                schedule.interval,
                schedule.weekday.map(|d| d.index()),
                schedule.usage_hours_trigger,
                &now_str,
                &now_str
            ],
        )
        .db_context("Failed to insert plan")?;

        let id = tx.last_insert_rowid() as u64;

        tx.commit().db_context("Failed to commit transaction")?;

        Ok(MaintenancePlan {
            id,
            station_id,
            name: name.to_string(),
            active,
            trigger_type: schedule.trigger_type,
            start_date,
            frequency: schedule.frequency,
            interval: schedule.interval,
            weekday: schedule.weekday,
            usage_hours_trigger: schedule.usage_hours_trigger,
            assets: Vec::new(),
            created_at: now,
            updated_at: now,
        })
    }

    /// Retrieves a plan by its ID with its asset list loaded.
    pub fn get_plan(&self, id: u64) -> Result<Option<MaintenancePlan>> {
        let query = format!("SELECT {PLAN_COLUMNS} FROM maintenance_plans WHERE id = ?1");
        let mut plan = self
            .connection
            .query_row(&query, params![id as i64], Self::build_plan_from_row)
            .optional()
            .db_context("Failed to query plan")?;

        if let Some(ref mut plan) = plan {
            plan.assets = Self::load_plan_assets(&self.connection, plan.id)?;
        }

        Ok(plan)
    }

    /// Lists plans matching the filter, each with its asset list loaded.
    pub fn list_plans(&self, filter: &PlanFilter) -> Result<Vec<MaintenancePlan>> {
        let mut query = format!("SELECT {PLAN_COLUMNS} FROM maintenance_plans");

        let mut conditions = Vec::new();
        let mut params_vec: Vec<Box<dyn rusqlite::ToSql>> = Vec::new();

        if let Some(station_id) = filter.station_id {
            conditions.push("station_id = ?");
            params_vec.push(Box::new(station_id as i64));
        }

        if let Some(active) = filter.active {
            conditions.push("active = ?");
            params_vec.push(Box::new(active));
        }

        if let Some(trigger_type) = filter.trigger_type {
            conditions.push("trigger_type = ?");
            params_vec.push(Box::new(trigger_type.as_str()));
        }

        // ISO dates compare correctly as text
        if let Some(date) = filter.starts_on_or_before {
            conditions.push("start_date <= ?");
            params_vec.push(Box::new(date.to_string()));
        }

        if let Some(ref name) = filter.name_contains {
            conditions.push("name LIKE ?");
            params_vec.push(Box::new(format!("%{name}%")));
        }

        if !conditions.is_empty() {
            query.push_str(" WHERE ");
            query.push_str(&conditions.join(" AND "));
        }

        query.push_str(" ORDER BY id");

        let mut stmt = self
            .connection
            .prepare(&query)
            .db_context("Failed to prepare query")?;

        let params_refs: Vec<&dyn rusqlite::ToSql> = params_vec.iter().map(|b| &**b).collect();

        let mut plans = stmt
            .query_map(&params_refs[..], Self::build_plan_from_row)
            .db_context("Failed to query plans")?
            .collect::<rusqlite::Result<Vec<_>>>()
            .db_context("Failed to fetch plans")?;

        for plan in &mut plans {
            plan.assets = Self::load_plan_assets(&self.connection, plan.id)?;
        }

        Ok(plans)
    }

    /// Persists the editable fields of `plan` and returns the stored version.
    pub fn update_plan(&mut self, plan: &MaintenancePlan) -> Result<MaintenancePlan> {
        let now = Timestamp::now();
        let rows = self
            .connection
            .execute(
                UPDATE_PLAN_SQL,
                params![
                    plan.name,
                    plan.active,
                    plan.trigger_type.as_str(),
                    plan.start_date.to_string(),
                    plan.frequency.map(|f| f.as_str()),
                    plan.interval,
                    plan.weekday.map(|d| d.index()),
                    plan.usage_hours_trigger,
                    now.to_string(),
                    plan.id as i64
                ],
            )
            .db_context("Failed to update plan")?;

        if rows == 0 {
            return Err(UpkeepError::PlanNotFound { id: plan.id });
        }

        self.get_plan(plan.id)?
            .ok_or(UpkeepError::PlanNotFound { id: plan.id })
    }

    /// Permanently deletes a plan and its asset links. Orders generated from
    /// the plan survive with their snapshot and no origin plan.
    pub fn delete_plan(&mut self, id: u64) -> Result<()> {
        let tx = self
            .connection
            .transaction()
            .db_context("Failed to begin transaction")?;

        if !Self::plan_exists(&tx, id)? {
            return Err(UpkeepError::PlanNotFound { id });
        }

        tx.execute(DELETE_PLAN_SQL, params![id as i64])
            .db_context("Failed to delete plan")?;

        tx.commit().db_context("Failed to commit transaction")?;

        Ok(())
    }

    /// Attaches an asset of the plan's station to the plan.
    ///
    /// Returns `false` when the asset was already attached.
    pub fn add_plan_asset(&mut self, plan_id: u64, asset_id: u64) -> Result<bool> {
        let tx = self
            .connection
            .transaction()
            .db_context("Failed to begin transaction")?;

        let station_id: i64 = tx
            .query_row(SELECT_PLAN_STATION_SQL, params![plan_id as i64], |row| {
                row.get(0)
            })
            .optional()
            .db_context("Failed to query plan station")?
            .ok_or(UpkeepError::PlanNotFound { id: plan_id })?;

        Self::ensure_asset_in_station(&tx, asset_id, station_id as u64)?;

        let inserted = tx
            .execute(INSERT_PLAN_ASSET_SQL, params![plan_id as i64, asset_id as i64])
            .db_context("Failed to attach asset")?;

        if inserted > 0 {
            tx.execute(
                TOUCH_PLAN_SQL,
                params![Timestamp::now().to_string(), plan_id as i64],
            )
            .db_context("Failed to update plan timestamp")?;
        }

        tx.commit().db_context("Failed to commit transaction")?;

        Ok(inserted > 0)
    }

    /// Detaches an asset from a plan.
    ///
    /// Returns `false` when the asset was not attached.
    pub fn remove_plan_asset(&mut self, plan_id: u64, asset_id: u64) -> Result<bool> {
        let tx = self
            .connection
            .transaction()
            .db_context("Failed to begin transaction")?;

        if !Self::plan_exists(&tx, plan_id)? {
            return Err(UpkeepError::PlanNotFound { id: plan_id });
        }

        let removed = tx
            .execute(DELETE_PLAN_ASSET_SQL, params![plan_id as i64, asset_id as i64])
            .db_context("Failed to detach asset")?;

        if removed > 0 {
            tx.execute(
                TOUCH_PLAN_SQL,
                params![Timestamp::now().to_string(), plan_id as i64],
            )
            .db_context("Failed to update plan timestamp")?;
        }

        tx.commit().db_context("Failed to commit transaction")?;

        Ok(removed > 0)
    }
}
