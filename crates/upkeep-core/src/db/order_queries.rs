//! Work order creation, queries and status changes.

use jiff::{Timestamp, civil::Date};
use rusqlite::{OptionalExtension, params};

use super::utils::{collect_ids, id_column, parse_column};
use crate::{
    error::{DatabaseResultExt, Result, UpkeepError},
    models::{MaintenancePlan, OrderFilter, OrderStatus, OrderType, WorkOrder},
};

const ORDER_COLUMNS: &str = "id, origin_plan_id, station_id, scheduled_date, order_type, status, assignee, created_at, updated_at";
const INSERT_ORDER_SQL: &str = "INSERT INTO work_orders (origin_plan_id, station_id, scheduled_date, order_type, status, assignee, created_at, updated_at) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)";
const SNAPSHOT_PLAN_ASSETS_SQL: &str = "INSERT INTO work_order_assets (order_id, asset_id) SELECT ?1, asset_id FROM plan_assets WHERE plan_id = ?2";
const INSERT_ORDER_ASSET_SQL: &str =
    "INSERT OR IGNORE INTO work_order_assets (order_id, asset_id) VALUES (?1, ?2)";
const SELECT_ORDER_ASSETS_SQL: &str =
    "SELECT asset_id FROM work_order_assets WHERE order_id = ?1 ORDER BY asset_id";
const SELECT_ORDER_STATUS_SQL: &str = "SELECT status FROM work_orders WHERE id = ?1";
const UPDATE_ORDER_STATUS_SQL: &str =
    "UPDATE work_orders SET status = ?1, updated_at = ?2 WHERE id = ?3 AND status = ?4";
// Cancelled orders do not count, so cancelling lets the next run regenerate
const CHECK_SCHEDULED_ORDER_SQL: &str = "SELECT EXISTS(SELECT 1 FROM work_orders WHERE origin_plan_id = ?1 AND scheduled_date = ?2 AND order_type = 'scheduled' AND status != 'cancelled')";

impl super::Database {
    /// Helper function to construct an order (without assets) from a row
    fn build_order_from_row(row: &rusqlite::Row) -> rusqlite::Result<WorkOrder> {
        Ok(WorkOrder {
            id: id_column(row, 0)?,
            origin_plan_id: row.get::<_, Option<i64>>(1)?.map(|id| id as u64),
            station_id: id_column(row, 2)?,
            scheduled_date: parse_column::<Date>(row, 3)?,
            order_type: parse_column(row, 4)?,
            status: parse_column(row, 5)?,
            assignee: row.get(6)?,
            affected_assets: Vec::new(),
            created_at: parse_column::<Timestamp>(row, 7)?,
            updated_at: parse_column::<Timestamp>(row, 8)?,
        })
    }

    fn load_order_assets(conn: &rusqlite::Connection, order_id: u64) -> Result<Vec<u64>> {
        let mut stmt = conn
            .prepare(SELECT_ORDER_ASSETS_SQL)
            .db_context("Failed to prepare query")?;
        collect_ids(&mut stmt, params![order_id as i64]).db_context("Failed to fetch order assets")
    }

    /// Creates a pending scheduled order for `plan` on `scheduled_date` and
    /// snapshots the plan's current asset links onto it.
    ///
    /// Header and snapshot are written in one transaction; on any failure
    /// nothing is persisted.
    pub fn materialize_scheduled_order(
        &mut self,
        plan: &MaintenancePlan,
        scheduled_date: Date,
    ) -> Result<WorkOrder> {
        let tx = self
            .connection
            .transaction()
            .db_context("Failed to begin transaction")?;

        let now = Timestamp::now();
        let now_str = now.to_string();

        tx.execute(
            INSERT_ORDER_SQL,
            params![
                plan.id as i64,
                plan.station_id as i64,
                scheduled_date.to_string(),
                OrderType::Scheduled.as_str(),
                OrderStatus::Pending.as_str(),
                None::<String>,
                &now_str,
                &now_str
            ],
        )
        .db_context("Failed to insert work order")?;

        let id = tx.last_insert_rowid() as u64;

        tx.execute(SNAPSHOT_PLAN_ASSETS_SQL, params![id as i64, plan.id as i64])
            .db_context("Failed to snapshot plan assets")?;

        let affected_assets = Self::load_order_assets(&tx, id)?;

        tx.commit().db_context("Failed to commit transaction")?;

        Ok(WorkOrder {
            id,
            origin_plan_id: Some(plan.id),
            station_id: plan.station_id,
            scheduled_date,
            order_type: OrderType::Scheduled,
            status: OrderStatus::Pending,
            assignee: None,
            affected_assets,
            created_at: now,
            updated_at: now,
        })
    }

    /// Whether a non-cancelled scheduled order exists for the plan and date.
    pub fn has_scheduled_order(&self, plan_id: u64, scheduled_date: Date) -> Result<bool> {
        self.connection
            .query_row(
                CHECK_SCHEDULED_ORDER_SQL,
                params![plan_id as i64, scheduled_date.to_string()],
                |row| row.get(0),
            )
            .db_context("Failed to check for existing order")
    }

    /// Raises a corrective order. Every asset must belong to the station.
    pub fn create_corrective_order(
        &mut self,
        station_id: u64,
        scheduled_date: Date,
        assignee: Option<&str>,
        assets: &[u64],
    ) -> Result<WorkOrder> {
        let tx = self
            .connection
            .transaction()
            .db_context("Failed to begin transaction")?;

        if !Self::station_exists(&tx, station_id)? {
            return Err(UpkeepError::StationNotFound { id: station_id });
        }
        for &asset_id in assets {
            Self::ensure_asset_in_station(&tx, asset_id, station_id)?;
        }

        let now = Timestamp::now();
        let now_str = now.to_string();

        tx.execute(
            INSERT_ORDER_SQL,
            params![
                None::<i64>,
                station_id as i64,
                scheduled_date.to_string(),
                OrderType::Corrective.as_str(),
                OrderStatus::Pending.as_str(),
                assignee,
                &now_str,
                &now_str
            ],
        )
        .db_context("Failed to insert work order")?;

        let id = tx.last_insert_rowid() as u64;

        for &asset_id in assets {
            tx.execute(INSERT_ORDER_ASSET_SQL, params![id as i64, asset_id as i64])
                .db_context("Failed to attach asset to order")?;
        }

        let affected_assets = Self::load_order_assets(&tx, id)?;

        tx.commit().db_context("Failed to commit transaction")?;

        Ok(WorkOrder {
            id,
            origin_plan_id: None,
            station_id,
            scheduled_date,
            order_type: OrderType::Corrective,
            status: OrderStatus::Pending,
            assignee: assignee.map(String::from),
            affected_assets,
            created_at: now,
            updated_at: now,
        })
    }

    /// Retrieves an order by its ID with its asset snapshot loaded.
    pub fn get_order(&self, id: u64) -> Result<Option<WorkOrder>> {
        let query = format!("SELECT {ORDER_COLUMNS} FROM work_orders WHERE id = ?1");
        let mut order = self
            .connection
            .query_row(&query, params![id as i64], Self::build_order_from_row)
            .optional()
            .db_context("Failed to query work order")?;

        if let Some(ref mut order) = order {
            order.affected_assets = Self::load_order_assets(&self.connection, order.id)?;
        }

        Ok(order)
    }

    /// Lists orders matching the filter, most recent scheduled date first.
    pub fn list_orders(&self, filter: &OrderFilter) -> Result<Vec<WorkOrder>> {
        let mut query = format!("SELECT {ORDER_COLUMNS} FROM work_orders");

        let mut conditions = Vec::new();
        let mut params_vec: Vec<Box<dyn rusqlite::ToSql>> = Vec::new();

        if let Some(station_id) = filter.station_id {
            conditions.push("station_id = ?");
            params_vec.push(Box::new(station_id as i64));
        }

        if let Some(plan_id) = filter.origin_plan_id {
            conditions.push("origin_plan_id = ?");
            params_vec.push(Box::new(plan_id as i64));
        }

        if let Some(status) = filter.status {
            conditions.push("status = ?");
            params_vec.push(Box::new(status.as_str()));
        }

        if let Some(order_type) = filter.order_type {
            conditions.push("order_type = ?");
            params_vec.push(Box::new(order_type.as_str()));
        }

        if let Some(from) = filter.scheduled_from {
            conditions.push("scheduled_date >= ?");
            params_vec.push(Box::new(from.to_string()));
        }

        if let Some(to) = filter.scheduled_to {
            conditions.push("scheduled_date <= ?");
            params_vec.push(Box::new(to.to_string()));
        }

        if !conditions.is_empty() {
            query.push_str(" WHERE ");
            query.push_str(&conditions.join(" AND "));
        }

        query.push_str(" ORDER BY scheduled_date DESC, id DESC");

        let mut stmt = self
            .connection
            .prepare(&query)
            .db_context("Failed to prepare query")?;

        let params_refs: Vec<&dyn rusqlite::ToSql> = params_vec.iter().map(|b| &**b).collect();

        let mut orders = stmt
            .query_map(&params_refs[..], Self::build_order_from_row)
            .db_context("Failed to query work orders")?
            .collect::<rusqlite::Result<Vec<_>>>()
            .db_context("Failed to fetch work orders")?;

        for order in &mut orders {
            order.affected_assets = Self::load_order_assets(&self.connection, order.id)?;
        }

        Ok(orders)
    }

    /// Moves an order to `next`, rejecting transitions out of terminal
    /// statuses and backwards moves.
    pub fn transition_order(&mut self, id: u64, next: OrderStatus) -> Result<WorkOrder> {
        let tx = self
            .connection
            .transaction()
            .db_context("Failed to begin transaction")?;

        let current: OrderStatus = tx
            .query_row(SELECT_ORDER_STATUS_SQL, params![id as i64], |row| {
                parse_column(row, 0)
            })
            .optional()
            .db_context("Failed to query order status")?
            .ok_or(UpkeepError::OrderNotFound { id })?;

        if !current.can_transition_to(next) {
            return Err(UpkeepError::InvalidTransition {
                id,
                from: current,
                to: next,
            });
        }

        tx.execute(
            UPDATE_ORDER_STATUS_SQL,
            params![
                next.as_str(),
                Timestamp::now().to_string(),
                id as i64,
                current.as_str()
            ],
        )
        .db_context("Failed to update order status")?;

        tx.commit().db_context("Failed to commit transaction")?;

        self.get_order(id)?.ok_or(UpkeepError::OrderNotFound { id })
    }
}
