//! Activity log writes and queries.

use jiff::{Timestamp, ToSpan, Zoned};
use log::warn;
use rusqlite::{OptionalExtension, params};

use super::utils::{id_column, parse_column};
use crate::{
    error::{DatabaseResultExt, Result},
    models::{
        ActivityEntry, ChangeDetails,
        activity::{GROUPING_WINDOW_MINUTES, PLAN_ASSETS_CHANGED, PLAN_TARGET},
    },
};

const ACTIVITY_COLUMNS: &str =
    "id, station_id, actor, verb, target_kind, target_id, details, recorded_at";
const INSERT_ACTIVITY_SQL: &str = "INSERT INTO activity_log (station_id, actor, verb, target_kind, target_id, details, recorded_at) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)";
const UPDATE_ACTIVITY_DETAILS_SQL: &str = "UPDATE activity_log SET details = ?1 WHERE id = ?2";

impl super::Database {
    fn build_activity_from_row(row: &rusqlite::Row) -> rusqlite::Result<ActivityEntry> {
        let details: String = row.get(6)?;
        let details = serde_json::from_str(&details).map_err(|e| {
            rusqlite::Error::FromSqlConversionFailure(6, rusqlite::types::Type::Text, Box::new(e))
        })?;

        Ok(ActivityEntry {
            id: id_column(row, 0)?,
            station_id: id_column(row, 1)?,
            actor: row.get(2)?,
            verb: row.get(3)?,
            target_kind: row.get(4)?,
            target_id: id_column(row, 5)?,
            details,
            recorded_at: parse_column::<Timestamp>(row, 7)?,
        })
    }

    /// Records an edit to a plan's asset list.
    ///
    /// Edits by the same actor on the same plan within
    /// [`GROUPING_WINDOW_MINUTES`] are merged into the latest entry instead of
    /// creating a new one.
    pub fn record_plan_asset_change(
        &mut self,
        station_id: u64,
        actor: Option<&str>,
        plan_id: u64,
        detail: &str,
        now: &Zoned,
    ) -> Result<ActivityEntry> {
        let line = format!("{} - {detail}", now.strftime("%H:%M:%S"));
        let recorded_at = now.timestamp();
        let cutoff = recorded_at
            .checked_sub(GROUPING_WINDOW_MINUTES.minutes())
            .unwrap_or(Timestamp::MIN);

        let tx = self
            .connection
            .transaction()
            .db_context("Failed to begin transaction")?;

        let query = format!(
            "SELECT {ACTIVITY_COLUMNS} FROM activity_log WHERE actor IS ?1 AND station_id = ?2 AND verb = ?3 AND target_kind = ?4 AND target_id = ?5 ORDER BY id DESC LIMIT 1"
        );
        let latest = tx
            .query_row(
                &query,
                params![
                    actor,
                    station_id as i64,
                    PLAN_ASSETS_CHANGED,
                    PLAN_TARGET,
                    plan_id as i64
                ],
                Self::build_activity_from_row,
            )
            .optional()
            .db_context("Failed to query activity log")?;

        let entry = match latest {
            Some(mut entry) if entry.recorded_at >= cutoff => {
                let stored = serde_json::from_value::<ChangeDetails>(entry.details.clone());
                let mut details = match stored {
                    Ok(details) => details,
                    Err(e) => {
                        warn!(
                            "Activity entry {} has unreadable details, restarting its history: {e}",
                            entry.id
                        );
                        ChangeDetails::default()
                    }
                };
                details.push(line);
                entry.details = serde_json::to_value(&details)?;

                tx.execute(
                    UPDATE_ACTIVITY_DETAILS_SQL,
                    params![entry.details.to_string(), entry.id as i64],
                )
                .db_context("Failed to update activity entry")?;
                entry
            }
            _ => {
                let mut details = ChangeDetails::default();
                details.push(line);
                let details = serde_json::to_value(&details)?;

                tx.execute(
                    INSERT_ACTIVITY_SQL,
                    params![
                        station_id as i64,
                        actor,
                        PLAN_ASSETS_CHANGED,
                        PLAN_TARGET,
                        plan_id as i64,
                        details.to_string(),
                        recorded_at.to_string()
                    ],
                )
                .db_context("Failed to insert activity entry")?;

                ActivityEntry {
                    id: tx.last_insert_rowid() as u64,
                    station_id,
                    actor: actor.map(String::from),
                    verb: PLAN_ASSETS_CHANGED.to_string(),
                    target_kind: PLAN_TARGET.to_string(),
                    target_id: plan_id,
                    details,
                    recorded_at,
                }
            }
        };

        tx.commit().db_context("Failed to commit transaction")?;

        Ok(entry)
    }

    /// Lists activity recorded against a target, newest first.
    pub fn list_activity(&self, target_kind: &str, target_id: u64) -> Result<Vec<ActivityEntry>> {
        let query = format!(
            "SELECT {ACTIVITY_COLUMNS} FROM activity_log WHERE target_kind = ?1 AND target_id = ?2 ORDER BY id DESC"
        );
        let mut stmt = self
            .connection
            .prepare(&query)
            .db_context("Failed to prepare query")?;

        stmt.query_map(
            params![target_kind, target_id as i64],
            Self::build_activity_from_row,
        )
        .db_context("Failed to query activity log")?
        .collect::<rusqlite::Result<Vec<_>>>()
        .db_context("Failed to fetch activity log")
    }
}
