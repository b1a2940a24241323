//! Daily generation run for the Planner.

use tokio::task;

use super::Planner;
use crate::{
    db::Database,
    error::{Result, UpkeepError},
    generation,
    models::GenerationSummary,
    params::GenerateOrders,
};

impl Planner {
    /// Generates the scheduled orders due on the requested date, or today in
    /// the configured time zone.
    ///
    /// Safe to repeat for the same date: plans already generated are
    /// reported as skipped.
    pub async fn generate_orders(&self, params: &GenerateOrders) -> Result<GenerationSummary> {
        let db_path = self.db_path.clone();
        let date = params.date;
        let clock = self.clock();

        task::spawn_blocking(move || {
            let mut db = Database::new(&db_path)?;
            match date {
                Some(date) => generation::generate_for_date(&mut db, date),
                None => generation::run_daily_generation(&mut db, &clock, None),
            }
        })
        .await
        .map_err(UpkeepError::join)?
    }
}
