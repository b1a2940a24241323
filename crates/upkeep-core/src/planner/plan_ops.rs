//! Maintenance plan operations for the Planner.

use tokio::task;

use super::Planner;
use crate::{
    db::Database,
    error::{Result, UpkeepError},
    models::{ActivityEntry, MaintenancePlan, PlanFilter, activity::PLAN_TARGET},
    params::{CreatePlan, Id, ListPlans, UpcomingOrders, UpdatePlan},
    recurrence,
};

/// How far ahead [`Planner::upcoming_orders`] looks for occurrences.
const UPCOMING_HORIZON_DAYS: u32 = 3 * 366;

impl Planner {
    /// Creates a new plan after validating its trigger configuration.
    pub async fn create_plan(&self, params: &CreatePlan) -> Result<MaintenancePlan> {
        let db_path = self.db_path.clone();
        let (name, schedule) = params.validate()?;
        let station_id = params.station_id;
        let start_date = params.start_date;
        let active = params.active;

        task::spawn_blocking(move || {
            let mut db = Database::new(&db_path)?;
            db.create_plan(station_id, &name, start_date, active, &schedule)
        })
        .await
        .map_err(UpkeepError::join)?
    }

    /// Retrieves a plan by its ID.
    pub async fn get_plan(&self, params: &Id) -> Result<Option<MaintenancePlan>> {
        let db_path = self.db_path.clone();
        let plan_id = params.id;

        task::spawn_blocking(move || {
            let db = Database::new(&db_path)?;
            db.get_plan(plan_id)
        })
        .await
        .map_err(UpkeepError::join)?
    }

    /// Lists plans; inactive plans only when asked for.
    pub async fn list_plans(&self, params: &ListPlans) -> Result<Vec<MaintenancePlan>> {
        let db_path = self.db_path.clone();
        let filter = PlanFilter::from(params);

        task::spawn_blocking(move || {
            let db = Database::new(&db_path)?;
            db.list_plans(&filter)
        })
        .await
        .map_err(UpkeepError::join)?
    }

    /// Applies an edit to a plan, re-validating the merged trigger fields.
    pub async fn update_plan(&self, params: &UpdatePlan) -> Result<MaintenancePlan> {
        let db_path = self.db_path.clone();
        let params = params.clone();

        task::spawn_blocking(move || {
            let mut db = Database::new(&db_path)?;
            let current = db
                .get_plan(params.id)?
                .ok_or(UpkeepError::PlanNotFound { id: params.id })?;
            let updated = params.apply_to(&current)?;
            db.update_plan(&updated)
        })
        .await
        .map_err(UpkeepError::join)?
    }

    /// Permanently deletes a plan by ID. Generated orders are kept.
    pub async fn delete_plan_by_id(&self, params: &Id) -> Result<()> {
        let db_path = self.db_path.clone();
        let plan_id = params.id;

        task::spawn_blocking(move || {
            let mut db = Database::new(&db_path)?;
            db.delete_plan(plan_id)
        })
        .await
        .map_err(UpkeepError::join)?
    }

    /// Lists the asset-list edits recorded for a plan, newest first.
    pub async fn plan_activity(&self, params: &Id) -> Result<Vec<ActivityEntry>> {
        let db_path = self.db_path.clone();
        let plan_id = params.id;

        task::spawn_blocking(move || {
            let db = Database::new(&db_path)?;
            db.list_activity(PLAN_TARGET, plan_id)
        })
        .await
        .map_err(UpkeepError::join)?
    }

    /// Previews the next dates on which a plan would generate an order.
    ///
    /// Returns the plan alongside its dates. Usage-triggered plans and weekly
    /// plans without a weekday yield no dates.
    pub async fn upcoming_orders(
        &self,
        params: &UpcomingOrders,
    ) -> Result<(MaintenancePlan, Vec<jiff::civil::Date>)> {
        let plan = self
            .get_plan(&Id { id: params.plan_id })
            .await?
            .ok_or(UpkeepError::PlanNotFound { id: params.plan_id })?;

        let from = params.from.unwrap_or_else(|| self.today());
        let dates = recurrence::upcoming(&plan, from, params.limit, UPCOMING_HORIZON_DAYS)
            .map_err(|e| UpkeepError::Configuration {
                message: format!("Plan {} cannot be scheduled: {e}", plan.id),
            })?;

        Ok((plan, dates))
    }
}
