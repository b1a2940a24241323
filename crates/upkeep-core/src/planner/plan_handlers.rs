//! Plan handler operations layered over the plain plan operations.

use log::warn;
use tokio::task;

use super::Planner;
use crate::{
    clock::{Clock, SystemClock},
    db::Database,
    error::{Result, UpkeepError},
    models::MaintenancePlan,
    params::{DeletePlan, Id, PlanAsset},
};

impl Planner {
    /// Handle permanently deleting a plan with confirmation.
    ///
    /// Uses the get-before-delete pattern so the caller can show what was
    /// removed. Orders generated from the plan keep their asset snapshot and
    /// lose their origin plan.
    ///
    /// # Errors
    ///
    /// Returns `UpkeepError::InvalidInput` if `confirmed` is false
    ///
    /// # Examples
    ///
    /// ```rust,no_run
    /// # use upkeep_core::{params::DeletePlan, PlannerBuilder};
    /// # async {
    /// let planner = PlannerBuilder::new().build().await?;
    /// let params = DeletePlan { id: 1, confirmed: true };
    /// let deleted_plan = planner.delete_plan(&params).await?;
    /// # Result::<(), upkeep_core::UpkeepError>::Ok(())
    /// # };
    /// ```
    pub async fn delete_plan(&self, params: &DeletePlan) -> Result<Option<MaintenancePlan>> {
        if !params.confirmed {
            return Err(UpkeepError::invalid_input("confirmed").with_reason(
                "Plan deletion requires explicit confirmation. Set 'confirmed' to true to proceed with permanent deletion.",
            ));
        }

        let id_params = Id { id: params.id };
        let plan = self.get_plan(&id_params).await?;

        if plan.is_some() {
            self.delete_plan_by_id(&id_params).await?;
        }

        Ok(plan)
    }

    /// Attaches an asset to a plan and records the edit in the activity log.
    pub async fn add_plan_asset(&self, params: &PlanAsset) -> Result<MaintenancePlan> {
        self.change_plan_assets(params, AssetChange::Added).await
    }

    /// Detaches an asset from a plan and records the edit in the activity
    /// log.
    pub async fn remove_plan_asset(&self, params: &PlanAsset) -> Result<MaintenancePlan> {
        self.change_plan_assets(params, AssetChange::Removed).await
    }

    async fn change_plan_assets(
        &self,
        params: &PlanAsset,
        change: AssetChange,
    ) -> Result<MaintenancePlan> {
        let db_path = self.db_path.clone();
        let params = params.clone();
        let clock = self.clock();

        task::spawn_blocking(move || {
            let mut db = Database::new(&db_path)?;
            let changed = match change {
                AssetChange::Added => db.add_plan_asset(params.plan_id, params.asset_id)?,
                AssetChange::Removed => db.remove_plan_asset(params.plan_id, params.asset_id)?,
            };

            let plan = db
                .get_plan(params.plan_id)?
                .ok_or(UpkeepError::PlanNotFound { id: params.plan_id })?;

            if changed {
                audit_asset_change(&mut db, &plan, &params, change, &clock);
            }

            Ok(plan)
        })
        .await
        .map_err(UpkeepError::join)?
    }
}

#[derive(Debug, Clone, Copy)]
enum AssetChange {
    Added,
    Removed,
}

/// Audit failures are logged and never fail the edit itself.
fn audit_asset_change(
    db: &mut Database,
    plan: &MaintenancePlan,
    params: &PlanAsset,
    change: AssetChange,
    clock: &SystemClock,
) {
    let label = match db.get_asset(params.asset_id) {
        Ok(Some(asset)) => format!("{} ({})", asset.name, asset.code),
        _ => format!("asset {}", params.asset_id),
    };
    let detail = match change {
        AssetChange::Added => format!("Added {label}"),
        AssetChange::Removed => format!("Removed {label}"),
    };

    if let Err(e) = db.record_plan_asset_change(
        plan.station_id,
        params.actor.as_deref(),
        plan.id,
        &detail,
        &clock.now(),
    ) {
        warn!("Failed to record activity for plan ID {}: {e}", plan.id);
    }
}
