//! Daily generation of preventive work orders.
//!
//! Once per calendar day an external scheduler runs [`run_daily_generation`].
//! It pulls every active, time-triggered plan that has started, asks the
//! [`recurrence`](crate::recurrence) rules whether the plan fires on the
//! target date, skips plans that already have a live scheduled order for that
//! date and materializes an order for the rest.
//!
//! ```text
//! candidate_plans ─▶ should_fire? ─▶ has_scheduled_order? ─▶ materialize
//!                      │ no              │ yes                  │ err
//!                      ▼                 ▼                      ▼
//!                   (ignored)         skipped                errors
//! ```
//!
//! Each plan is processed independently: a failure while handling one plan
//! is logged, counted and the run moves on. Only failing to list candidates
//! aborts the run, so the scheduler can retry it as a whole. Re-running the
//! same date is safe; already generated plans are reported as skipped.

use jiff::{Zoned, civil::Date};
use log::{debug, error, info, warn};

use crate::{
    clock::Clock,
    db::Database,
    error::Result,
    models::{GenerationSummary, MaintenancePlan, Outcome, PlanFilter, Weekday, WorkOrder},
    recurrence,
};

/// Persistence operations the daily run depends on.
pub trait MaintenanceStore {
    /// Active, time-triggered plans whose start date is on or before `date`.
    fn candidate_plans(&self, date: Date) -> Result<Vec<MaintenancePlan>>;

    /// Whether a non-cancelled scheduled order exists for the plan and date.
    fn has_scheduled_order(&self, plan_id: u64, date: Date) -> Result<bool>;

    /// Atomically creates the order and its asset snapshot.
    ///
    /// The check in [`has_scheduled_order`](Self::has_scheduled_order) runs
    /// in its own transaction, so implementations must reject a second live
    /// order for the same plan and date themselves.
    fn materialize(&mut self, plan: &MaintenancePlan, date: Date) -> Result<WorkOrder>;
}

impl MaintenanceStore for Database {
    fn candidate_plans(&self, date: Date) -> Result<Vec<MaintenancePlan>> {
        self.list_plans(&PlanFilter::candidates_for(date))
    }

    fn has_scheduled_order(&self, plan_id: u64, date: Date) -> Result<bool> {
        Database::has_scheduled_order(self, plan_id, date)
    }

    fn materialize(&mut self, plan: &MaintenancePlan, date: Date) -> Result<WorkOrder> {
        self.materialize_scheduled_order(plan, date)
    }
}

/// Runs the daily generation for `target`, or for today according to
/// `clock` when no target is given.
///
/// # Errors
///
/// Returns an error only when the candidate plans cannot be listed.
pub fn run_daily_generation<S, C>(
    store: &mut S,
    clock: &C,
    target: Option<&Zoned>,
) -> Result<GenerationSummary>
where
    S: MaintenanceStore + ?Sized,
    C: Clock + ?Sized,
{
    let target_date = match target {
        Some(zoned) => zoned.date(),
        None => clock.now().date(),
    };
    generate_for_date(store, target_date)
}

/// Runs the daily generation for an explicit calendar date.
///
/// # Errors
///
/// Returns an error only when the candidate plans cannot be listed.
pub fn generate_for_date<S>(store: &mut S, target_date: Date) -> Result<GenerationSummary>
where
    S: MaintenanceStore + ?Sized,
{
    let target_weekday = Weekday::of(target_date);
    info!("Starting maintenance order generation for {target_date}");

    let plans = store.candidate_plans(target_date)?;
    let mut summary = GenerationSummary::new(target_date);

    for plan in &plans {
        match recurrence::should_fire(plan, target_date, target_weekday) {
            Ok(true) => {}
            Ok(false) => continue,
            Err(e) => {
                warn!(
                    "Plan ID {} ({}) has an unusable schedule and never fires: {e}",
                    plan.id, plan.name
                );
                summary.record(
                    plan.id,
                    &plan.name,
                    Outcome::Misconfigured {
                        reason: e.to_string(),
                    },
                );
                continue;
            }
        }

        let outcome = process_plan(store, plan, target_date);
        summary.record(plan.id, &plan.name, outcome);
    }

    info!(
        "Generation for {target_date} finished: {} created, {} skipped, {} errors, {} misconfigured",
        summary.created, summary.skipped, summary.errors, summary.misconfigured
    );

    Ok(summary)
}

fn process_plan<S>(store: &mut S, plan: &MaintenancePlan, target_date: Date) -> Outcome
where
    S: MaintenanceStore + ?Sized,
{
    let existing = match store.has_scheduled_order(plan.id, target_date) {
        Ok(existing) => existing,
        Err(e) => {
            error!("Error processing plan ID {} ({}): {e}", plan.id, plan.name);
            return Outcome::Failed {
                error: e.to_string(),
            };
        }
    };

    if existing {
        debug!(
            "Plan ID {} skipped: an order already exists for {target_date}",
            plan.id
        );
        return Outcome::Skipped;
    }

    match store.materialize(plan, target_date) {
        Ok(order) => {
            info!(
                "Order {} generated for plan ID {} ({})",
                order.id, plan.id, plan.name
            );
            Outcome::Created { order_id: order.id }
        }
        Err(e) => {
            error!("Error processing plan ID {} ({}): {e}", plan.id, plan.name);
            Outcome::Failed {
                error: e.to_string(),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use jiff::{Timestamp, civil::date};

    use super::*;
    use crate::{
        clock::FixedClock,
        error::UpkeepError,
        models::{Frequency, TriggerType},
    };

    /// In-memory store with a switchable failure per plan.
    #[derive(Default)]
    struct MemoryStore {
        plans: Vec<MaintenancePlan>,
        orders: Vec<(u64, Date)>,
        fail_materialize: HashSet<u64>,
        fail_listing: bool,
    }

    impl MaintenanceStore for MemoryStore {
        fn candidate_plans(&self, date: Date) -> Result<Vec<MaintenancePlan>> {
            if self.fail_listing {
                return Err(UpkeepError::Configuration {
                    message: "storage offline".to_string(),
                });
            }
            Ok(self
                .plans
                .iter()
                .filter(|p| p.is_candidate_on(date))
                .cloned()
                .collect())
        }

        fn has_scheduled_order(&self, plan_id: u64, date: Date) -> Result<bool> {
            Ok(self.orders.contains(&(plan_id, date)))
        }

        fn materialize(&mut self, plan: &MaintenancePlan, date: Date) -> Result<WorkOrder> {
            if self.fail_materialize.contains(&plan.id) {
                return Err(UpkeepError::Configuration {
                    message: "disk full".to_string(),
                });
            }
            self.orders.push((plan.id, date));
            Ok(WorkOrder {
                id: self.orders.len() as u64,
                origin_plan_id: Some(plan.id),
                station_id: plan.station_id,
                scheduled_date: date,
                order_type: crate::models::OrderType::Scheduled,
                status: crate::models::OrderStatus::Pending,
                assignee: None,
                affected_assets: plan.assets.clone(),
                created_at: Timestamp::UNIX_EPOCH,
                updated_at: Timestamp::UNIX_EPOCH,
            })
        }
    }

    fn daily_plan(id: u64) -> MaintenancePlan {
        MaintenancePlan {
            id,
            station_id: 1,
            name: format!("Plan {id}"),
            active: true,
            trigger_type: TriggerType::Time,
            start_date: date(2024, 1, 1),
            frequency: Some(Frequency::Daily),
            interval: 1,
            weekday: None,
            usage_hours_trigger: None,
            assets: vec![id * 10],
            created_at: Timestamp::UNIX_EPOCH,
            updated_at: Timestamp::UNIX_EPOCH,
        }
    }

    #[test]
    fn test_creates_orders_for_firing_plans() {
        let mut store = MemoryStore {
            plans: vec![daily_plan(1), daily_plan(2)],
            ..Default::default()
        };

        let summary = generate_for_date(&mut store, date(2024, 3, 1)).unwrap();

        assert_eq!(summary.created, 2);
        assert_eq!(summary.skipped, 0);
        assert_eq!(summary.errors, 0);
        assert_eq!(store.orders.len(), 2);
    }

    #[test]
    fn test_second_run_skips() {
        let mut store = MemoryStore {
            plans: vec![daily_plan(1)],
            ..Default::default()
        };

        let first = generate_for_date(&mut store, date(2024, 3, 1)).unwrap();
        let second = generate_for_date(&mut store, date(2024, 3, 1)).unwrap();

        assert_eq!(first.created, 1);
        assert_eq!(second.created, 0);
        assert_eq!(second.skipped, 1);
        assert_eq!(store.orders.len(), 1);
    }

    #[test]
    fn test_failure_is_isolated_per_plan() {
        let mut store = MemoryStore {
            plans: vec![daily_plan(1), daily_plan(2), daily_plan(3)],
            fail_materialize: HashSet::from([2]),
            ..Default::default()
        };

        let summary = generate_for_date(&mut store, date(2024, 3, 1)).unwrap();

        assert_eq!(summary.created, 2);
        assert_eq!(summary.errors, 1);
        assert_eq!(
            store.orders,
            vec![(1, date(2024, 3, 1)), (3, date(2024, 3, 1))]
        );
        assert!(matches!(
            summary.outcomes[1].outcome,
            Outcome::Failed { ref error } if error.contains("disk full")
        ));
    }

    #[test]
    fn test_non_firing_plans_leave_no_trace() {
        let mut plan = daily_plan(1);
        plan.interval = 2;
        let mut store = MemoryStore {
            plans: vec![plan],
            ..Default::default()
        };

        let summary = generate_for_date(&mut store, date(2024, 1, 2)).unwrap();

        assert_eq!(summary.created + summary.skipped + summary.errors, 0);
        assert!(summary.outcomes.is_empty());
    }

    #[test]
    fn test_misconfigured_plan_does_not_abort_run() {
        let mut broken = daily_plan(1);
        broken.interval = 0;
        let mut store = MemoryStore {
            plans: vec![broken, daily_plan(2)],
            ..Default::default()
        };

        let summary = generate_for_date(&mut store, date(2024, 3, 1)).unwrap();

        assert_eq!(summary.misconfigured, 1);
        assert_eq!(summary.errors, 0);
        assert_eq!(summary.created, 1);
    }

    #[test]
    fn test_inactive_usage_and_future_plans_are_not_candidates() {
        let mut inactive = daily_plan(1);
        inactive.active = false;
        let mut usage = daily_plan(2);
        usage.trigger_type = TriggerType::Usage;
        let mut future = daily_plan(3);
        future.start_date = date(2030, 1, 1);
        let mut store = MemoryStore {
            plans: vec![inactive, usage, future],
            ..Default::default()
        };

        let summary = generate_for_date(&mut store, date(2024, 3, 1)).unwrap();

        assert!(summary.outcomes.is_empty());
        assert!(store.orders.is_empty());
    }

    #[test]
    fn test_listing_failure_propagates() {
        let mut store = MemoryStore {
            fail_listing: true,
            ..Default::default()
        };

        assert!(generate_for_date(&mut store, date(2024, 3, 1)).is_err());
    }

    #[test]
    fn test_target_defaults_to_clock_date() {
        let mut store = MemoryStore {
            plans: vec![daily_plan(1)],
            ..Default::default()
        };
        let now: Zoned = "2024-05-06T23:30[America/Santiago]".parse().unwrap();
        let clock = FixedClock(now);

        let summary = run_daily_generation(&mut store, &clock, None).unwrap();
        assert_eq!(summary.target_date, date(2024, 5, 6));

        let explicit: Zoned = "2024-05-10T08:00[America/Santiago]".parse().unwrap();
        let summary = run_daily_generation(&mut store, &clock, Some(&explicit)).unwrap();
        assert_eq!(summary.target_date, date(2024, 5, 10));
    }
}
