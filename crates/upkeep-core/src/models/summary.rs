//! Result of a daily generation run.

use jiff::civil::Date;
use serde::{Deserialize, Serialize};

/// What happened to a single plan during a run.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum Outcome {
    /// A new scheduled order was materialized
    Created { order_id: u64 },
    /// An order for this plan and date already existed
    Skipped,
    /// The plan's trigger configuration is unusable
    Misconfigured { reason: String },
    /// Materialization failed
    Failed { error: String },
}

/// Outcome record for one plan that fired (or should have).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PlanOutcome {
    pub plan_id: u64,
    pub plan_name: String,
    #[serde(flatten)]
    pub outcome: Outcome,
}

/// Aggregated counters for one invocation of the daily run.
///
/// Plans whose rule does not fire on the target date leave no trace here.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GenerationSummary {
    pub target_date: Date,
    pub created: u32,
    pub skipped: u32,
    pub errors: u32,
    pub misconfigured: u32,
    #[serde(default)]
    pub outcomes: Vec<PlanOutcome>,
}

impl GenerationSummary {
    /// Empty summary for a run targeting `target_date`.
    pub fn new(target_date: Date) -> Self {
        Self {
            target_date,
            created: 0,
            skipped: 0,
            errors: 0,
            misconfigured: 0,
            outcomes: Vec::new(),
        }
    }

    /// Records a plan outcome and bumps the matching counter.
    pub fn record(&mut self, plan_id: u64, plan_name: &str, outcome: Outcome) {
        match outcome {
            Outcome::Created { .. } => self.created += 1,
            Outcome::Skipped => self.skipped += 1,
            Outcome::Misconfigured { .. } => self.misconfigured += 1,
            Outcome::Failed { .. } => self.errors += 1,
        }
        self.outcomes.push(PlanOutcome {
            plan_id,
            plan_name: plan_name.to_string(),
            outcome,
        });
    }
}
