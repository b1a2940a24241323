//! Display implementations for domain models.
//!
//! Kept apart from the model definitions. Every implementation produces
//! markdown for the CLI's terminal renderer.

use std::fmt;

use super::datetime::{LocalDateTime, ShortDate};
use crate::models::{
    ActivityEntry, Asset, ChangeDetails, Frequency, GenerationSummary, MaintenancePlan,
    OrderStatus, OrderType, Outcome, Station, TriggerType, Weekday, WorkOrder,
};

impl fmt::Display for TriggerType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl fmt::Display for Frequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl fmt::Display for Weekday {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = self.as_str();
        let (first, rest) = name.split_at(1);
        write!(f, "{}{rest}", first.to_uppercase())
    }
}

impl fmt::Display for OrderType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl fmt::Display for Station {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "- **{}** (ID: {})", self.name, self.id)
    }
}

impl fmt::Display for Asset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "- `{}` {} (ID: {}, station {})",
            self.code, self.name, self.id, self.station_id
        )
    }
}

/// Human description of a plan's trigger, e.g. "Every 2 weeks on Monday".
pub struct ScheduleDescription<'a>(pub &'a MaintenancePlan);

impl fmt::Display for ScheduleDescription<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let plan = self.0;
        if plan.trigger_type == TriggerType::Usage {
            return match plan.usage_hours_trigger {
                Some(hours) => write!(f, "Every {hours} hours of use"),
                None => write!(f, "Usage-based (no hours set)"),
            };
        }

        let Some(frequency) = plan.frequency else {
            return write!(f, "No frequency set");
        };
        let (singular, plural) = frequency.unit();
        if plan.interval == 1 {
            write!(f, "Every {singular}")?;
        } else {
            write!(f, "Every {} {plural}", plan.interval)?;
        }

        match frequency {
            Frequency::Weekly => match plan.weekday {
                Some(day) => write!(f, " on {day}"),
                None => write!(f, " (no weekday, never fires)"),
            },
            Frequency::Monthly => write!(f, " on day {}", plan.start_date.day()),
            Frequency::Yearly => write!(f, " on {}", plan.start_date.strftime("%B %-d")),
            Frequency::Daily => Ok(()),
        }
    }
}

impl fmt::Display for MaintenancePlan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = if self.active { "" } else { " (inactive)" };
        writeln!(f, "# {}. {}{state}", self.id, self.name)?;
        writeln!(f)?;

        writeln!(f, "- Station: {}", self.station_id)?;
        writeln!(f, "- Trigger: {}", self.trigger_type)?;
        writeln!(f, "- Schedule: {}", ScheduleDescription(self))?;
        writeln!(f, "- Starts: {}", ShortDate(&self.start_date))?;
        writeln!(f, "- Created: {}", LocalDateTime(&self.created_at))?;
        writeln!(f, "- Updated: {}", LocalDateTime(&self.updated_at))?;

        if self.assets.is_empty() {
            writeln!(f, "\nNo assets attached to this plan.")?;
        } else {
            writeln!(f, "\n## Assets")?;
            writeln!(f)?;
            for asset_id in &self.assets {
                writeln!(f, "- {asset_id}")?;
            }
        }

        Ok(())
    }
}

impl WorkOrder {
    /// Compact one-entry form used in order lists.
    pub(crate) fn fmt_compact(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "## {}. {} {} ({})",
            self.id,
            ShortDate(&self.scheduled_date),
            self.order_type,
            self.status.with_icon()
        )?;
        match self.origin_plan_id {
            Some(plan_id) => writeln!(f, " from plan {plan_id}")?,
            None => writeln!(f)?,
        }
        writeln!(f)?;

        if let Some(assignee) = &self.assignee {
            writeln!(f, "- **Assignee**: {assignee}")?;
        }
        writeln!(f, "- **Assets**: {}", self.affected_assets.len())?;
        writeln!(f)
    }
}

impl fmt::Display for WorkOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "# Work order {}", self.id)?;
        writeln!(f)?;

        writeln!(f, "- Status: {}", self.status.with_icon())?;
        writeln!(f, "- Type: {}", self.order_type)?;
        writeln!(f, "- Scheduled: {}", ShortDate(&self.scheduled_date))?;
        writeln!(f, "- Station: {}", self.station_id)?;
        match self.origin_plan_id {
            Some(plan_id) => writeln!(f, "- Plan: {plan_id}")?,
            None if self.order_type == OrderType::Scheduled => {
                writeln!(f, "- Plan: deleted")?;
            }
            None => {}
        }
        if let Some(assignee) = &self.assignee {
            writeln!(f, "- Assignee: {assignee}")?;
        }
        writeln!(f, "- Created: {}", LocalDateTime(&self.created_at))?;
        writeln!(f, "- Updated: {}", LocalDateTime(&self.updated_at))?;

        if !self.affected_assets.is_empty() {
            writeln!(f, "\n## Affected assets")?;
            writeln!(f)?;
            for asset_id in &self.affected_assets {
                writeln!(f, "- {asset_id}")?;
            }
        }

        Ok(())
    }
}

impl fmt::Display for ActivityEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let actor = self.actor.as_deref().unwrap_or("system");
        writeln!(
            f,
            "## {} {} ({})",
            actor,
            self.verb,
            LocalDateTime(&self.recorded_at)
        )?;
        writeln!(f)?;

        match serde_json::from_value::<ChangeDetails>(self.details.clone()) {
            Ok(details) if details.total_changes > 0 => {
                writeln!(f, "- **Changes**: {}", details.total_changes)?;
                for line in &details.change_history {
                    writeln!(f, "  - {line}")?;
                }
            }
            _ => writeln!(f, "- **Details**: {}", self.details)?,
        }
        writeln!(f)
    }
}

impl fmt::Display for GenerationSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "# Order generation for {}", ShortDate(&self.target_date))?;
        writeln!(f)?;
        writeln!(f, "- Created: {}", self.created)?;
        writeln!(f, "- Skipped: {}", self.skipped)?;
        writeln!(f, "- Errors: {}", self.errors)?;
        if self.misconfigured > 0 {
            writeln!(f, "- Misconfigured: {}", self.misconfigured)?;
        }

        if self.outcomes.is_empty() {
            writeln!(f, "\nNo plans due on this date.")?;
            return Ok(());
        }

        writeln!(f, "\n## Plans")?;
        writeln!(f)?;
        for record in &self.outcomes {
            write!(f, "- {}. {}: ", record.plan_id, record.plan_name)?;
            match &record.outcome {
                Outcome::Created { order_id } => writeln!(f, "created order {order_id}")?,
                Outcome::Skipped => writeln!(f, "already generated")?,
                Outcome::Misconfigured { reason } => writeln!(f, "misconfigured ({reason})")?,
                Outcome::Failed { error } => writeln!(f, "failed ({error})")?,
            }
        }

        Ok(())
    }
}
