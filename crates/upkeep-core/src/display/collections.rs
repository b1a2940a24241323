//! Collection wrapper types for displaying groups of domain objects.
//!
//! Each wrapper formats its items with the item's own `Display` and prints a
//! friendly line for empty collections.

use std::fmt;

use jiff::civil::Date;

use super::{datetime::ShortDate, models::ScheduleDescription};
use crate::models::{ActivityEntry, Asset, MaintenancePlan, Station, WorkOrder};

/// Newtype wrapper for displaying a list of stations.
pub struct Stations(pub Vec<Station>);

impl fmt::Display for Stations {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return writeln!(f, "No stations found.");
        }
        for station in &self.0 {
            write!(f, "{station}")?;
        }
        Ok(())
    }
}

/// Newtype wrapper for displaying a list of assets.
pub struct Assets(pub Vec<Asset>);

impl fmt::Display for Assets {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return writeln!(f, "No assets found.");
        }
        for asset in &self.0 {
            write!(f, "{asset}")?;
        }
        Ok(())
    }
}

/// Newtype wrapper for displaying plan lists in a compact form.
///
/// # Examples
///
/// ```rust
/// use upkeep_core::display::Plans;
///
/// assert_eq!(Plans(vec![]).to_string(), "No plans found.\n");
/// ```
pub struct Plans(pub Vec<MaintenancePlan>);

impl Plans {
    /// Check if the collection is empty.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Get the number of plans in the collection.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Get an iterator over the plans.
    pub fn iter(&self) -> std::slice::Iter<'_, MaintenancePlan> {
        self.0.iter()
    }
}

impl<'a> IntoIterator for &'a Plans {
    type Item = &'a MaintenancePlan;
    type IntoIter = std::slice::Iter<'a, MaintenancePlan>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl fmt::Display for Plans {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return writeln!(f, "No plans found.");
        }
        for plan in &self.0 {
            let state = if plan.active { "" } else { " (inactive)" };
            writeln!(f, "## {} (ID: {}){state}", plan.name, plan.id)?;
            writeln!(f)?;
            writeln!(f, "- **Schedule**: {}", ScheduleDescription(plan))?;
            writeln!(f, "- **Starts**: {}", ShortDate(&plan.start_date))?;
            writeln!(f, "- **Assets**: {}", plan.assets.len())?;
            writeln!(f)?;
        }
        Ok(())
    }
}

/// Newtype wrapper for displaying work order lists.
pub struct Orders(pub Vec<WorkOrder>);

impl fmt::Display for Orders {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return writeln!(f, "No work orders found.");
        }
        for order in &self.0 {
            order.fmt_compact(f)?;
        }
        Ok(())
    }
}

/// Newtype wrapper for displaying a plan's activity log.
pub struct ActivityLog(pub Vec<ActivityEntry>);

impl fmt::Display for ActivityLog {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return writeln!(f, "No activity recorded.");
        }
        for entry in &self.0 {
            write!(f, "{entry}")?;
        }
        Ok(())
    }
}

/// Upcoming occurrence dates of one plan.
pub struct Occurrences<'a> {
    pub plan: &'a MaintenancePlan,
    pub dates: &'a [Date],
}

impl fmt::Display for Occurrences<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "# Upcoming orders for {}", self.plan.name)?;
        writeln!(f)?;
        writeln!(f, "{}", ScheduleDescription(self.plan))?;
        writeln!(f)?;
        if self.dates.is_empty() {
            return writeln!(f, "No upcoming occurrences.");
        }
        for date in self.dates {
            writeln!(f, "- {}", ShortDate(date))?;
        }
        Ok(())
    }
}
