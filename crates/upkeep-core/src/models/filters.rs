//! Filter types for querying plans and work orders.

use jiff::civil::Date;

use super::{OrderStatus, OrderType, TriggerType};

/// Filter options for querying maintenance plans.
#[derive(Debug, Clone, Default)]
pub struct PlanFilter {
    /// Restrict to one station
    pub station_id: Option<u64>,

    /// Restrict by active flag
    pub active: Option<bool>,

    /// Restrict by trigger type
    pub trigger_type: Option<TriggerType>,

    /// Only plans whose start date is on or before this date
    pub starts_on_or_before: Option<Date>,

    /// Case-insensitive partial match on the plan name
    pub name_contains: Option<String>,
}

impl PlanFilter {
    /// Plans that take part in the daily calendar run for `date`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use jiff::civil::date;
    /// use upkeep_core::models::{PlanFilter, TriggerType};
    ///
    /// let filter = PlanFilter::candidates_for(date(2024, 1, 8));
    /// assert_eq!(filter.active, Some(true));
    /// assert_eq!(filter.trigger_type, Some(TriggerType::Time));
    /// assert_eq!(filter.starts_on_or_before, Some(date(2024, 1, 8)));
    /// ```
    pub fn candidates_for(date: Date) -> Self {
        Self {
            active: Some(true),
            trigger_type: Some(TriggerType::Time),
            starts_on_or_before: Some(date),
            ..Default::default()
        }
    }
}

/// Filter options for querying work orders.
#[derive(Debug, Clone, Default)]
pub struct OrderFilter {
    pub station_id: Option<u64>,
    pub origin_plan_id: Option<u64>,
    pub status: Option<OrderStatus>,
    pub order_type: Option<OrderType>,

    /// Inclusive scheduled-date range
    pub scheduled_from: Option<Date>,
    pub scheduled_to: Option<Date>,
}

impl From<&crate::params::ListOrders> for OrderFilter {
    fn from(params: &crate::params::ListOrders) -> Self {
        Self {
            station_id: params.station_id,
            origin_plan_id: params.plan_id,
            status: params.status,
            order_type: params.order_type,
            scheduled_from: params.from,
            scheduled_to: params.to,
        }
    }
}

impl From<&crate::params::ListPlans> for PlanFilter {
    fn from(params: &crate::params::ListPlans) -> Self {
        Self {
            station_id: params.station_id,
            active: if params.include_inactive {
                None
            } else {
                Some(true)
            },
            trigger_type: params.trigger_type,
            name_contains: params.search.clone(),
            ..Default::default()
        }
    }
}
