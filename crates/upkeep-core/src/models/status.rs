//! Enumerations for plan triggers, recurrence units and work orders.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// What drives a maintenance plan: the calendar or accumulated usage.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum TriggerType {
    /// Plan fires on a calendar schedule
    #[default]
    Time,

    /// Plan fires on reported usage hours
    Usage,
}

impl FromStr for TriggerType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "time" => Ok(TriggerType::Time),
            "usage" => Ok(TriggerType::Usage),
            _ => Err(format!("Invalid trigger type: {s}")),
        }
    }
}

impl TriggerType {
    /// Convert to database string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            TriggerType::Time => "time",
            TriggerType::Usage => "usage",
        }
    }
}

/// Calendar unit a time-triggered plan recurs in.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Frequency {
    Daily,
    Weekly,
    Monthly,
    Yearly,
}

impl FromStr for Frequency {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "daily" => Ok(Frequency::Daily),
            "weekly" => Ok(Frequency::Weekly),
            "monthly" => Ok(Frequency::Monthly),
            "yearly" => Ok(Frequency::Yearly),
            _ => Err(format!("Invalid frequency: {s}")),
        }
    }
}

impl Frequency {
    /// Convert to database string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            Frequency::Daily => "daily",
            Frequency::Weekly => "weekly",
            Frequency::Monthly => "monthly",
            Frequency::Yearly => "yearly",
        }
    }

    /// Singular and plural unit names used when describing an interval.
    pub fn unit(&self) -> (&'static str, &'static str) {
        match self {
            Frequency::Daily => ("day", "days"),
            Frequency::Weekly => ("week", "weeks"),
            Frequency::Monthly => ("month", "months"),
            Frequency::Yearly => ("year", "years"),
        }
    }
}

/// Day of the week, numbered 0 (Monday) through 6 (Sunday).
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord)]
#[serde(rename_all = "snake_case")]
pub enum Weekday {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

impl Weekday {
    const ALL: [Weekday; 7] = [
        Weekday::Monday,
        Weekday::Tuesday,
        Weekday::Wednesday,
        Weekday::Thursday,
        Weekday::Friday,
        Weekday::Saturday,
        Weekday::Sunday,
    ];

    /// Monday-zero index of this weekday.
    pub fn index(&self) -> u8 {
        *self as u8
    }

    /// Weekday for a Monday-zero index, `None` outside `0..=6`.
    pub fn from_index(index: u8) -> Option<Self> {
        Self::ALL.get(usize::from(index)).copied()
    }

    /// Weekday of a calendar date.
    pub fn of(date: jiff::civil::Date) -> Self {
        date.weekday().into()
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Weekday::Monday => "monday",
            Weekday::Tuesday => "tuesday",
            Weekday::Wednesday => "wednesday",
            Weekday::Thursday => "thursday",
            Weekday::Friday => "friday",
            Weekday::Saturday => "saturday",
            Weekday::Sunday => "sunday",
        }
    }
}

impl From<jiff::civil::Weekday> for Weekday {
    fn from(day: jiff::civil::Weekday) -> Self {
        // to_monday_zero_offset is always within 0..=6
        Self::ALL[day.to_monday_zero_offset() as usize]
    }
}

impl FromStr for Weekday {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.to_lowercase();
        if let Ok(index) = lower.parse::<u8>() {
            return Self::from_index(index).ok_or_else(|| format!("Invalid weekday: {s}"));
        }
        Self::ALL
            .iter()
            .copied()
            .find(|day| day.as_str() == lower || day.as_str()[..3] == lower)
            .ok_or_else(|| format!("Invalid weekday: {s}"))
    }
}

/// Whether a work order came from a plan or was raised by hand.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum OrderType {
    /// Generated from a preventive plan
    Scheduled,

    /// Raised manually for a repair
    Corrective,
}

impl FromStr for OrderType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "scheduled" => Ok(OrderType::Scheduled),
            "corrective" => Ok(OrderType::Corrective),
            _ => Err(format!("Invalid order type: {s}")),
        }
    }
}

impl OrderType {
    /// Convert to database string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderType::Scheduled => "scheduled",
            OrderType::Corrective => "corrective",
        }
    }
}

/// Lifecycle status of a work order.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    #[default]
    Pending,
    InProgress,
    Closed,
    Cancelled,
}

impl FromStr for OrderStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "pending" => Ok(OrderStatus::Pending),
            "in_progress" | "inprogress" => Ok(OrderStatus::InProgress),
            "closed" => Ok(OrderStatus::Closed),
            "cancelled" | "canceled" => Ok(OrderStatus::Cancelled),
            _ => Err(format!("Invalid order status: {s}")),
        }
    }
}

impl OrderStatus {
    /// Convert to database string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "pending",
            OrderStatus::InProgress => "in_progress",
            OrderStatus::Closed => "closed",
            OrderStatus::Cancelled => "cancelled",
        }
    }

    /// Closed and cancelled orders never change status again.
    pub fn is_terminal(&self) -> bool {
        matches!(self, OrderStatus::Closed | OrderStatus::Cancelled)
    }

    /// Whether an order in this status may move to `next`.
    pub fn can_transition_to(&self, next: OrderStatus) -> bool {
        match (self, next) {
            (OrderStatus::Pending, OrderStatus::InProgress) => true,
            (OrderStatus::Pending | OrderStatus::InProgress, OrderStatus::Closed) => true,
            (OrderStatus::Pending | OrderStatus::InProgress, OrderStatus::Cancelled) => true,
            _ => false,
        }
    }

    /// Get status with consistent icon formatting for display.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use upkeep_core::models::OrderStatus;
    ///
    /// assert_eq!(OrderStatus::Closed.with_icon(), "✓ Closed");
    /// assert_eq!(OrderStatus::InProgress.with_icon(), "➤ In Progress");
    /// assert_eq!(OrderStatus::Pending.with_icon(), "○ Pending");
    /// ```
    pub fn with_icon(&self) -> &'static str {
        match self {
            OrderStatus::Closed => "✓ Closed",
            OrderStatus::InProgress => "➤ In Progress",
            OrderStatus::Pending => "○ Pending",
            OrderStatus::Cancelled => "✗ Cancelled",
        }
    }
}
