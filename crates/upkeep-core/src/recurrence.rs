//! Calendar rules deciding whether a plan fires on a given date.
//!
//! Every rule is anchored on the plan's `start_date`:
//!
//! - **Daily**: every `interval` days counted from the start date.
//! - **Weekly**: on the pinned weekday, in every `interval`-th Monday-aligned
//!   week counted from the start date's week. A weekly plan without a weekday
//!   never fires.
//! - **Monthly**: on the start date's day of month, every `interval` months.
//!   Months too short for that day are skipped, never shifted to month end.
//! - **Yearly**: on the start date's day and month, every `interval` years.
//!
//! Usage-triggered plans never fire here.

use jiff::civil::Date;
use thiserror::Error;

use crate::models::{Frequency, MaintenancePlan, TriggerType, Weekday};

/// A plan whose trigger configuration cannot be evaluated.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RecurrenceError {
    #[error("time-triggered plan has no frequency")]
    MissingFrequency,
    #[error("interval must be at least 1, got {interval}")]
    InvalidInterval { interval: i64 },
    #[error("calendar arithmetic failed: {0}")]
    Calendar(String),
}

/// Decides whether `plan` has an occurrence on `target_date`.
///
/// `target_weekday` must be the weekday of `target_date`. Dates before the
/// plan's start date never fire.
///
/// # Errors
///
/// Returns [`RecurrenceError`] when a time-triggered plan has no frequency or
/// an interval below 1.
///
/// # Examples
///
/// ```rust
/// use jiff::{Timestamp, civil::date};
/// use upkeep_core::{
///     models::{Frequency, MaintenancePlan, TriggerType, Weekday},
///     recurrence::should_fire,
/// };
///
/// let plan = MaintenancePlan {
///     id: 1,
///     station_id: 1,
///     name: "Hose inspection".to_string(),
///     active: true,
///     trigger_type: TriggerType::Time,
///     start_date: date(2024, 1, 1),
///     frequency: Some(Frequency::Weekly),
///     interval: 1,
///     weekday: Some(Weekday::Monday),
///     usage_hours_trigger: None,
///     assets: vec![],
///     created_at: Timestamp::now(),
///     updated_at: Timestamp::now(),
/// };
///
/// assert!(should_fire(&plan, date(2024, 1, 8), Weekday::Monday).unwrap());
/// assert!(!should_fire(&plan, date(2024, 1, 9), Weekday::Tuesday).unwrap());
/// ```
pub fn should_fire(
    plan: &MaintenancePlan,
    target_date: Date,
    target_weekday: Weekday,
) -> Result<bool, RecurrenceError> {
    if plan.trigger_type == TriggerType::Usage {
        return Ok(false);
    }

    let frequency = plan.frequency.ok_or(RecurrenceError::MissingFrequency)?;
    if plan.interval < 1 {
        return Err(RecurrenceError::InvalidInterval {
            interval: plan.interval,
        });
    }

    let start = plan.start_date;
    if target_date < start {
        return Ok(false);
    }

    let interval = plan.interval;
    let fires = match frequency {
        Frequency::Daily => days_between(start, target_date)? % interval == 0,
        Frequency::Weekly => match plan.weekday {
            Some(pinned) if pinned == target_weekday => {
                weeks_between(start, target_date, target_weekday)? % interval == 0
            }
            _ => false,
        },
        Frequency::Monthly => {
            target_date.day() == start.day() && months_between(start, target_date) % interval == 0
        }
        Frequency::Yearly => {
            target_date.day() == start.day()
                && target_date.month() == start.month()
                && years_between(start, target_date) % interval == 0
        }
    };

    Ok(fires)
}

/// Convenience wrapper deriving the weekday from the date itself.
///
/// # Errors
///
/// See [`should_fire`].
pub fn fires_on(plan: &MaintenancePlan, date: Date) -> Result<bool, RecurrenceError> {
    should_fire(plan, date, Weekday::of(date))
}

/// Lists up to `limit` occurrences of `plan` on or after `from`, looking no
/// further than `horizon_days` ahead.
///
/// # Errors
///
/// See [`should_fire`].
pub fn upcoming(
    plan: &MaintenancePlan,
    from: Date,
    limit: usize,
    horizon_days: u32,
) -> Result<Vec<Date>, RecurrenceError> {
    let mut dates = Vec::new();
    let mut day = from;
    for _ in 0..horizon_days {
        if dates.len() >= limit {
            break;
        }
        if fires_on(plan, day)? {
            dates.push(day);
        }
        day = match day.tomorrow() {
            Ok(next) => next,
            Err(_) => break,
        };
    }
    Ok(dates)
}

fn days_between(start: Date, end: Date) -> Result<i64, RecurrenceError> {
    let span = end
        .since(start)
        .map_err(|e| RecurrenceError::Calendar(e.to_string()))?;
    Ok(i64::from(span.get_days()))
}

/// Whole weeks between the Monday starting `start`'s week and the Monday
/// starting `end`'s week.
fn weeks_between(start: Date, end: Date, end_weekday: Weekday) -> Result<i64, RecurrenceError> {
    let elapsed = days_between(start, end)?;
    let start_offset = i64::from(Weekday::of(start).index());
    let end_offset = i64::from(end_weekday.index());
    Ok((elapsed + start_offset - end_offset).div_euclid(7))
}

fn months_between(start: Date, end: Date) -> i64 {
    (i64::from(end.year()) - i64::from(start.year())) * 12
        + (i64::from(end.month()) - i64::from(start.month()))
}

fn years_between(start: Date, end: Date) -> i64 {
    i64::from(end.year()) - i64::from(start.year())
}

#[cfg(test)]
mod tests {
    use jiff::{Timestamp, ToSpan, civil::date};

    use super::*;

    fn plan(frequency: Frequency, start: Date, interval: i64) -> MaintenancePlan {
        MaintenancePlan {
            id: 1,
            station_id: 1,
            name: "Test plan".to_string(),
            active: true,
            trigger_type: TriggerType::Time,
            start_date: start,
            frequency: Some(frequency),
            interval,
            weekday: None,
            usage_hours_trigger: None,
            assets: vec![],
            created_at: Timestamp::UNIX_EPOCH,
            updated_at: Timestamp::UNIX_EPOCH,
        }
    }

    fn weekly(start: Date, interval: i64, weekday: Weekday) -> MaintenancePlan {
        MaintenancePlan {
            weekday: Some(weekday),
            ..plan(Frequency::Weekly, start, interval)
        }
    }

    #[test]
    fn test_daily_interval_one_fires_every_day() {
        let start = date(2024, 2, 20);
        let p = plan(Frequency::Daily, start, 1);
        for k in 0..60 {
            let day = start.checked_add(k.days()).unwrap();
            assert!(fires_on(&p, day).unwrap(), "should fire on {day}");
        }
    }

    #[test]
    fn test_daily_interval_n_fires_on_multiples() {
        let start = date(2023, 12, 30);
        for interval in 2..=5 {
            let p = plan(Frequency::Daily, start, interval);
            for k in 0..40 {
                let day = start.checked_add(k.days()).unwrap();
                assert_eq!(
                    fires_on(&p, day).unwrap(),
                    k % interval == 0,
                    "interval {interval}, offset {k}"
                );
            }
        }
    }

    #[test]
    fn test_never_fires_before_start() {
        let p = plan(Frequency::Daily, date(2024, 5, 10), 1);
        assert!(!fires_on(&p, date(2024, 5, 9)).unwrap());
        assert!(!fires_on(&p, date(2023, 5, 10)).unwrap());
    }

    #[test]
    fn test_weekly_monday_scenario() {
        let p = weekly(date(2024, 1, 1), 1, Weekday::Monday);
        assert!(should_fire(&p, date(2024, 1, 8), Weekday::Monday).unwrap());
        assert!(!should_fire(&p, date(2024, 1, 9), Weekday::Tuesday).unwrap());
        assert!(should_fire(&p, date(2024, 1, 15), Weekday::Monday).unwrap());
    }

    #[test]
    fn test_weekly_every_second_wednesday() {
        // 2024-01-04 is a Thursday; its week starts Monday 2024-01-01.
        let p = weekly(date(2024, 1, 4), 2, Weekday::Wednesday);

        // Wednesday of the start week precedes the start date.
        assert!(!fires_on(&p, date(2024, 1, 3)).unwrap());
        // One week later: odd week offset.
        assert!(!fires_on(&p, date(2024, 1, 10)).unwrap());
        assert!(fires_on(&p, date(2024, 1, 17)).unwrap());
        assert!(!fires_on(&p, date(2024, 1, 24)).unwrap());
        assert!(fires_on(&p, date(2024, 1, 31)).unwrap());
    }

    #[test]
    fn test_weekly_start_on_pinned_day_fires_immediately() {
        let p = weekly(date(2024, 1, 3), 2, Weekday::Wednesday);
        assert!(fires_on(&p, date(2024, 1, 3)).unwrap());
        assert!(!fires_on(&p, date(2024, 1, 10)).unwrap());
        assert!(fires_on(&p, date(2024, 1, 17)).unwrap());
    }

    #[test]
    fn test_weekly_without_weekday_never_fires() {
        let p = plan(Frequency::Weekly, date(2024, 1, 1), 1);
        let mut day = date(2024, 1, 1);
        for _ in 0..21 {
            assert!(!fires_on(&p, day).unwrap());
            day = day.tomorrow().unwrap();
        }
    }

    #[test]
    fn test_weekly_wrong_weekday_does_not_fire() {
        let p = weekly(date(2024, 1, 1), 1, Weekday::Friday);
        assert!(!fires_on(&p, date(2024, 1, 8)).unwrap());
        assert!(fires_on(&p, date(2024, 1, 12)).unwrap());
    }

    #[test]
    fn test_monthly_same_day_every_interval() {
        let p = plan(Frequency::Monthly, date(2024, 1, 15), 2);
        assert!(fires_on(&p, date(2024, 1, 15)).unwrap());
        assert!(!fires_on(&p, date(2024, 2, 15)).unwrap());
        assert!(fires_on(&p, date(2024, 3, 15)).unwrap());
        assert!(!fires_on(&p, date(2024, 3, 16)).unwrap());
        assert!(fires_on(&p, date(2025, 1, 15)).unwrap());
    }

    #[test]
    fn test_monthly_31st_skips_short_months() {
        let p = plan(Frequency::Monthly, date(2024, 1, 31), 1);
        assert!(!fires_on(&p, date(2024, 4, 30)).unwrap());
        assert!(!fires_on(&p, date(2024, 2, 29)).unwrap());
        assert!(fires_on(&p, date(2024, 3, 31)).unwrap());
        assert!(fires_on(&p, date(2024, 5, 31)).unwrap());
    }

    #[test]
    fn test_yearly_scenario() {
        let p = plan(Frequency::Yearly, date(2023, 3, 10), 1);
        assert!(fires_on(&p, date(2024, 3, 10)).unwrap());
        assert!(!fires_on(&p, date(2024, 3, 11)).unwrap());
        assert!(!fires_on(&p, date(2024, 4, 10)).unwrap());
    }

    #[test]
    fn test_yearly_interval_two() {
        let p = plan(Frequency::Yearly, date(2020, 6, 1), 2);
        assert!(!fires_on(&p, date(2021, 6, 1)).unwrap());
        assert!(fires_on(&p, date(2022, 6, 1)).unwrap());
    }

    #[test]
    fn test_usage_plans_never_fire() {
        let mut p = plan(Frequency::Daily, date(2024, 1, 1), 1);
        p.trigger_type = TriggerType::Usage;
        assert!(!fires_on(&p, date(2024, 1, 1)).unwrap());
    }

    #[test]
    fn test_invalid_interval_is_an_error() {
        let p = plan(Frequency::Daily, date(2024, 1, 1), 0);
        assert_eq!(
            fires_on(&p, date(2024, 1, 1)),
            Err(RecurrenceError::InvalidInterval { interval: 0 })
        );
        let p = plan(Frequency::Monthly, date(2024, 1, 1), -3);
        assert!(fires_on(&p, date(2024, 1, 1)).is_err());
    }

    #[test]
    fn test_missing_frequency_is_an_error() {
        let mut p = plan(Frequency::Daily, date(2024, 1, 1), 1);
        p.frequency = None;
        assert_eq!(
            fires_on(&p, date(2024, 1, 2)),
            Err(RecurrenceError::MissingFrequency)
        );
    }

    #[test]
    fn test_upcoming_lists_next_occurrences() {
        let p = weekly(date(2024, 1, 1), 1, Weekday::Monday);
        let dates = upcoming(&p, date(2024, 1, 2), 3, 60).unwrap();
        assert_eq!(
            dates,
            vec![date(2024, 1, 8), date(2024, 1, 15), date(2024, 1, 22)]
        );
    }

    #[test]
    fn test_upcoming_respects_horizon() {
        let p = plan(Frequency::Yearly, date(2024, 1, 1), 1);
        assert!(upcoming(&p, date(2024, 1, 2), 5, 30).unwrap().is_empty());
    }
}
