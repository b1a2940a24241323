//! Cross-field validation for plan definitions.
//!
//! A plan's trigger fields depend on each other. Time-triggered plans need a
//! frequency and an interval of at least one and carry no usage hours.
//! Usage-triggered plans need positive usage hours and carry no calendar
//! fields. Fields that do not belong to the chosen trigger are cleared rather
//! than rejected.

use log::warn;

use crate::{
    error::{Result, UpkeepError},
    models::{Frequency, MaintenancePlan, TriggerType, Weekday},
    params::{CreatePlan, UpdatePlan},
};

/// Trigger configuration of a plan after normalization.
#[derive(Debug, Clone, PartialEq)]
pub struct Schedule {
    pub trigger_type: TriggerType,
    pub frequency: Option<Frequency>,
    pub interval: i64,
    pub weekday: Option<Weekday>,
    pub usage_hours_trigger: Option<f64>,
}

/// Validates and normalizes the trigger fields of a plan.
///
/// # Errors
///
/// Returns [`UpkeepError::InvalidInput`] naming the offending field.
pub fn validate_schedule(
    trigger_type: TriggerType,
    frequency: Option<Frequency>,
    interval: Option<i64>,
    weekday: Option<Weekday>,
    usage_hours_trigger: Option<f64>,
) -> Result<Schedule> {
    match trigger_type {
        TriggerType::Time => {
            let frequency = frequency.ok_or_else(|| {
                UpkeepError::invalid_input("frequency")
                    .with_reason("required when the trigger is time")
            })?;
            let interval = match interval {
                Some(n) if n >= 1 => n,
                Some(n) => {
                    return Err(UpkeepError::invalid_input("interval")
                        .with_reason(format!("must be at least 1, got {n}")));
                }
                None => {
                    return Err(UpkeepError::invalid_input("interval")
                        .with_reason("required when the trigger is time"));
                }
            };
            let weekday = match frequency {
                Frequency::Weekly => {
                    if weekday.is_none() {
                        warn!("Weekly plan saved without a weekday; it will never fire");
                    }
                    weekday
                }
                _ => None,
            };
            Ok(Schedule {
                trigger_type,
                frequency: Some(frequency),
                interval,
                weekday,
                usage_hours_trigger: None,
            })
        }
        TriggerType::Usage => match usage_hours_trigger {
            Some(hours) if hours > 0.0 && hours.is_finite() => Ok(Schedule {
                trigger_type,
                frequency: None,
                interval: 1,
                weekday: None,
                usage_hours_trigger: Some(hours),
            }),
            _ => Err(UpkeepError::invalid_input("usage_hours_trigger")
                .with_reason("usage hours must be greater than 0")),
        },
    }
}

/// Trims a plan name and rejects empty ones.
///
/// # Errors
///
/// Returns [`UpkeepError::InvalidInput`] for a blank name.
pub fn validate_name(name: &str) -> Result<String> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(UpkeepError::invalid_input("name").with_reason("cannot be empty"));
    }
    Ok(trimmed.to_string())
}

impl CreatePlan {
    /// Validated name and schedule for a new plan.
    ///
    /// # Errors
    ///
    /// See [`validate_schedule`] and [`validate_name`].
    pub fn validate(&self) -> Result<(String, Schedule)> {
        let name = validate_name(&self.name)?;
        let schedule = validate_schedule(
            self.trigger_type,
            self.frequency,
            self.interval,
            self.weekday,
            self.usage_hours_trigger,
        )?;
        Ok((name, schedule))
    }
}

impl UpdatePlan {
    /// Applies the edit on top of `current`, validating the merged result.
    ///
    /// # Errors
    ///
    /// See [`validate_schedule`] and [`validate_name`].
    pub fn apply_to(&self, current: &MaintenancePlan) -> Result<MaintenancePlan> {
        let name = match &self.name {
            Some(name) => validate_name(name)?,
            None => current.name.clone(),
        };
        let weekday = if self.clear_weekday {
            None
        } else {
            self.weekday.or(current.weekday)
        };
        let schedule = validate_schedule(
            self.trigger_type.unwrap_or(current.trigger_type),
            self.frequency.or(current.frequency),
            Some(self.interval.unwrap_or(current.interval)),
            weekday,
            self.usage_hours_trigger.or(current.usage_hours_trigger),
        )?;

        Ok(MaintenancePlan {
            name,
            start_date: self.start_date.unwrap_or(current.start_date),
            active: self.active.unwrap_or(current.active),
            trigger_type: schedule.trigger_type,
            frequency: schedule.frequency,
            interval: schedule.interval,
            weekday: schedule.weekday,
            usage_hours_trigger: schedule.usage_hours_trigger,
            ..current.clone()
        })
    }
}
