//! Sources of "now" for resolving the daily run's target date.

use jiff::{Timestamp, Zoned, tz::TimeZone};

/// Supplies the current instant in the station's time zone.
pub trait Clock {
    fn now(&self) -> Zoned;
}

/// Wall clock in a fixed time zone.
#[derive(Debug, Clone)]
pub struct SystemClock {
    time_zone: TimeZone,
}

impl SystemClock {
    pub fn new(time_zone: TimeZone) -> Self {
        Self { time_zone }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new(TimeZone::system())
    }
}

impl Clock for SystemClock {
    fn now(&self) -> Zoned {
        Timestamp::now().to_zoned(self.time_zone.clone())
    }
}

/// Clock frozen at one instant, for backfills and tests.
#[derive(Debug, Clone)]
pub struct FixedClock(pub Zoned);

impl Clock for FixedClock {
    fn now(&self) -> Zoned {
        self.0.clone()
    }
}
