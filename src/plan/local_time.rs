use chrono::{DateTime, NaiveTime, TimeDelta, Utc};

/// Local mean solar time at the given longitude, as time of day since
/// midnight. The offset from UTC is purely longitude-proportional
/// (15 degrees per hour); time zones are irrelevant for imaging geometry.
pub fn local_solar_time(dt: DateTime<Utc>, longitude_deg: f64) -> TimeDelta {
    let offset_us = (longitude_deg * 24.0 / 360.0 * 3_600_000_000.0).round() as i64;
    let local = dt + TimeDelta::microseconds(offset_us);
    local.time().signed_duration_since(NaiveTime::MIN)
}

/// Inclusive time-of-day window, e.g. 09:30 to 11:00 local.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LocalTimeWindow {
    pub start: TimeDelta,
    pub end: TimeDelta,
}

impl LocalTimeWindow {
    pub fn new(start: TimeDelta, end: TimeDelta) -> Self {
        Self { start, end }
    }

    pub fn all_day() -> Self {
        Self {
            start: TimeDelta::zero(),
            end: TimeDelta::hours(24),
        }
    }

    pub fn contains(&self, time_of_day: TimeDelta) -> bool {
        self.start <= time_of_day && time_of_day <= self.end
    }
}
