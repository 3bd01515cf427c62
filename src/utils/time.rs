use std::fmt;
use std::ops::Sub;

use chrono::NaiveTime;
use serde::{Deserialize, Serialize};

use crate::error::EngineError;

/// Time of day normalized to whole minutes since midnight.
///
/// Schedules and permissions arrive as loose "HH:MM" / "HH:MM:SS" strings;
/// everything is converted here once so the projection arithmetic stays in
/// integer minutes and never touches floats or string formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TimeOfDay(i32);

impl TimeOfDay {
    pub fn from_minutes(minutes: i32) -> Self {
        TimeOfDay(minutes)
    }

    pub fn from_hm(hour: i32, minute: i32) -> Self {
        TimeOfDay(hour * 60 + minute)
    }

    /// Parses "HH:MM" or "HH:MM:SS". Seconds are truncated.
    pub fn parse(raw: &str) -> Result<Self, EngineError> {
        let trimmed = raw.trim();
        let parsed = NaiveTime::parse_from_str(trimmed, "%H:%M:%S")
            .or_else(|_| NaiveTime::parse_from_str(trimmed, "%H:%M"))
            .map_err(|_| EngineError::BadTimeOfDay(raw.to_string()))?;

        use chrono::Timelike;
        Ok(TimeOfDay::from_hm(parsed.hour() as i32, parsed.minute() as i32))
    }

    /// Parses an optional, possibly blank time field. `None` and `""` both
    /// mean "not set".
    pub fn parse_opt(raw: Option<&str>) -> Result<Option<Self>, EngineError> {
        match raw {
            Some(s) if !s.trim().is_empty() => Ok(Some(TimeOfDay::parse(s)?)),
            _ => Ok(None),
        }
    }

    pub fn minutes(self) -> i32 {
        self.0
    }
}

impl Sub for TimeOfDay {
    type Output = i32;

    fn sub(self, other: TimeOfDay) -> i32 {
        self.0 - other.0
    }
}

impl fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.0 / 60, self.0 % 60)
    }
}

/// Hour values are persisted with one decimal.
pub fn round1(hours: f64) -> f64 {
    (hours * 10.0).round() / 10.0
}

/// Minutes to hours, at the result boundary only.
pub fn minutes_to_hours(minutes: i32) -> f64 {
    minutes as f64 / 60.0
}
