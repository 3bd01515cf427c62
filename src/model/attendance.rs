use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString};

use crate::utils::time::{minutes_to_hours, round1};

/// Where the query time falls inside the work day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum DayStatus {
    NotStarted,
    Working,
    OnBreak,
    Completed,
}

/// Output of a single projection. Ephemeral: recomputed on every call, the
/// caller decides whether to persist it as an [`AttendanceRecord`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DailyHoursResult {
    pub expected_hours: f64,
    pub actual_hours: f64,
    pub balance_hours: f64,
    pub status: DayStatus,
}

impl DailyHoursResult {
    pub(crate) fn from_minutes(expected: i32, actual: i32, status: DayStatus) -> Self {
        DailyHoursResult {
            expected_hours: minutes_to_hours(expected),
            actual_hours: minutes_to_hours(actual),
            balance_hours: minutes_to_hours(actual - expected),
            status,
        }
    }

    /// Non-working day: nothing expected, nothing owed.
    pub(crate) fn rest_day() -> Self {
        DailyHoursResult::from_minutes(0, 0, DayStatus::Completed)
    }

    /// Hour fields rounded to one decimal, as persisted.
    pub fn rounded(&self) -> Self {
        DailyHoursResult {
            expected_hours: round1(self.expected_hours),
            actual_hours: round1(self.actual_hours),
            balance_hours: round1(self.balance_hours),
            status: self.status,
        }
    }
}

/// Persisted daily row, owned by the surrounding store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttendanceRecord {
    pub user_id: u64,
    pub date: NaiveDate,
    pub expected_hours: f64,
    pub actual_hours: f64,
    pub balance_hours: f64,
    #[serde(default)]
    pub notes: String,
}

/// Running totals over a period.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct PeriodTotals {
    pub total_actual: f64,
    pub total_expected: f64,
    pub total_balance: f64,
}
