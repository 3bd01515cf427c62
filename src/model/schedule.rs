use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::error::EngineError;
use crate::utils::time::TimeOfDay;

/// One weekday's contracted shift, as stored by the scheduling subsystem.
///
/// Times come over the wire as loose strings ("HH:MM" or "HH:MM:SS");
/// [`WorkSchedule::resolve`] normalizes and validates them once, so the
/// projection code only ever sees [`DaySchedule`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkSchedule {
    pub start_time: String,
    pub end_time: String,
    /// Lunch break length in minutes.
    #[serde(default)]
    pub break_duration: i32,
    /// When absent, the break is centered at the midpoint of the shift.
    #[serde(default)]
    pub break_start_time: Option<String>,
    pub is_working_day: bool,
}

/// Validated schedule in minutes since midnight.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DaySchedule {
    pub start: TimeOfDay,
    pub end: TimeOfDay,
    pub break_minutes: i32,
    pub break_start: Option<TimeOfDay>,
}

impl WorkSchedule {
    /// Normalizes into a [`DaySchedule`], or `None` for a non-working day.
    ///
    /// Malformed schedules (end before start, break that cannot fit the
    /// shift) are rejected outright, never clamped.
    pub fn resolve(&self) -> Result<Option<DaySchedule>, EngineError> {
        if !self.is_working_day {
            return Ok(None);
        }

        let start = TimeOfDay::parse(&self.start_time)?;
        let end = TimeOfDay::parse(&self.end_time)?;
        if end <= start {
            return Err(EngineError::EndNotAfterStart { start, end });
        }

        if self.break_duration < 0 {
            return Err(EngineError::NegativeBreak(self.break_duration));
        }
        let shift_minutes = end - start;
        if self.break_duration > shift_minutes {
            return Err(EngineError::BreakTooLong {
                break_minutes: self.break_duration,
                shift_minutes,
            });
        }

        let break_start = TimeOfDay::parse_opt(self.break_start_time.as_deref())?;
        if let Some(bs) = break_start {
            let fits = bs >= start && bs.minutes() + self.break_duration <= end.minutes();
            if !fits {
                return Err(EngineError::BreakOutsideShift {
                    break_start: bs,
                    start,
                    end,
                });
            }
        }

        Ok(Some(DaySchedule {
            start,
            end,
            break_minutes: self.break_duration,
            break_start,
        }))
    }
}

/// One employee's schedule for the whole week, weekday 0 = Monday.
///
/// A missing weekday entry means the employee does not work that day; it is
/// not an error.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WeeklySchedule {
    pub days: [Option<WorkSchedule>; 7],
}

impl WeeklySchedule {
    pub fn for_date(&self, date: NaiveDate) -> Option<&WorkSchedule> {
        self.days[date.weekday().num_days_from_monday() as usize].as_ref()
    }

    pub fn set(&mut self, weekday: usize, schedule: WorkSchedule) {
        self.days[weekday] = Some(schedule);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn nine_to_six() -> WorkSchedule {
        WorkSchedule {
            start_time: "09:00".into(),
            end_time: "18:00".into(),
            break_duration: 60,
            break_start_time: Some("13:00".into()),
            is_working_day: true,
        }
    }

    #[test]
    fn resolves_valid_schedule() {
        let day = nine_to_six().resolve().unwrap().unwrap();
        assert_eq!(day.start, TimeOfDay::from_hm(9, 0));
        assert_eq!(day.end, TimeOfDay::from_hm(18, 0));
        assert_eq!(day.break_minutes, 60);
        assert_eq!(day.break_start, Some(TimeOfDay::from_hm(13, 0)));
    }

    #[test]
    fn non_working_day_resolves_to_none() {
        let mut s = nine_to_six();
        s.is_working_day = false;
        assert_eq!(s.resolve().unwrap(), None);
    }

    #[test]
    fn tolerates_seconds_in_times() {
        let mut s = nine_to_six();
        s.start_time = "09:00:00".into();
        s.end_time = "18:00:30".into();
        assert!(s.resolve().unwrap().is_some());
    }

    #[test]
    fn rejects_end_before_start() {
        let mut s = nine_to_six();
        s.end_time = "08:00".into();
        assert!(matches!(
            s.resolve(),
            Err(EngineError::EndNotAfterStart { .. })
        ));
    }

    #[test]
    fn rejects_break_longer_than_shift() {
        let mut s = nine_to_six();
        s.break_duration = 600;
        s.break_start_time = None;
        assert!(matches!(s.resolve(), Err(EngineError::BreakTooLong { .. })));
    }

    #[test]
    fn rejects_break_running_past_shift_end() {
        let mut s = nine_to_six();
        s.break_start_time = Some("17:30".into());
        assert!(matches!(
            s.resolve(),
            Err(EngineError::BreakOutsideShift { .. })
        ));
    }

    #[test]
    fn weekly_lookup_uses_monday_based_weekdays() {
        let mut week = WeeklySchedule::default();
        week.set(0, nine_to_six());

        // 2025-06-02 is a Monday.
        let monday = NaiveDate::from_ymd_opt(2025, 6, 2).unwrap();
        let tuesday = NaiveDate::from_ymd_opt(2025, 6, 3).unwrap();
        assert!(week.for_date(monday).is_some());
        assert!(week.for_date(tuesday).is_none());
    }
}
