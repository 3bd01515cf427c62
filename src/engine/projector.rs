use crate::error::EngineError;
use crate::model::attendance::{DailyHoursResult, DayStatus};
use crate::model::permission::PermissionOverride;
use crate::model::schedule::{DaySchedule, WorkSchedule};
use crate::utils::time::TimeOfDay;

/// Projects a daily schedule and a clock reading into expected / actual /
/// balance hours.
///
/// All arithmetic runs in integer minutes; hours appear only in the returned
/// result. A non-working schedule short-circuits to an all-zero completed
/// day.
pub fn project(
    schedule: &WorkSchedule,
    query_time: TimeOfDay,
    overrides: Option<&PermissionOverride>,
) -> Result<DailyHoursResult, EngineError> {
    let Some(day) = schedule.resolve()? else {
        return Ok(DailyHoursResult::rest_day());
    };
    Ok(project_day(&day, query_time, overrides))
}

fn project_day(
    day: &DaySchedule,
    query_time: TimeOfDay,
    overrides: Option<&PermissionOverride>,
) -> DailyHoursResult {
    let start = overrides
        .and_then(|o| o.entry_time)
        .unwrap_or(day.start)
        .minutes();
    let end = overrides
        .and_then(|o| o.exit_time)
        .unwrap_or(day.end)
        .minutes();
    let q = query_time.minutes();

    // An override can collapse the window entirely (entry after exit).
    if end <= start {
        let status = if q < start {
            DayStatus::NotStarted
        } else {
            DayStatus::Completed
        };
        return DailyHoursResult::from_minutes(0, 0, status);
    }

    // Break interval: explicit, or centered on the effective window. Clamp
    // it into the window so an override that moves the window past the break
    // simply drops the excluded portion.
    let (raw_break_start, raw_break_end) = match day.break_start {
        Some(bs) => (bs.minutes(), bs.minutes() + day.break_minutes),
        None => {
            let mid = (start + end) / 2;
            let bs = mid - day.break_minutes / 2;
            (bs, bs + day.break_minutes)
        }
    };
    let break_start = raw_break_start.clamp(start, end);
    let break_end = raw_break_end.clamp(start, end);
    let break_len = break_end - break_start;

    let expected = (end - start) - break_len;

    let (actual, status) = if q < start {
        (0, DayStatus::NotStarted)
    } else if q < break_start {
        (q - start, DayStatus::Working)
    } else if q < break_end {
        (break_start - start, DayStatus::OnBreak)
    } else if q < end {
        ((break_start - start) + (q - break_end), DayStatus::Working)
    } else {
        (expected, DayStatus::Completed)
    };

    DailyHoursResult::from_minutes(expected, actual, status)
}
