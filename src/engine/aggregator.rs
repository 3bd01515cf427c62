use chrono::NaiveDate;

use crate::model::attendance::{AttendanceRecord, DailyHoursResult, PeriodTotals};

/// Sums a period's stored rows into running totals.
///
/// Today's stored row is stale while the day is in progress, so a supplied
/// live projection always replaces it. Without a live result the stored row
/// counts as-is.
pub fn aggregate(
    records: &[AttendanceRecord],
    live: Option<&DailyHoursResult>,
    today: NaiveDate,
) -> PeriodTotals {
    let mut totals = PeriodTotals::default();

    for record in records {
        if record.date == today && live.is_some() {
            continue;
        }
        totals.total_actual += record.actual_hours;
        totals.total_expected += record.expected_hours;
    }

    if let Some(live) = live {
        totals.total_actual += live.actual_hours;
        totals.total_expected += live.expected_hours;
    }

    totals.total_balance = totals.total_actual - totals.total_expected;
    totals
}
