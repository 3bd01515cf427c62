use chrono::NaiveDate;
use serde::Serialize;

use crate::engine::permission::{has_any_permission, has_protected_leave};
use crate::engine::projector::project;
use crate::error::EngineError;
use crate::model::attendance::AttendanceRecord;
use crate::model::permission::Permission;
use crate::model::schedule::WeeklySchedule;
use crate::utils::time::round1;

/// Hour deltas at or below this are noise, not corrections.
const WRITE_TOLERANCE: f64 = 0.01;

/// Stored actuals exceeding expected by a value in this band betray the old
/// break-inclusion bug (the lunch break was counted as worked time).
const BREAK_BUG_MIN_EXCESS: f64 = 0.9;
const BREAK_BUG_MAX_EXCESS: f64 = 1.5;

/// Appended to a row's notes on every correction, so history is auditable
/// rather than silently rewritten.
pub const RECONCILE_MARKER: &str = "[reconciled]";

/// A row whose notes mention an absence is never backfilled.
const ABSENCE_MARKER: &str = "absent";

/// Write side of the persistence collaborator. The engine never talks to the
/// store directly; reconciliation pushes corrected rows through this seam.
pub trait AttendanceStore {
    fn write_back(&mut self, record: &AttendanceRecord) -> anyhow::Result<()>;
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ReconcileSummary {
    pub fixed: usize,
    pub skipped: usize,
    pub errored: usize,
}

/// Old/new hour triples for one corrected row.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RecordChange {
    pub user_id: u64,
    pub date: NaiveDate,
    pub old_expected: f64,
    pub old_actual: f64,
    pub old_balance: f64,
    pub new_expected: f64,
    pub new_actual: f64,
    pub new_balance: f64,
}

#[derive(Debug, Default)]
pub struct ReconcileOutcome {
    pub summary: ReconcileSummary,
    pub changes: Vec<RecordChange>,
}

/// Rewrites misclassified historical rows for one employee.
///
/// Idempotent: a second run over corrected rows finds nothing above the
/// write tolerance. Per-record failures (malformed schedule, store write
/// errors) are logged and counted, never abort the batch. Rows dated today
/// or later are left alone; the live projection owns the current day.
pub fn reconcile<S: AttendanceStore>(
    records: &mut [AttendanceRecord],
    schedule: &WeeklySchedule,
    permissions: &[Permission],
    today: NaiveDate,
    store: &mut S,
) -> ReconcileOutcome {
    let mut outcome = ReconcileOutcome::default();

    for record in records.iter_mut() {
        if record.date >= today {
            outcome.summary.skipped += 1;
            continue;
        }

        let (expected, actual) = match target_hours(record, schedule, permissions) {
            Ok(target) => target,
            Err(e) => {
                tracing::error!(
                    error = %e,
                    user_id = record.user_id,
                    date = %record.date,
                    "Reconciliation failed for record"
                );
                outcome.summary.errored += 1;
                continue;
            }
        };
        let balance = round1(actual - expected);

        let unchanged = (record.expected_hours - expected).abs() <= WRITE_TOLERANCE
            && (record.actual_hours - actual).abs() <= WRITE_TOLERANCE
            && (record.balance_hours - balance).abs() <= WRITE_TOLERANCE;
        if unchanged {
            outcome.summary.skipped += 1;
            continue;
        }

        let mut corrected = record.clone();
        corrected.expected_hours = expected;
        corrected.actual_hours = actual;
        corrected.balance_hours = balance;
        if corrected.notes.is_empty() {
            corrected.notes = RECONCILE_MARKER.to_string();
        } else {
            corrected.notes = format!("{} {}", corrected.notes, RECONCILE_MARKER);
        }

        if let Err(e) = store.write_back(&corrected) {
            tracing::error!(
                error = %e,
                user_id = record.user_id,
                date = %record.date,
                "Write-back failed, leaving stored row untouched"
            );
            outcome.summary.errored += 1;
            continue;
        }

        outcome.changes.push(RecordChange {
            user_id: record.user_id,
            date: record.date,
            old_expected: record.expected_hours,
            old_actual: record.actual_hours,
            old_balance: record.balance_hours,
            new_expected: expected,
            new_actual: actual,
            new_balance: balance,
        });
        *record = corrected;
        outcome.summary.fixed += 1;
    }

    outcome
}

/// Computes the (expected, actual) a past row should hold, rounded to one
/// decimal.
fn target_hours(
    record: &AttendanceRecord,
    schedule: &WeeklySchedule,
    permissions: &[Permission],
) -> Result<(f64, f64), EngineError> {
    // No schedule for the weekday means a non-working day, not an error.
    let Some(working) = schedule.for_date(record.date) else {
        return Ok((0.0, 0.0));
    };
    let Some(day) = working.resolve()? else {
        return Ok((0.0, 0.0));
    };

    let full = project(working, day.end, None)?;
    let expected = round1(full.expected_hours);

    let mut actual = record.actual_hours;

    if actual > expected + BREAK_BUG_MIN_EXCESS && actual <= expected + BREAK_BUG_MAX_EXCESS {
        actual = (actual - day.break_minutes as f64 / 60.0).max(0.0);
    }

    let absence_on_record = has_any_permission(permissions, record.date)
        || record.notes.to_lowercase().contains(ABSENCE_MARKER);
    if record.actual_hours.abs() <= WRITE_TOLERANCE && expected > 0.0 && !absence_on_record {
        // Conservative backfill: assume a full day when nothing was clocked
        // and no absence is on record. Flagged for product-owner review.
        actual = expected;
    }

    if has_protected_leave(permissions, record.date) {
        // 104 protected leave must never move the bank-of-hours balance.
        actual = expected;
    }

    Ok((expected, round1(actual)))
}
