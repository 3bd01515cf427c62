//! Work-hours projection and bank-of-hours reconciliation engine.
//!
//! Pure with respect to its inputs: schedules, permissions and clock
//! readings come in already resolved, hour triples come out. All I/O stays
//! with the caller, except the write seam reconciliation pushes corrected
//! rows through.

pub mod config;
pub mod engine;
pub mod error;
pub mod model;
pub mod utils;

pub use engine::aggregator::aggregate;
pub use engine::permission::{has_any_permission, has_protected_leave, resolve_override};
pub use engine::projector::project;
pub use engine::reconcile::{
    AttendanceStore, ReconcileOutcome, ReconcileSummary, RecordChange, reconcile,
};
pub use error::EngineError;
pub use model::attendance::{AttendanceRecord, DailyHoursResult, DayStatus, PeriodTotals};
pub use model::permission::{Permission, PermissionOverride};
pub use model::schedule::{DaySchedule, WeeklySchedule, WorkSchedule};
pub use utils::time::TimeOfDay;
