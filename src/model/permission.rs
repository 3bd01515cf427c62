use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::utils::time::TimeOfDay;

pub const STATUS_APPROVED: &str = "approved";

pub const TYPE_EARLY_EXIT: &str = "early_exit";
pub const TYPE_LATE_ENTRY: &str = "late_entry";
/// Legally protected caregiver leave. Days covered by it must never move the
/// bank-of-hours balance.
pub const TYPE_PERMISSION_104: &str = "permission_104";

/// An approved leave request of type "permission", as handed over by the
/// leave subsystem.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Permission {
    pub employee_id: u64,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    #[serde(default)]
    pub permission_type: Option<String>,
    #[serde(default)]
    pub entry_time: Option<String>,
    #[serde(default)]
    pub exit_time: Option<String>,
    pub status: String,
}

impl Permission {
    pub fn is_approved(&self) -> bool {
        self.status == STATUS_APPROVED
    }

    pub fn covers(&self, date: NaiveDate) -> bool {
        self.start_date <= date && date <= self.end_date
    }

    pub fn is_protected_104(&self) -> bool {
        self.permission_type.as_deref() == Some(TYPE_PERMISSION_104)
    }

    /// A full-day permission carries no entry/exit time (or is 104-typed).
    /// Those are handled by day classification, not by the override path.
    pub fn is_full_day(&self) -> bool {
        let blank = |t: &Option<String>| t.as_deref().map_or(true, |s| s.trim().is_empty());
        self.is_protected_104() || (blank(&self.entry_time) && blank(&self.exit_time))
    }
}

/// At most one effective override per employee per date: a shifted start,
/// a shifted end, or both after a merge.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PermissionOverride {
    pub entry_time: Option<TimeOfDay>,
    pub exit_time: Option<TimeOfDay>,
}
