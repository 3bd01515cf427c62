use chrono::NaiveDate;

use crate::error::EngineError;
use crate::model::permission::{Permission, PermissionOverride, TYPE_EARLY_EXIT, TYPE_LATE_ENTRY};
use crate::utils::time::TimeOfDay;

/// Picks at most one effective partial-day override for `date` from the
/// approved permissions.
///
/// The `early_exit` request contributes the exit time, the `late_entry`
/// request the entry time; when both exist they merge into one override.
/// Full-day permissions (104 or no times at all) are deliberately ignored:
/// they are a day-classification concern, not a window shift.
pub fn resolve_override(
    permissions: &[Permission],
    date: NaiveDate,
) -> Result<Option<PermissionOverride>, EngineError> {
    let mut resolved = PermissionOverride::default();

    for p in permissions {
        if !p.is_approved() || !p.covers(date) || p.is_full_day() {
            continue;
        }
        match p.permission_type.as_deref() {
            Some(TYPE_EARLY_EXIT) => {
                if let Some(t) = TimeOfDay::parse_opt(p.exit_time.as_deref())? {
                    resolved.exit_time = Some(t);
                }
            }
            Some(TYPE_LATE_ENTRY) => {
                if let Some(t) = TimeOfDay::parse_opt(p.entry_time.as_deref())? {
                    resolved.entry_time = Some(t);
                }
            }
            _ => {}
        }
    }

    if resolved.entry_time.is_none() && resolved.exit_time.is_none() {
        Ok(None)
    } else {
        Ok(Some(resolved))
    }
}

/// Whether an approved 104 protected-leave permission covers `date`.
pub fn has_protected_leave(permissions: &[Permission], date: NaiveDate) -> bool {
    permissions
        .iter()
        .any(|p| p.is_approved() && p.covers(date) && p.is_protected_104())
}

/// Whether any approved permission covers `date`. Used by reconciliation to
/// tell a recorded absence from a missing clock entry.
pub fn has_any_permission(permissions: &[Permission], date: NaiveDate) -> bool {
    permissions.iter().any(|p| p.is_approved() && p.covers(date))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::permission::{STATUS_APPROVED, TYPE_PERMISSION_104};

    fn date(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, d).unwrap()
    }

    fn permission(
        ptype: &str,
        entry: Option<&str>,
        exit: Option<&str>,
        status: &str,
    ) -> Permission {
        Permission {
            employee_id: 7,
            start_date: date(10),
            end_date: date(12),
            permission_type: Some(ptype.into()),
            entry_time: entry.map(Into::into),
            exit_time: exit.map(Into::into),
            status: status.into(),
        }
    }

    #[test]
    fn no_permissions_resolves_to_none() {
        assert_eq!(resolve_override(&[], date(10)).unwrap(), None);
    }

    #[test]
    fn early_exit_contributes_exit_time() {
        let perms = [permission(TYPE_EARLY_EXIT, None, Some("16:00"), STATUS_APPROVED)];
        let ovr = resolve_override(&perms, date(11)).unwrap().unwrap();
        assert_eq!(ovr.exit_time, Some(TimeOfDay::from_hm(16, 0)));
        assert_eq!(ovr.entry_time, None);
    }

    #[test]
    fn both_kinds_merge_into_one_override() {
        let perms = [
            permission(TYPE_EARLY_EXIT, None, Some("16:00"), STATUS_APPROVED),
            permission(TYPE_LATE_ENTRY, Some("10:30"), None, STATUS_APPROVED),
        ];
        let ovr = resolve_override(&perms, date(10)).unwrap().unwrap();
        assert_eq!(ovr.entry_time, Some(TimeOfDay::from_hm(10, 30)));
        assert_eq!(ovr.exit_time, Some(TimeOfDay::from_hm(16, 0)));
    }

    #[test]
    fn unapproved_and_out_of_range_requests_are_ignored() {
        let pending = permission(TYPE_EARLY_EXIT, None, Some("16:00"), "pending");
        assert_eq!(resolve_override(&[pending], date(11)).unwrap(), None);

        let approved = permission(TYPE_EARLY_EXIT, None, Some("16:00"), STATUS_APPROVED);
        assert_eq!(resolve_override(&[approved], date(20)).unwrap(), None);
    }

    #[test]
    fn full_day_104_is_not_an_override() {
        let perms = [permission(TYPE_PERMISSION_104, None, None, STATUS_APPROVED)];
        assert_eq!(resolve_override(&perms, date(10)).unwrap(), None);
        assert!(has_protected_leave(&perms, date(10)));
        assert!(!has_protected_leave(&perms, date(20)));
    }

    #[test]
    fn blank_time_fields_count_as_absent() {
        let perms = [permission(TYPE_EARLY_EXIT, None, Some(""), STATUS_APPROVED)];
        assert_eq!(resolve_override(&perms, date(10)).unwrap(), None);
    }

    #[test]
    fn unparseable_time_is_a_configuration_error() {
        let perms = [permission(TYPE_EARLY_EXIT, None, Some("4pm"), STATUS_APPROVED)];
        assert!(resolve_override(&perms, date(10)).is_err());
    }
}
