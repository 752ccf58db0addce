//! Idempotent reminder suppression.
//!
//! A candidate decision is dropped when an equivalent reminder was already
//! resolved (completed or dismissed) inside a trailing 30-day window.
//! Still-open reminders never suppress: an unresolved reminder must not
//! block a fresh decision from being recorded. Pending-vs-pending dedup
//! beyond the exact same-run check belongs to the storage layer.

use chrono::NaiveDate;

use crate::dates::{add_days, format_date, parse_date};
use crate::records::{Reminder, ReminderType};

/// Trailing window inside which a resolved reminder suppresses a new one
/// of the same type.
pub const SUPPRESSION_WINDOW_DAYS: i64 = 30;

/// Should a candidate reminder of `reminder_type` be suppressed, given the
/// reminders already on record?
///
/// Window check is `created_for_date >= run_date - 30 days`; rows with an
/// unparseable `created_for_date` are ignored.
pub fn should_skip_reminder(
    existing: &[Reminder],
    reminder_type: ReminderType,
    run_date: NaiveDate,
) -> bool {
    let window_start = add_days(run_date, -SUPPRESSION_WINDOW_DAYS);
    existing.iter().any(|reminder| {
        if reminder.reminder_type != reminder_type {
            return false;
        }
        let Some(created_for) = parse_date(Some(&reminder.created_for_date)) else {
            return false;
        };
        if created_for < window_start {
            return false;
        }
        reminder.status.is_resolved()
    })
}

/// Exact duplicate check for one run: a reminder of the same type already
/// exists for this asset with `created_for_date` equal to the run date.
pub fn has_reminder_for_run(
    existing: &[Reminder],
    asset_id: &str,
    reminder_type: ReminderType,
    run_date: NaiveDate,
) -> bool {
    let run = format_date(Some(run_date));
    existing.iter().any(|reminder| {
        reminder.asset_id.as_deref() == Some(asset_id)
            && reminder.reminder_type == reminder_type
            && Some(&reminder.created_for_date) == run.as_ref()
    })
}
