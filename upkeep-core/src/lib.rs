//! upkeep-core: the home asset maintenance engine.
//!
//! Pure, synchronous computation over snapshots handed in by the caller:
//! due-date derivation, additive risk scoring, layered rule resolution,
//! reminder decisions, and idempotent suppression. No I/O, no clock reads;
//! "today" is always a parameter, so every function is deterministic and
//! trivially safe to run across many assets in parallel.

pub mod dates;
pub mod decisions;
pub mod dedupe;
pub mod records;
pub mod risk;
pub mod rules;
pub mod summary;

pub use dates::{add_days, add_months, diff_in_days, format_date, parse_date};
pub use decisions::{ReminderDecision, evaluate_reminder_decisions};
pub use dedupe::{SUPPRESSION_WINDOW_DAYS, has_reminder_for_run, should_skip_reminder};
pub use records::{
    Asset, AssetComputedFields, MaintenanceRule, Reminder, ReminderStatus, ReminderType,
    RiskLevel, RuleScope,
};
pub use risk::{
    compute_asset_risk, compute_next_service_due_date, default_interval_months,
    native_interval_months,
};
pub use rules::{
    DEFAULT_GRACE_DAYS, DEFAULT_LEAD_DAYS, compute_next_service_due_date_with_rules,
    resolve_interval_months, resolve_lead_days, resolve_overdue_grace_days,
};
pub use summary::{HomeSummary, summarize_assets};
