//! Layered rule resolution: asset scope beats category scope beats home
//! scope beats the asset's own interval beats the built-in defaults.
//!
//! Resolution is a sequential find-first over enabled rules, not a
//! dispatch hierarchy. A zero value on a rule counts as unset and falls
//! through to the next layer.

use chrono::NaiveDate;

use crate::records::{Asset, MaintenanceRule, RuleScope};
use crate::risk::{default_interval_months, due_date_with_interval, normalize_category};

/// Lead time when no rule says otherwise.
pub const DEFAULT_LEAD_DAYS: i64 = 30;
/// Days past due tolerated before a reminder escalates to overdue.
pub const DEFAULT_GRACE_DAYS: i64 = 7;

fn rules_in_scope<'a>(
    asset: &'a Asset,
    rules: &'a [MaintenanceRule],
    scope: RuleScope,
) -> impl Iterator<Item = &'a MaintenanceRule> + 'a {
    let category = normalize_category(&asset.category);
    rules.iter().filter(move |rule| {
        rule.enabled
            && rule.scope == scope
            && match scope {
                RuleScope::Asset => rule.asset_id.as_deref() == Some(asset.id.as_str()),
                RuleScope::Category => rule
                    .category
                    .as_deref()
                    .map(|c| normalize_category(c) == category)
                    .unwrap_or(false),
                RuleScope::Home => true,
            }
    })
}

/// Walk the precedence chain and take the first rule where `field` yields
/// a value. The field accessors treat zero as unset.
fn resolve_field<T: Copy>(
    asset: &Asset,
    rules: &[MaintenanceRule],
    field: impl Fn(&MaintenanceRule) -> Option<T>,
) -> Option<T> {
    for scope in [RuleScope::Asset, RuleScope::Category, RuleScope::Home] {
        let hit = rules_in_scope(asset, rules, scope).find_map(&field);
        if hit.is_some() {
            return hit;
        }
    }
    None
}

/// Effective service interval for this asset, or `None` when nothing in
/// the chain (rules, intrinsic interval, category default) defines one.
pub fn resolve_interval_months(asset: &Asset, rules: &[MaintenanceRule]) -> Option<u32> {
    if let Some(months) = resolve_field(asset, rules, |r| r.interval_months.filter(|m| *m > 0)) {
        return Some(months);
    }
    if let Some(months) = asset.service_interval_months.filter(|m| *m > 0) {
        return Some(months);
    }
    default_interval_months(&asset.category)
}

/// Effective lead days. Always resolves; the built-in fallback is 30.
pub fn resolve_lead_days(asset: &Asset, rules: &[MaintenanceRule]) -> i64 {
    resolve_field(asset, rules, |r| r.lead_days.filter(|d| *d != 0)).unwrap_or(DEFAULT_LEAD_DAYS)
}

/// Effective overdue grace days. Always resolves; the built-in fallback is 7.
pub fn resolve_overdue_grace_days(asset: &Asset, rules: &[MaintenanceRule]) -> i64 {
    resolve_field(asset, rules, |r| r.overdue_grace_days.filter(|d| *d != 0))
        .unwrap_or(DEFAULT_GRACE_DAYS)
}

/// Due date under the rule-resolved interval. Same arithmetic as the
/// native computation, only the interval input differs.
pub fn compute_next_service_due_date_with_rules(
    asset: &Asset,
    rules: &[MaintenanceRule],
) -> Option<NaiveDate> {
    due_date_with_interval(asset, resolve_interval_months(asset, rules))
}
