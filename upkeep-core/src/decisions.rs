//! Reminder decision engine.
//!
//! Deterministically projects one asset snapshot + rule set + run date
//! into zero or more reminder decisions. Stateless: persistence and
//! delivery of accepted decisions are the caller's job.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value, json};

use crate::dates::{add_days, diff_in_days};
use crate::records::{Asset, MaintenanceRule, ReminderType, RiskLevel};
use crate::risk::compute_asset_risk;
use crate::rules::{
    compute_next_service_due_date_with_rules, resolve_interval_months, resolve_lead_days,
    resolve_overdue_grace_days,
};

/// One candidate reminder, with the inputs it was computed from captured
/// in `meta` for audit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReminderDecision {
    pub reminder_type: ReminderType,
    pub due_date: Option<NaiveDate>,
    pub meta: Map<String, Value>,
}

/// Evaluate which reminders should fire for `asset` as of `run_date`.
///
/// The three checks run independently against the same resolved due date;
/// none of them excludes another. Risk deliberately ignores rule overrides
/// and scores against the asset's native cadence: rules tune reminder
/// timing, not the risk narrative.
pub fn evaluate_reminder_decisions(
    asset: &Asset,
    rules: &[MaintenanceRule],
    run_date: NaiveDate,
) -> Vec<ReminderDecision> {
    let interval_months = resolve_interval_months(asset, rules);
    let lead_days = resolve_lead_days(asset, rules);
    let grace_days = resolve_overdue_grace_days(asset, rules);
    let due_date = compute_next_service_due_date_with_rules(asset, rules);

    let mut decisions = Vec::new();

    if let Some(due) = due_date {
        let days_until_due = diff_in_days(due, run_date);
        if days_until_due >= 0 && days_until_due <= lead_days {
            let mut meta = Map::new();
            meta.insert("interval_months".into(), json!(interval_months));
            meta.insert("lead_days".into(), json!(lead_days));
            decisions.push(ReminderDecision {
                reminder_type: ReminderType::DueSoon,
                due_date,
                meta,
            });
        }

        let overdue_threshold = add_days(due, grace_days);
        if run_date > overdue_threshold {
            let mut meta = Map::new();
            meta.insert("interval_months".into(), json!(interval_months));
            meta.insert("overdue_grace_days".into(), json!(grace_days));
            decisions.push(ReminderDecision {
                reminder_type: ReminderType::Overdue,
                due_date,
                meta,
            });
        }
    }

    let risk = compute_asset_risk(asset, run_date);
    if risk.risk_level == RiskLevel::High {
        let mut meta = Map::new();
        meta.insert("risk_score".into(), json!(risk.risk_score));
        meta.insert("risk_level".into(), json!(risk.risk_level));
        decisions.push(ReminderDecision {
            reminder_type: ReminderType::HighRisk,
            due_date,
            meta,
        });
    }

    decisions
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::records::{MaintenanceRule, RuleScope};

    fn d(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn types(decisions: &[ReminderDecision]) -> Vec<ReminderType> {
        decisions.iter().map(|d| d.reminder_type).collect()
    }

    #[test]
    fn due_soon_inside_lead_window() {
        // Due 2024-06-15, run 2024-06-01: 14 days out, default lead 30.
        let asset = Asset::new("a1", "h1", "hvac")
            .with_interval(6)
            .with_last_service_date("2023-12-15");
        let decisions = evaluate_reminder_decisions(&asset, &[], d("2024-06-01"));
        assert_eq!(types(&decisions), vec![ReminderType::DueSoon]);
        assert_eq!(decisions[0].due_date, Some(d("2024-06-15")));
        assert_eq!(decisions[0].meta["lead_days"], json!(30));
        assert_eq!(decisions[0].meta["interval_months"], json!(6));
    }

    #[test]
    fn nothing_fires_outside_lead_window() {
        // Due 2024-07-15: 44 days out.
        let asset = Asset::new("a1", "h1", "hvac")
            .with_interval(6)
            .with_last_service_date("2024-01-15");
        let decisions = evaluate_reminder_decisions(&asset, &[], d("2024-06-01"));
        assert!(decisions.is_empty());
    }

    #[test]
    fn overdue_only_after_grace() {
        // Due 2024-05-25, grace 7: threshold 2024-06-01.
        let asset = Asset::new("a1", "h1", "hvac")
            .with_interval(6)
            .with_last_service_date("2023-11-25");

        // Run exactly on the threshold: not yet overdue.
        let at_threshold = evaluate_reminder_decisions(&asset, &[], d("2024-06-01"));
        assert!(!types(&at_threshold).contains(&ReminderType::Overdue));

        // One day past: overdue fires.
        let past = evaluate_reminder_decisions(&asset, &[], d("2024-06-02"));
        assert_eq!(types(&past), vec![ReminderType::Overdue]);
        assert_eq!(past[0].meta["overdue_grace_days"], json!(7));
    }

    #[test]
    fn rule_lead_days_widen_the_window() {
        // Due 2024-07-15: 44 days out, beyond the default 30 but inside a
        // category rule's 60-day lead.
        let asset = Asset::new("a1", "h1", "hvac")
            .with_interval(6)
            .with_last_service_date("2024-01-15");
        let rules = vec![
            MaintenanceRule::new("r1", "h1", RuleScope::Category)
                .for_category("hvac")
                .with_lead_days(60),
        ];
        let decisions = evaluate_reminder_decisions(&asset, &rules, d("2024-06-01"));
        assert_eq!(types(&decisions), vec![ReminderType::DueSoon]);
        assert_eq!(decisions[0].meta["lead_days"], json!(60));
    }

    #[test]
    fn high_risk_can_fire_alone() {
        // Recently serviced (due 2024-11-01, well outside every window)
        // but aged out with an expired warranty: only high_risk fires.
        let asset = Asset::new("a1", "h1", "HVAC")
            .with_install_date("2005-01-01")
            .with_warranty_end_date("2010-01-01")
            .with_last_service_date("2024-05-01");
        let decisions = evaluate_reminder_decisions(&asset, &[], d("2024-06-01"));
        assert_eq!(types(&decisions), vec![ReminderType::HighRisk]);
        let high = &decisions[0];
        assert_eq!(high.meta["risk_level"], json!("high"));
        assert!(high.meta["risk_score"].as_u64().unwrap() >= 4);
        assert_eq!(high.due_date, Some(d("2024-11-01")));
    }

    #[test]
    fn overdue_and_high_risk_can_fire_together() {
        let asset = Asset::new("a1", "h1", "HVAC")
            .with_interval(12)
            .with_install_date("2012-05-01")
            .with_last_service_date("2023-01-01")
            .with_warranty_end_date("2023-12-31");
        let decisions = evaluate_reminder_decisions(&asset, &[], d("2024-06-01"));
        let kinds = types(&decisions);
        assert!(kinds.contains(&ReminderType::Overdue));
        assert!(kinds.contains(&ReminderType::HighRisk));
        assert!(!kinds.contains(&ReminderType::DueSoon));
        // Every decision carries the resolved due date, high_risk included.
        for decision in &decisions {
            assert_eq!(decision.due_date, Some(d("2024-01-01")));
        }
    }

    #[test]
    fn risk_ignores_rule_interval_overrides() {
        // Native cadence 12mo -> due 2025-01-01, not overdue, low risk.
        // An asset rule shortens the cadence to 1mo -> due 2024-02-01,
        // deep past the grace window: overdue fires, high_risk must not.
        let asset = Asset::new("a1", "h1", "trampoline")
            .with_interval(12)
            .with_last_service_date("2024-01-01");
        let rules = vec![
            MaintenanceRule::new("r1", "h1", RuleScope::Asset)
                .for_asset("a1")
                .with_interval(1),
        ];
        let decisions = evaluate_reminder_decisions(&asset, &rules, d("2024-06-01"));
        assert_eq!(types(&decisions), vec![ReminderType::Overdue]);
        assert_eq!(decisions[0].due_date, Some(d("2024-02-01")));
    }

    #[test]
    fn no_due_date_no_risk_no_decisions() {
        let asset = Asset::new("a1", "h1", "trampoline");
        assert!(evaluate_reminder_decisions(&asset, &[], d("2024-06-01")).is_empty());
    }

    #[test]
    fn deterministic_for_fixed_inputs() {
        let asset = Asset::new("a1", "h1", "HVAC")
            .with_interval(12)
            .with_install_date("2012-05-01")
            .with_last_service_date("2023-01-01")
            .with_warranty_end_date("2023-12-31");
        let first = evaluate_reminder_decisions(&asset, &[], d("2024-06-01"));
        let second = evaluate_reminder_decisions(&asset, &[], d("2024-06-01"));
        assert_eq!(first, second);
    }
}
