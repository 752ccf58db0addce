use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::{NaiveDate, Utc};
use clap::{Parser, Subcommand};
use serde::{Deserialize, Serialize};
use upkeep_core::{
    Asset, MaintenanceRule, Reminder, ReminderDecision, compute_asset_risk,
    evaluate_reminder_decisions, format_date, has_reminder_for_run, should_skip_reminder,
    summarize_assets,
};

#[derive(Parser, Debug)]
#[command(name = "upkeep", version, about = "Home asset maintenance engine runner")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Evaluate reminder decisions for every asset in a snapshot
    Evaluate {
        /// JSON snapshot with assets, rules, and reminder history
        #[arg(long)]
        snapshot: PathBuf,

        /// Run date as YYYY-MM-DD (default: today, UTC)
        #[arg(long)]
        date: Option<String>,
    },

    /// Print computed risk fields per asset plus a per-home rollup
    Risk {
        /// JSON snapshot with assets, rules, and reminder history
        #[arg(long)]
        snapshot: PathBuf,

        /// Run date as YYYY-MM-DD (default: today, UTC)
        #[arg(long)]
        date: Option<String>,
    },
}

/// One consistent read of the store, as handed to the engine.
#[derive(Debug, Default, Deserialize)]
struct Snapshot {
    #[serde(default)]
    assets: Vec<Asset>,
    #[serde(default)]
    rules: Vec<MaintenanceRule>,
    #[serde(default)]
    reminders: Vec<Reminder>,
}

/// An accepted decision, shaped for the caller that will persist it.
#[derive(Debug, Serialize)]
struct DecisionRow<'a> {
    home_id: &'a str,
    asset_id: &'a str,
    reminder_type: upkeep_core::ReminderType,
    template_key: &'a str,
    due_date: Option<String>,
    created_for_date: String,
    meta: &'a serde_json::Map<String, serde_json::Value>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Command::Evaluate { snapshot, date } => {
            let run_date = parse_run_date(date.as_deref())?;
            let snapshot = load_snapshot(&snapshot)?;
            evaluate(&snapshot, run_date)?;
        }

        Command::Risk { snapshot, date } => {
            let run_date = parse_run_date(date.as_deref())?;
            let snapshot = load_snapshot(&snapshot)?;
            report_risk(&snapshot, run_date)?;
        }
    }

    Ok(())
}

/// Read the run date once per invocation; everything downstream gets the
/// same instant.
fn parse_run_date(flag: Option<&str>) -> Result<NaiveDate> {
    match flag {
        Some(value) => NaiveDate::parse_from_str(value, "%Y-%m-%d")
            .with_context(|| format!("invalid --date '{value}', expected YYYY-MM-DD")),
        None => Ok(Utc::now().date_naive()),
    }
}

fn load_snapshot(path: &Path) -> Result<Snapshot> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("reading snapshot {}", path.display()))?;
    serde_json::from_str(&raw).with_context(|| format!("parsing snapshot {}", path.display()))
}

fn evaluate(snapshot: &Snapshot, run_date: NaiveDate) -> Result<()> {
    let run_date_string = format_date(Some(run_date)).unwrap_or_default();
    println!("Generating reminder decisions for {run_date_string}");

    let mut emitted = 0usize;
    let mut suppressed = 0usize;

    let mut rules_by_home: BTreeMap<&str, Vec<MaintenanceRule>> = BTreeMap::new();
    for rule in &snapshot.rules {
        rules_by_home.entry(rule.home_id.as_str()).or_default().push(rule.clone());
    }
    let mut reminders_by_home: BTreeMap<&str, Vec<Reminder>> = BTreeMap::new();
    for reminder in &snapshot.reminders {
        reminders_by_home
            .entry(reminder.home_id.as_str())
            .or_default()
            .push(reminder.clone());
    }
    let empty_rules: Vec<MaintenanceRule> = Vec::new();
    let empty_reminders: Vec<Reminder> = Vec::new();

    for asset in &snapshot.assets {
        let rules = rules_by_home
            .get(asset.home_id.as_str())
            .unwrap_or(&empty_rules);
        let history = reminders_by_home
            .get(asset.home_id.as_str())
            .unwrap_or(&empty_reminders);

        for decision in evaluate_reminder_decisions(asset, rules, run_date) {
            if has_reminder_for_run(history, &asset.id, decision.reminder_type, run_date)
                || should_skip_reminder(history, decision.reminder_type, run_date)
            {
                suppressed += 1;
                continue;
            }
            print_decision(asset, &decision, &run_date_string)?;
            emitted += 1;
        }
    }

    println!(
        "Evaluated {} assets: {} decisions emitted, {} suppressed",
        snapshot.assets.len(),
        emitted,
        suppressed
    );
    Ok(())
}

fn print_decision(asset: &Asset, decision: &ReminderDecision, run_date_string: &str) -> Result<()> {
    let row = DecisionRow {
        home_id: &asset.home_id,
        asset_id: &asset.id,
        reminder_type: decision.reminder_type,
        template_key: decision.reminder_type.template_key(),
        due_date: format_date(decision.due_date),
        created_for_date: run_date_string.to_string(),
        meta: &decision.meta,
    };
    println!("{}", serde_json::to_string(&row)?);
    Ok(())
}

fn report_risk(snapshot: &Snapshot, run_date: NaiveDate) -> Result<()> {
    let mut by_home: BTreeMap<&str, Vec<Asset>> = BTreeMap::new();
    for asset in &snapshot.assets {
        let computed = compute_asset_risk(asset, run_date);
        let row = serde_json::json!({
            "home_id": asset.home_id,
            "asset_id": asset.id,
            "category": asset.category,
            "computed": computed,
        });
        println!("{row}");
        by_home.entry(asset.home_id.as_str()).or_default().push(asset.clone());
    }

    for (home_id, assets) in &by_home {
        let summary = summarize_assets(assets, run_date);
        println!(
            "home {home_id}: {} assets, {} due soon, {} overdue, {} under warranty, {} high risk",
            summary.total,
            summary.due_soon,
            summary.overdue,
            summary.under_warranty,
            summary.high_risk
        );
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn run_date_flag_parses() {
        assert_eq!(
            parse_run_date(Some("2024-06-01")).unwrap(),
            NaiveDate::from_ymd_opt(2024, 6, 1).unwrap()
        );
        assert!(parse_run_date(Some("06/01/2024")).is_err());
    }

    #[test]
    fn snapshot_fields_default_when_missing() {
        let snapshot: Snapshot = serde_json::from_str(r#"{"assets": []}"#).unwrap();
        assert!(snapshot.assets.is_empty());
        assert!(snapshot.rules.is_empty());
        assert!(snapshot.reminders.is_empty());
    }

    #[test]
    fn snapshot_round_trip_from_store_shapes() {
        let raw = r#"{
            "assets": [{
                "id": "a1",
                "home_id": "h1",
                "category": "HVAC",
                "service_interval_months": 6,
                "install_date": "2020-01-01",
                "last_service_date": "2024-01-15",
                "warranty_end_date": null
            }],
            "rules": [{
                "id": "r1",
                "home_id": "h1",
                "scope": "category",
                "category": "hvac",
                "asset_id": null,
                "interval_months": 3,
                "lead_days": null,
                "overdue_grace_days": null,
                "enabled": true
            }],
            "reminders": [{
                "id": "rm1",
                "home_id": "h1",
                "asset_id": "a1",
                "reminder_type": "due_soon",
                "due_date": "2024-04-15",
                "created_for_date": "2024-04-01",
                "status": "completed"
            }]
        }"#;
        let snapshot: Snapshot = serde_json::from_str(raw).unwrap();
        assert_eq!(snapshot.assets.len(), 1);
        assert_eq!(snapshot.rules.len(), 1);
        assert_eq!(snapshot.reminders.len(), 1);
    }
}
