//! Risk & due-date calculator.
//!
//! Scoring is additive and uncapped: expired warranty, overdue service,
//! and age against the expected lifespan each contribute independently.
//! Missing or malformed inputs skip their contribution instead of failing,
//! so an asset with bad data just scores lower-confidence, never errors.

use chrono::NaiveDate;

use crate::dates::{add_months, diff_in_days, parse_date};
use crate::records::{Asset, AssetComputedFields, RiskLevel};

/// Default service interval (months) by normalized category.
const DEFAULT_INTERVALS: &[(&str, u32)] = &[
    ("hvac", 6),
    ("water heater", 12),
    ("dishwasher", 12),
    ("refrigerator", 12),
    ("washer", 12),
    ("dryer", 12),
    ("garage door opener", 12),
    ("sump pump", 12),
];

/// Expected lifespan (years) by normalized category.
const CATEGORY_LIFE_YEARS: &[(&str, f64)] = &[
    ("hvac", 15.0),
    ("water heater", 10.0),
    ("dishwasher", 10.0),
    ("refrigerator", 12.0),
    ("washer", 11.0),
    ("dryer", 13.0),
    ("garage door opener", 12.0),
    ("sump pump", 7.0),
];

pub(crate) fn normalize_category(value: &str) -> String {
    value.trim().to_lowercase()
}

pub fn default_interval_months(category: &str) -> Option<u32> {
    let key = normalize_category(category);
    DEFAULT_INTERVALS
        .iter()
        .find(|(name, _)| *name == key)
        .map(|(_, months)| *months)
}

fn category_life_years(category: &str) -> Option<f64> {
    let key = normalize_category(category);
    CATEGORY_LIFE_YEARS
        .iter()
        .find(|(name, _)| *name == key)
        .map(|(_, years)| *years)
}

/// The asset's own cadence: explicit positive interval, else the category
/// default. Unknown categories have no interval.
pub fn native_interval_months(asset: &Asset) -> Option<u32> {
    match asset.service_interval_months {
        Some(months) if months > 0 => Some(months),
        _ => default_interval_months(&asset.category),
    }
}

/// Due date under a given interval: last service + interval, else
/// install + interval, else absent.
pub fn due_date_with_interval(asset: &Asset, interval_months: Option<u32>) -> Option<NaiveDate> {
    let months = interval_months?;
    if let Some(last) = parse_date(asset.last_service_date.as_deref()) {
        return Some(add_months(last, months));
    }
    parse_date(asset.install_date.as_deref()).map(|install| add_months(install, months))
}

/// Next service due date from the asset's native interval.
pub fn compute_next_service_due_date(asset: &Asset) -> Option<NaiveDate> {
    due_date_with_interval(asset, native_interval_months(asset))
}

/// Full risk computation against an explicit `today` (the engine never
/// reads the clock itself).
pub fn compute_asset_risk(asset: &Asset, today: NaiveDate) -> AssetComputedFields {
    let due_date = compute_next_service_due_date(asset);
    let warranty_end = parse_date(asset.warranty_end_date.as_deref());
    let install = parse_date(asset.install_date.as_deref());

    let mut score: u32 = 0;
    let mut overdue_days: Option<i64> = None;

    if let Some(end) = warranty_end {
        if end < today {
            score += 2;
        }
    }

    if let Some(due) = due_date {
        let days = diff_in_days(today, due);
        if days > 30 {
            score += 2;
            overdue_days = Some(days);
        } else if days > 0 {
            // Exactly 30 days overdue stays in this branch.
            score += 1;
            overdue_days = Some(days);
        }
    }

    if let Some(installed) = install {
        if let Some(life_years) = category_life_years(&asset.category) {
            let age_years = diff_in_days(today, installed) as f64 / 365.0;
            if age_years >= life_years {
                score += 2;
            } else if age_years >= life_years * 0.8 {
                score += 1;
            }
        }
    }

    let risk_level = if score >= 4 {
        RiskLevel::High
    } else if score >= 2 {
        RiskLevel::Medium
    } else {
        RiskLevel::Low
    };

    let is_due_soon = due_date
        .map(|due| {
            let until = diff_in_days(due, today);
            (0..=30).contains(&until)
        })
        .unwrap_or(false);

    AssetComputedFields {
        next_service_due_date: due_date,
        risk_score: score,
        risk_level,
        is_due_soon,
        overdue_days,
    }
}
