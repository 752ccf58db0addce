//! Per-home rollup of computed asset fields.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::dates::parse_date;
use crate::records::{Asset, RiskLevel};
use crate::risk::compute_asset_risk;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HomeSummary {
    pub total: usize,
    pub due_soon: usize,
    pub overdue: usize,
    pub under_warranty: usize,
    pub high_risk: usize,
}

/// Count due-soon / overdue / warranty / high-risk assets across a home's
/// snapshot. `under_warranty` means a warranty end date strictly after
/// `today`.
pub fn summarize_assets(assets: &[Asset], today: NaiveDate) -> HomeSummary {
    let mut summary = HomeSummary::default();
    for asset in assets {
        let computed = compute_asset_risk(asset, today);
        summary.total += 1;
        if computed.is_due_soon {
            summary.due_soon += 1;
        }
        if computed.overdue_days.is_some() {
            summary.overdue += 1;
        }
        if let Some(end) = parse_date(asset.warranty_end_date.as_deref()) {
            if end > today {
                summary.under_warranty += 1;
            }
        }
        if computed.risk_level == RiskLevel::High {
            summary.high_risk += 1;
        }
    }
    summary
}
