//! Record types handed over by the external store, plus the computed
//! fields the engine derives from them.
//!
//! Note: we keep these small + serializable. Storage (Postgres, files,
//! whatever) is the caller's layer; the engine only reads snapshots.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A piece of household equipment tracked for maintenance.
///
/// Date fields stay as raw strings: the store does not guarantee they are
/// well-formed, and the engine's policy is to degrade gracefully rather
/// than reject a row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Asset {
    pub id: String,
    pub home_id: String,

    /// Free text, matched case-insensitively against the category tables.
    pub category: String,

    /// Explicit service cadence; `None` or zero falls back to the
    /// per-category default.
    pub service_interval_months: Option<u32>,

    pub install_date: Option<String>,
    pub last_service_date: Option<String>,
    pub warranty_end_date: Option<String>,
}

impl Asset {
    pub fn new(
        id: impl Into<String>,
        home_id: impl Into<String>,
        category: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            home_id: home_id.into(),
            category: category.into(),
            service_interval_months: None,
            install_date: None,
            last_service_date: None,
            warranty_end_date: None,
        }
    }

    pub fn with_interval(mut self, months: u32) -> Self {
        self.service_interval_months = Some(months);
        self
    }

    pub fn with_install_date(mut self, date: impl Into<String>) -> Self {
        self.install_date = Some(date.into());
        self
    }

    pub fn with_last_service_date(mut self, date: impl Into<String>) -> Self {
        self.last_service_date = Some(date.into());
        self
    }

    pub fn with_warranty_end_date(mut self, date: impl Into<String>) -> Self {
        self.warranty_end_date = Some(date.into());
        self
    }
}

/// Granularity at which a maintenance-cadence override applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RuleScope {
    Home,
    Category,
    Asset,
}

/// A per-home override of service interval, lead time, or overdue grace.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MaintenanceRule {
    pub id: String,
    pub home_id: String,
    pub scope: RuleScope,

    /// Set for `Category`-scoped rules.
    pub category: Option<String>,
    /// Set for `Asset`-scoped rules.
    pub asset_id: Option<String>,

    pub interval_months: Option<u32>,
    pub lead_days: Option<i64>,
    pub overdue_grace_days: Option<i64>,

    pub enabled: bool,
}

impl MaintenanceRule {
    pub fn new(id: impl Into<String>, home_id: impl Into<String>, scope: RuleScope) -> Self {
        Self {
            id: id.into(),
            home_id: home_id.into(),
            scope,
            category: None,
            asset_id: None,
            interval_months: None,
            lead_days: None,
            overdue_grace_days: None,
            enabled: true,
        }
    }

    pub fn for_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn for_asset(mut self, asset_id: impl Into<String>) -> Self {
        self.asset_id = Some(asset_id.into());
        self
    }

    pub fn with_interval(mut self, months: u32) -> Self {
        self.interval_months = Some(months);
        self
    }

    pub fn with_lead_days(mut self, days: i64) -> Self {
        self.lead_days = Some(days);
        self
    }

    pub fn with_grace_days(mut self, days: i64) -> Self {
        self.overdue_grace_days = Some(days);
        self
    }

    pub fn disabled(mut self) -> Self {
        self.enabled = false;
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReminderType {
    DueSoon,
    Overdue,
    HighRisk,
}

impl ReminderType {
    /// Notification template the caller renders this reminder with.
    pub fn template_key(&self) -> &'static str {
        match self {
            ReminderType::DueSoon => "maintenance_due_soon",
            ReminderType::Overdue => "maintenance_overdue",
            ReminderType::HighRisk => "maintenance_high_risk",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReminderStatus {
    Open,
    Pending,
    Snoozed,
    Completed,
    Dismissed,
}

impl ReminderStatus {
    /// A resolved reminder was acted on (or explicitly waved off) by the
    /// homeowner; only these suppress a fresh decision of the same type.
    pub fn is_resolved(&self) -> bool {
        matches!(self, ReminderStatus::Completed | ReminderStatus::Dismissed)
    }
}

/// A previously issued reminder row, read back for deduplication.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reminder {
    pub id: String,
    pub home_id: String,
    pub asset_id: Option<String>,
    pub reminder_type: ReminderType,
    pub due_date: Option<String>,
    /// The run date this reminder was computed against.
    pub created_for_date: String,
    pub status: ReminderStatus,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

/// Fields derived per asset on every evaluation. Transient: recomputed
/// from the snapshot each call, never written back by the engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssetComputedFields {
    pub next_service_due_date: Option<NaiveDate>,
    pub risk_score: u32,
    pub risk_level: RiskLevel,
    pub is_due_soon: bool,
    /// Only present when strictly positive.
    pub overdue_days: Option<i64>,
}
