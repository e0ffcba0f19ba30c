//! Food-log analytics over a reporting period.

use chrono::{Duration, NaiveDate};
use pantry_core::{FoodLog, FoodLogRecord, LogAction};
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;
use tracing::warn;

use crate::aggregator::InvalidItemError;

/// Reporting window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AnalyticsPeriod {
    /// Today only
    Today,
    /// The last seven days
    Last7Days,
    /// The last thirty days
    Last30Days,
    /// Everything
    Overall,
}

impl AnalyticsPeriod {
    /// Parse `today`, `7days`, `30days` or `overall`; anything else is `Overall`.
    pub fn parse_lenient(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "today" => AnalyticsPeriod::Today,
            "7days" => AnalyticsPeriod::Last7Days,
            "30days" => AnalyticsPeriod::Last30Days,
            _ => AnalyticsPeriod::Overall,
        }
    }

    /// Query spelling.
    pub fn as_str(&self) -> &'static str {
        match self {
            AnalyticsPeriod::Today => "today",
            AnalyticsPeriod::Last7Days => "7days",
            AnalyticsPeriod::Last30Days => "30days",
            AnalyticsPeriod::Overall => "overall",
        }
    }

    /// First day included, or `None` for no lower bound.
    pub fn start_date(&self, today: NaiveDate) -> Option<NaiveDate> {
        match self {
            AnalyticsPeriod::Today => Some(today),
            AnalyticsPeriod::Last7Days => Some(today - Duration::days(7)),
            AnalyticsPeriod::Last30Days => Some(today - Duration::days(30)),
            AnalyticsPeriod::Overall => None,
        }
    }
}

impl fmt::Display for AnalyticsPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Per-action totals.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct ActionTotals {
    /// Number of log entries
    pub count: usize,
    /// Sum of logged quantities
    pub total_quantity: f64,
}

/// Log totals for a period.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LogSummary {
    /// Requested period
    pub period: AnalyticsPeriod,
    /// First day included
    pub start_date: Option<NaiveDate>,
    /// Totals per action, all three present
    pub by_action: BTreeMap<LogAction, ActionTotals>,
    /// Entries counted
    pub total_logged_items: usize,
    /// Quantity across all actions
    pub total_quantity_processed: f64,
}

/// Validate raw log records, skipping and reporting the bad ones.
pub fn normalize_logs(records: &[FoodLogRecord]) -> (Vec<FoodLog>, Vec<InvalidItemError>) {
    let mut logs = Vec::with_capacity(records.len());
    let mut issues = Vec::new();

    for (index, record) in records.iter().enumerate() {
        match record.normalize() {
            Ok(log) => logs.push(log),
            Err(error) => {
                let id = record.id.as_ref().map(|id| id.to_string());
                warn!(index, id = ?id, %error, "Skipping malformed food log");
                issues.push(InvalidItemError { index, id, error });
            }
        }
    }

    (logs, issues)
}

/// Sum logs dated on or after the period's start.
pub fn log_summary(logs: &[FoodLog], period: AnalyticsPeriod, today: NaiveDate) -> LogSummary {
    let start_date = period.start_date(today);
    let mut by_action: BTreeMap<LogAction, ActionTotals> = LogAction::ALL
        .iter()
        .map(|a| (*a, ActionTotals::default()))
        .collect();

    for log in logs {
        if start_date.map_or(false, |start| log.action_date < start) {
            continue;
        }
        let totals = by_action.entry(log.action).or_default();
        totals.count += 1;
        totals.total_quantity += log.quantity;
    }

    LogSummary {
        period,
        start_date,
        total_logged_items: by_action.values().map(|t| t.count).sum(),
        total_quantity_processed: by_action.values().map(|t| t.total_quantity).sum(),
        by_action,
    }
}
