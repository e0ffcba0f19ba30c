//! Inventory aggregation.
//!
//! Reduces a freshly fetched item list into the counts behind the
//! dashboard, analytics, alerts and donation views.
//!
//! Malformed records are skipped and reported: each one yields an
//! [`InvalidItemError`] and a warning, and contributes to no bucket.

use chrono::NaiveDate;
use pantry_core::{CoreError, FoodItem, FoodRecord, FreshnessState, ItemStatus};
use pantry_expiry::{CacheCheck, ExpiryClassifier, ExpiryPolicy};
use serde::Serialize;
use std::collections::BTreeMap;
use tracing::{debug, warn};

use crate::alerts::Alert;
use crate::donation::DonationCandidate;

/// A record that failed validation and was left out of the aggregate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, thiserror::Error)]
#[error("skipped record #{index}: {error}")]
pub struct InvalidItemError {
    /// Position in the input sequence
    pub index: usize,
    /// Identifier, when the record had a usable one
    pub id: Option<String>,
    /// What was wrong
    #[serde(serialize_with = "serialize_display")]
    pub error: CoreError,
}

fn serialize_display<S: serde::Serializer>(error: &CoreError, s: S) -> Result<S::Ok, S::Error> {
    s.collect_str(error)
}

/// Valid items plus the records that were skipped.
#[derive(Debug, Clone, Default)]
pub struct Normalized {
    /// Items that passed validation, in input order
    pub items: Vec<FoodItem>,
    /// One entry per skipped record
    pub issues: Vec<InvalidItemError>,
}

/// Usage, donation and waste as fractions of all items.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct Rates {
    /// used / total
    pub usage_rate: f64,
    /// donated / total
    pub donation_rate: f64,
    /// wasted / total
    pub waste_rate: f64,
}

impl Rates {
    fn from_counts(used: usize, donated: usize, wasted: usize, total: usize) -> Self {
        Self {
            usage_rate: ratio(used, total),
            donation_rate: ratio(donated, total),
            waste_rate: ratio(wasted, total),
        }
    }
}

/// `part / total`, defined as 0 when `total` is 0.
pub fn ratio(part: usize, total: usize) -> f64 {
    if total > 0 {
        part as f64 / total as f64
    } else {
        0.0
    }
}

/// A fraction as a percentage rounded to one decimal place.
pub fn percent(rate: f64) -> f64 {
    (rate * 1000.0).round() / 10.0
}

/// Counts over an item list.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AggregateSummary {
    /// Number of valid items
    pub total: usize,

    /// Items per status, all four present
    pub by_status: BTreeMap<ItemStatus, usize>,

    /// Available items per freshness bucket, all three present
    pub by_expiry_state: BTreeMap<FreshnessState, usize>,

    /// Wasted items per category
    pub waste_by_category: BTreeMap<String, usize>,

    /// Wasted items per reason; items without a reason are left out
    pub waste_by_reason: BTreeMap<String, usize>,

    /// Derived rates
    pub rates: Rates,

    /// Items whose server-side classification disagreed with ours
    pub stale_cache: usize,
}

impl AggregateSummary {
    /// Count for one status.
    pub fn status(&self, status: ItemStatus) -> usize {
        self.by_status.get(&status).copied().unwrap_or(0)
    }

    /// Count of available items in one bucket.
    pub fn freshness(&self, state: FreshnessState) -> usize {
        self.by_expiry_state.get(&state).copied().unwrap_or(0)
    }
}

impl Default for AggregateSummary {
    fn default() -> Self {
        Self {
            total: 0,
            by_status: ItemStatus::ALL.iter().map(|s| (*s, 0)).collect(),
            by_expiry_state: FreshnessState::ALL.iter().map(|s| (*s, 0)).collect(),
            waste_by_category: BTreeMap::new(),
            waste_by_reason: BTreeMap::new(),
            rates: Rates::default(),
            stale_cache: 0,
        }
    }
}

/// Everything the views need from one fetched list.
#[derive(Debug, Clone, Serialize)]
pub struct AggregateReport {
    /// Counts and rates
    pub summary: AggregateSummary,
    /// Urgent items, most urgent first
    pub alerts: Vec<Alert>,
    /// Items that can still be donated, soonest first
    pub donation_candidates: Vec<DonationCandidate>,
    /// Records that were skipped
    pub issues: Vec<InvalidItemError>,
}

/// Aggregation over item lists.
#[derive(Debug, Clone, Default)]
pub struct InventoryAggregator {
    classifier: ExpiryClassifier,
}

impl InventoryAggregator {
    /// Create an aggregator with the given thresholds.
    pub fn new(policy: ExpiryPolicy) -> Self {
        Self {
            classifier: ExpiryClassifier::new(policy),
        }
    }

    /// The classifier used for expiry buckets.
    pub fn classifier(&self) -> &ExpiryClassifier {
        &self.classifier
    }

    /// Thresholds in use.
    pub fn policy(&self) -> &ExpiryPolicy {
        self.classifier.policy()
    }

    /// Validate raw records, skipping and reporting the bad ones.
    pub fn normalize(&self, records: &[FoodRecord]) -> Normalized {
        let mut normalized = Normalized::default();

        for (index, record) in records.iter().enumerate() {
            match record.normalize() {
                Ok(item) => normalized.items.push(item),
                Err(error) => {
                    let id = record.id.as_ref().map(|id| id.to_string());
                    warn!(index, id = ?id, %error, "Skipping malformed food record");
                    normalized.issues.push(InvalidItemError { index, id, error });
                }
            }
        }

        normalized
    }

    /// Count items by status, freshness, waste category and waste reason.
    pub fn summarize(&self, items: &[FoodItem], today: NaiveDate) -> AggregateSummary {
        let mut summary = AggregateSummary {
            total: items.len(),
            ..Default::default()
        };

        for item in items {
            *summary.by_status.entry(item.status).or_insert(0) += 1;

            match item.status {
                ItemStatus::Available => {
                    let reconciled = self.classifier.reconcile(item, today);
                    *summary
                        .by_expiry_state
                        .entry(reconciled.classification.state)
                        .or_insert(0) += 1;
                    if matches!(reconciled.cache, CacheCheck::Stale { .. }) {
                        summary.stale_cache += 1;
                    }
                }
                ItemStatus::Wasted => {
                    *summary
                        .waste_by_category
                        .entry(item.category.clone())
                        .or_insert(0) += 1;
                    if let Some(reason) = item
                        .waste_reason
                        .as_deref()
                        .map(str::trim)
                        .filter(|r| !r.is_empty())
                    {
                        *summary.waste_by_reason.entry(reason.to_string()).or_insert(0) += 1;
                    }
                }
                ItemStatus::Used | ItemStatus::Donated => {}
            }
        }

        summary.rates = Rates::from_counts(
            summary.status(ItemStatus::Used),
            summary.status(ItemStatus::Donated),
            summary.status(ItemStatus::Wasted),
            summary.total,
        );

        summary
    }

    /// Normalize a fetched list and derive every view from it.
    pub fn aggregate(&self, records: &[FoodRecord], today: NaiveDate) -> AggregateReport {
        let Normalized { items, issues } = self.normalize(records);

        let summary = self.summarize(&items, today);
        let alerts = self.alerts(&items, today);
        let donation_candidates = self.donation_candidates(&items, today);

        debug!(
            total = summary.total,
            skipped = issues.len(),
            alerts = alerts.len(),
            donation_candidates = donation_candidates.len(),
            "Aggregated inventory"
        );

        AggregateReport {
            summary,
            alerts,
            donation_candidates,
            issues,
        }
    }
}
