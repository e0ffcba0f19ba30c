//! Expiry alert selection.

use chrono::NaiveDate;
use pantry_core::{FoodItem, FreshnessState};
use pantry_expiry::ExpiryClassification;
use serde::Serialize;

use crate::aggregator::InventoryAggregator;

/// An available item that is near or past expiry.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Alert {
    /// The item
    pub item: FoodItem,
    /// Its classification
    pub classification: ExpiryClassification,
}

/// Alert tallies.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct AlertCounts {
    /// Alerts past expiry
    pub expired: usize,
    /// Alerts still within the near-expiry window
    pub near_expiry: usize,
    /// All alerts
    pub total: usize,
}

impl AlertCounts {
    /// Tally a list of alerts.
    pub fn from_alerts(alerts: &[Alert]) -> Self {
        let expired = alerts
            .iter()
            .filter(|a| a.classification.state == FreshnessState::Expired)
            .count();
        Self {
            expired,
            near_expiry: alerts.len() - expired,
            total: alerts.len(),
        }
    }
}

impl InventoryAggregator {
    /// Available items with `days_left <= near_expiry_days`, most urgent first.
    ///
    /// Sorting is stable, so items with equal `days_left` keep input order.
    pub fn alerts(&self, items: &[FoodItem], today: NaiveDate) -> Vec<Alert> {
        let threshold = self.policy().near_expiry_days;

        let mut alerts: Vec<Alert> = items
            .iter()
            .filter(|item| item.is_available())
            .filter_map(|item| {
                let classification = self.classifier().classify_item(item, today);
                (classification.days_left <= threshold).then(|| Alert {
                    item: item.clone(),
                    classification,
                })
            })
            .collect();

        alerts.sort_by_key(|a| a.classification.days_left);
        alerts
    }
}
