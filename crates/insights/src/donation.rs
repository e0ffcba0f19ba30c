//! Donation eligibility.
//!
//! Unlike alerts, expired items are never eligible: a donation has to
//! reach the recipient before the expiry date.

use chrono::NaiveDate;
use pantry_core::FoodItem;
use pantry_expiry::ExpiryClassification;
use serde::Serialize;

use crate::aggregator::InventoryAggregator;

/// An available item that can still be donated.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DonationCandidate {
    /// The item
    pub item: FoodItem,
    /// Its classification
    pub classification: ExpiryClassification,
}

impl InventoryAggregator {
    /// Available items with `0 < days_left <= donation_window_days`, soonest first.
    ///
    /// With `donate_same_day` set, items expiring today are included too.
    pub fn donation_candidates(&self, items: &[FoodItem], today: NaiveDate) -> Vec<DonationCandidate> {
        let policy = self.policy();
        let earliest = if policy.donate_same_day { 0 } else { 1 };

        let mut candidates: Vec<DonationCandidate> = items
            .iter()
            .filter(|item| item.is_available())
            .filter_map(|item| {
                let classification = self.classifier().classify_item(item, today);
                (earliest..=policy.donation_window_days)
                    .contains(&classification.days_left)
                    .then(|| DonationCandidate {
                        item: item.clone(),
                        classification,
                    })
            })
            .collect();

        candidates.sort_by_key(|c| c.classification.days_left);
        candidates
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use pantry_core::{ItemId, ItemStatus};
    use pantry_expiry::ExpiryPolicy;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 1, 14).unwrap()
    }

    fn available(id: u64, days: i64) -> FoodItem {
        FoodItem::new(ItemId::from(id), format!("item-{}", id), "Bakery", today() + Duration::days(days))
    }

    fn days_of(candidates: &[DonationCandidate]) -> Vec<i64> {
        candidates.iter().map(|c| c.classification.days_left).collect()
    }

    #[test]
    fn test_window_boundaries() {
        let agg = InventoryAggregator::default();
        let items: Vec<FoodItem> = [-1, 0, 1, 3, 4, 7, 8]
            .iter()
            .enumerate()
            .map(|(i, d)| available(i as u64, *d))
            .collect();
        assert_eq!(days_of(&agg.donation_candidates(&items, today())), vec![1, 3, 4, 7]);
    }

    #[test]
    fn test_same_day_opt_in() {
        let agg = InventoryAggregator::new(ExpiryPolicy {
            donate_same_day: true,
            ..Default::default()
        });
        let items = vec![available(1, 0), available(2, -1)];
        assert_eq!(days_of(&agg.donation_candidates(&items, today())), vec![0]);
    }

    #[test]
    fn test_only_available_items() {
        let agg = InventoryAggregator::default();
        let items = vec![
            available(1, 2).with_status(ItemStatus::Donated),
            available(2, 2).with_status(ItemStatus::Used),
            available(3, 5),
        ];
        let candidates = agg.donation_candidates(&items, today());
        assert_eq!(candidates.len(), 1);
        assert_eq!(candidates[0].item.id, ItemId::from(3));
    }
}
