//! Inventory search and status filter.

use pantry_core::{FoodItem, ItemStatus};
use std::collections::BTreeMap;

/// Filter criteria for the inventory listing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InventoryFilter {
    /// Only items with this status
    pub status: Option<ItemStatus>,
    /// Case-insensitive substring of name or category
    pub search: Option<String>,
}

impl InventoryFilter {
    /// Whether `item` passes both criteria.
    pub fn matches(&self, item: &FoodItem) -> bool {
        if let Some(status) = self.status {
            if item.status != status {
                return false;
            }
        }

        match self.search.as_deref().map(str::trim) {
            Some(needle) if !needle.is_empty() => {
                let needle = needle.to_lowercase();
                item.name.to_lowercase().contains(&needle)
                    || item.category.to_lowercase().contains(&needle)
            }
            _ => true,
        }
    }

    /// Matching items in input order.
    pub fn apply<'a>(&self, items: &'a [FoodItem]) -> Vec<&'a FoodItem> {
        items.iter().filter(|item| self.matches(item)).collect()
    }
}

/// Items per status, all four present.
pub fn status_counts(items: &[FoodItem]) -> BTreeMap<ItemStatus, usize> {
    let mut counts: BTreeMap<ItemStatus, usize> =
        ItemStatus::ALL.iter().map(|s| (*s, 0)).collect();
    for item in items {
        *counts.entry(item.status).or_insert(0) += 1;
    }
    counts
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn items() -> Vec<FoodItem> {
        let expiry = NaiveDate::from_ymd_opt(2025, 2, 1).unwrap();
        vec![
            FoodItem::new("1", "Whole Milk", "Dairy", expiry),
            FoodItem::new("2", "Cheddar", "Dairy", expiry).with_status(ItemStatus::Used),
            FoodItem::new("3", "Spinach", "Vegetables", expiry),
        ]
    }

    #[test]
    fn test_search_name_or_category() {
        let items = items();
        let filter = InventoryFilter {
            search: Some("DAIRY".to_string()),
            ..Default::default()
        };
        assert_eq!(filter.apply(&items).len(), 2);

        let filter = InventoryFilter {
            search: Some("milk".to_string()),
            ..Default::default()
        };
        assert_eq!(filter.apply(&items)[0].name, "Whole Milk");
    }

    #[test]
    fn test_status_and_search_combined() {
        let items = items();
        let filter = InventoryFilter {
            status: Some(ItemStatus::Available),
            search: Some("dairy".to_string()),
        };
        let found = filter.apply(&items);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].name, "Whole Milk");
    }

    #[test]
    fn test_blank_search_matches_all() {
        let items = items();
        let filter = InventoryFilter {
            search: Some("  ".to_string()),
            ..Default::default()
        };
        assert_eq!(filter.apply(&items).len(), 3);
    }

    #[test]
    fn test_status_counts() {
        let counts = status_counts(&items());
        assert_eq!(counts[&ItemStatus::Available], 2);
        assert_eq!(counts[&ItemStatus::Used], 1);
        assert_eq!(counts[&ItemStatus::Wasted], 0);
    }
}
