//! Wire records as the remote API returns them.
//!
//! Records are deliberately loose: every field is optional and strings are
//! taken verbatim. [`FoodRecord::normalize`] is the single place where
//! status casing, date spellings and numeric quirks are resolved.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::date::parse_date;
use crate::error::{CoreError, Result};
use crate::id::{lenient_id, ItemId};
use crate::item::{CachedExpiry, FoodItem, FreshnessState, ItemStatus, StorageLocation, Unit};

/// Category assigned to records that arrive without one.
pub const UNCATEGORIZED: &str = "Uncategorized";

/// A food item exactly as received.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FoodRecord {
    /// Server key, integer or string
    #[serde(default)]
    pub id: Option<ItemId>,

    /// Display name
    #[serde(default)]
    pub name: Option<String>,

    /// Category name
    #[serde(default)]
    pub category: Option<String>,

    /// Number or numeric string
    #[serde(default)]
    pub quantity: Option<Value>,

    /// Unit label (`kg`, `L`, `pieces`, ...)
    #[serde(default)]
    pub unit: Option<String>,

    /// Purchase date in any accepted spelling
    #[serde(default, alias = "purchaseDate")]
    pub purchase_date: Option<String>,

    /// Expiry date in any accepted spelling
    #[serde(default, alias = "expiryDate")]
    pub expiry_date: Option<String>,

    /// Storage location label
    #[serde(default, alias = "storageLocation")]
    pub storage_location: Option<String>,

    /// Status in any casing
    #[serde(default)]
    pub status: Option<String>,

    /// Why the item was wasted
    #[serde(
        default,
        alias = "reason_of_waste",
        alias = "wasted_reason",
        alias = "wasteReason"
    )]
    pub waste_reason: Option<String>,

    /// Server-computed freshness bucket
    #[serde(default, alias = "expiryState")]
    pub expiry_state: Option<String>,

    /// Server-computed days until expiry
    #[serde(default, alias = "daysLeft")]
    pub days_left: Option<i64>,

    /// Set when the raw element could not be read as a record at all
    #[serde(skip)]
    pub malformed: Option<String>,
}

impl FoodRecord {
    /// Read one element of an item array.
    ///
    /// Never fails: an element with a wrong-typed field comes back as a
    /// record carrying only its id (when readable) and the decode error,
    /// which [`FoodRecord::normalize`] then reports.
    pub fn from_value(value: Value) -> Self {
        let id = lenient_id(&value).map(ItemId::new);
        match serde_json::from_value(value) {
            Ok(record) => record,
            Err(e) => Self {
                id,
                malformed: Some(e.to_string()),
                ..Default::default()
            },
        }
    }

    /// Validate and convert into a [`FoodItem`].
    ///
    /// A missing status means `AVAILABLE`, the server's column default.
    /// A missing category becomes [`UNCATEGORIZED`]. The server's
    /// `expiry_state`/`days_left` are kept as a cache only.
    pub fn normalize(&self) -> Result<FoodItem> {
        if let Some(reason) = &self.malformed {
            return Err(CoreError::Malformed(reason.clone()));
        }
        let id = self.id.clone().ok_or(CoreError::MissingField("id"))?;
        let name = non_blank(self.name.as_deref()).ok_or(CoreError::MissingField("name"))?;

        let expiry_raw = non_blank(self.expiry_date.as_deref())
            .ok_or(CoreError::MissingField("expiry_date"))?;
        let expiry_date = parse_date(expiry_raw)?;

        let purchase_date = match non_blank(self.purchase_date.as_deref()) {
            Some(raw) => Some(parse_date(raw)?),
            None => None,
        };

        let status = match non_blank(self.status.as_deref()) {
            Some(raw) => raw.parse::<ItemStatus>()?,
            None => ItemStatus::Available,
        };

        let quantity = parse_quantity(self.quantity.as_ref())?;

        let waste_reason = if status == ItemStatus::Wasted {
            non_blank(self.waste_reason.as_deref()).map(str::to_string)
        } else {
            None
        };

        let cache_state = self.expiry_state.as_deref().and_then(FreshnessState::parse);
        let cached = if cache_state.is_some() || self.days_left.is_some() {
            Some(CachedExpiry {
                days_left: self.days_left,
                state: cache_state,
            })
        } else {
            None
        };

        Ok(FoodItem {
            id,
            name: name.to_string(),
            category: non_blank(self.category.as_deref())
                .unwrap_or(UNCATEGORIZED)
                .to_string(),
            quantity,
            unit: non_blank(self.unit.as_deref())
                .map(|u| Unit::from(u.to_string()))
                .unwrap_or(Unit::Pieces),
            purchase_date,
            expiry_date,
            storage_location: non_blank(self.storage_location.as_deref())
                .map(|s| StorageLocation::from(s.to_string())),
            status,
            waste_reason,
            cached,
        })
    }
}

fn non_blank(s: Option<&str>) -> Option<&str> {
    s.map(str::trim).filter(|s| !s.is_empty())
}

fn parse_quantity(value: Option<&Value>) -> Result<f64> {
    let quantity = match value {
        None | Some(Value::Null) => return Ok(0.0),
        Some(Value::Number(n)) => n.as_f64(),
        Some(Value::String(s)) => s.trim().parse::<f64>().ok(),
        Some(_) => None,
    };

    match quantity {
        Some(q) if q.is_finite() && q >= 0.0 => Ok(q),
        _ => Err(CoreError::InvalidQuantity(
            value.map(|v| v.to_string()).unwrap_or_default(),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use serde_json::json;

    fn record(value: Value) -> FoodRecord {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_normalize_api_shape() {
        let rec = record(json!({
            "id": 12,
            "user_id": 3,
            "name": "Milk",
            "category": "Dairy",
            "quantity": 2.5,
            "unit": "L",
            "purchase_date": "Mon, 13 Jan 2025 00:00:00 GMT",
            "expiry_date": "2025-01-20",
            "storage_location": "Fridge",
            "status": "Available",
            "expiry_state": "FRESH",
            "days_left": 6
        }));

        let item = rec.normalize().unwrap();
        assert_eq!(item.id, ItemId::from(12));
        assert_eq!(item.status, ItemStatus::Available);
        assert_eq!(item.unit, Unit::Litres);
        assert_eq!(item.quantity, 2.5);
        assert_eq!(item.expiry_date, NaiveDate::from_ymd_opt(2025, 1, 20).unwrap());
        assert_eq!(item.purchase_date, NaiveDate::from_ymd_opt(2025, 1, 13));
        assert_eq!(item.storage_location, Some(StorageLocation::Fridge));
        assert_eq!(
            item.cached,
            Some(CachedExpiry {
                days_left: Some(6),
                state: Some(FreshnessState::Fresh)
            })
        );
    }

    #[test]
    fn test_camel_case_aliases() {
        let rec = record(json!({
            "id": "a1",
            "name": "Bread",
            "expiryDate": "2025-02-01",
            "status": "WASTED",
            "wasted_reason": "Mould"
        }));
        let item = rec.normalize().unwrap();
        assert_eq!(item.status, ItemStatus::Wasted);
        assert_eq!(item.waste_reason.as_deref(), Some("Mould"));
        assert_eq!(item.category, UNCATEGORIZED);
    }

    #[test]
    fn test_missing_status_defaults_available() {
        let rec = record(json!({"id": 1, "name": "Rice", "expiry_date": "2025-06-01"}));
        assert_eq!(rec.normalize().unwrap().status, ItemStatus::Available);
    }

    #[test]
    fn test_reason_dropped_unless_wasted() {
        let rec = record(json!({
            "id": 1, "name": "Rice", "expiry_date": "2025-06-01",
            "status": "used", "reason_of_waste": "Spoiled"
        }));
        assert_eq!(rec.normalize().unwrap().waste_reason, None);
    }

    #[test]
    fn test_rejects_bad_records() {
        let bad_date = record(json!({"id": 1, "name": "Eggs", "expiry_date": "soon"}));
        assert_eq!(bad_date.normalize().unwrap_err(), CoreError::invalid_date("soon"));

        let no_date = record(json!({"id": 1, "name": "Eggs"}));
        assert_eq!(no_date.normalize().unwrap_err(), CoreError::MissingField("expiry_date"));

        let bad_status = record(json!({
            "id": 1, "name": "Eggs", "expiry_date": "2025-01-01", "status": "gone"
        }));
        assert!(matches!(bad_status.normalize(), Err(CoreError::UnknownStatus(_))));

        let negative = record(json!({
            "id": 1, "name": "Eggs", "expiry_date": "2025-01-01", "quantity": -2
        }));
        assert!(matches!(negative.normalize(), Err(CoreError::InvalidQuantity(_))));

        let no_id = record(json!({"name": "Eggs", "expiry_date": "2025-01-01"}));
        assert_eq!(no_id.normalize().unwrap_err(), CoreError::MissingField("id"));
    }

    #[test]
    fn test_wrong_typed_fields_become_malformed() {
        for value in [
            json!({"id": "", "name": "Eggs", "expiry_date": "2025-01-01"}),
            json!({"id": 4, "name": "Eggs", "expiry_date": "2025-01-01", "days_left": "3"}),
            json!({"id": 4, "name": 42, "expiry_date": "2025-01-01"}),
            json!({"id": 4, "name": "Eggs", "expiry_date": 20250101}),
            json!("not an object"),
        ] {
            let rec = FoodRecord::from_value(value);
            assert!(rec.malformed.is_some());
            assert!(matches!(rec.normalize(), Err(CoreError::Malformed(_))));
        }
    }

    #[test]
    fn test_malformed_record_keeps_readable_id() {
        let rec = FoodRecord::from_value(json!({"id": 4, "name": 42}));
        assert_eq!(rec.id, Some(ItemId::from(4)));

        let rec = FoodRecord::from_value(json!({"id": " ", "name": "Eggs"}));
        assert_eq!(rec.id, None);
    }

    #[test]
    fn test_from_value_reads_valid_record() {
        let rec = FoodRecord::from_value(json!({"id": 1, "name": "Rice", "expiry_date": "2025-06-01"}));
        assert_eq!(rec.malformed, None);
        assert_eq!(rec.normalize().unwrap().name, "Rice");
    }

    #[test]
    fn test_quantity_from_string() {
        let rec = record(json!({
            "id": 1, "name": "Eggs", "expiry_date": "2025-01-01", "quantity": " 12 "
        }));
        assert_eq!(rec.normalize().unwrap().quantity, 12.0);
    }
}
