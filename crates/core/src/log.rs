//! Food log model - usage, donation and waste events.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::date::parse_date;
use crate::error::{CoreError, Result};
use crate::id::{lenient_id, ItemId, LogId};
use crate::item::ItemStatus;

/// Action recorded by a log entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LogAction {
    /// Part or all of the item was consumed
    Used,
    /// Part or all of the item was donated
    Donated,
    /// Part or all of the item was thrown out
    Wasted,
}

impl LogAction {
    /// All actions in display order.
    pub const ALL: [LogAction; 3] = [LogAction::Used, LogAction::Donated, LogAction::Wasted];

    /// Wire spelling.
    pub fn as_str(&self) -> &'static str {
        match self {
            LogAction::Used => "USED",
            LogAction::Donated => "DONATED",
            LogAction::Wasted => "WASTED",
        }
    }

    /// Status an item ends in once fully consumed by this action.
    pub fn final_status(&self) -> ItemStatus {
        match self {
            LogAction::Used => ItemStatus::Used,
            LogAction::Donated => ItemStatus::Donated,
            LogAction::Wasted => ItemStatus::Wasted,
        }
    }
}

impl fmt::Display for LogAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for LogAction {
    type Err = CoreError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "USED" => Ok(LogAction::Used),
            "DONATED" => Ok(LogAction::Donated),
            "WASTED" => Ok(LogAction::Wasted),
            _ => Err(CoreError::UnknownStatus(s.to_string())),
        }
    }
}

/// A validated log entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FoodLog {
    /// Log key
    pub id: LogId,
    /// Item the entry refers to
    pub food_id: ItemId,
    /// What happened
    pub action: LogAction,
    /// Amount affected, never negative
    pub quantity: f64,
    /// Day of the action
    pub action_date: NaiveDate,
    /// Free-text reason
    pub reason: Option<String>,
    /// Free-text remarks
    pub remarks: Option<String>,
}

/// A log entry exactly as received.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FoodLogRecord {
    /// Log key
    #[serde(default)]
    pub id: Option<LogId>,
    /// Item key
    #[serde(default, alias = "foodId")]
    pub food_id: Option<ItemId>,
    /// Action in any casing
    #[serde(default)]
    pub action: Option<String>,
    /// Amount affected
    #[serde(default)]
    pub quantity: Option<f64>,
    /// Day of the action in any accepted spelling
    #[serde(default, alias = "actionDate")]
    pub action_date: Option<String>,
    /// Free-text reason
    #[serde(default)]
    pub reason: Option<String>,
    /// Free-text remarks
    #[serde(default)]
    pub remarks: Option<String>,
    /// Set when the raw element could not be read as a log entry
    #[serde(skip)]
    pub malformed: Option<String>,
}

impl FoodLogRecord {
    /// Read one element of a log array; decode errors surface from `normalize`.
    pub fn from_value(value: serde_json::Value) -> Self {
        let id = lenient_id(&value).map(LogId::new);
        match serde_json::from_value(value) {
            Ok(record) => record,
            Err(e) => Self {
                id,
                malformed: Some(e.to_string()),
                ..Default::default()
            },
        }
    }

    /// Validate and convert into a [`FoodLog`].
    pub fn normalize(&self) -> Result<FoodLog> {
        if let Some(reason) = &self.malformed {
            return Err(CoreError::Malformed(reason.clone()));
        }
        let id = self.id.clone().ok_or(CoreError::MissingField("id"))?;
        let food_id = self.food_id.clone().ok_or(CoreError::MissingField("food_id"))?;
        let action = self
            .action
            .as_deref()
            .ok_or(CoreError::MissingField("action"))?
            .parse::<LogAction>()?;
        let quantity = match self.quantity {
            Some(q) if q.is_finite() && q >= 0.0 => q,
            Some(q) => return Err(CoreError::InvalidQuantity(q.to_string())),
            None => return Err(CoreError::MissingField("quantity")),
        };
        let action_date = parse_date(
            self.action_date
                .as_deref()
                .ok_or(CoreError::MissingField("action_date"))?,
        )?;

        Ok(FoodLog {
            id,
            food_id,
            action,
            quantity,
            action_date,
            reason: self.reason.clone(),
            remarks: self.remarks.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_normalize_log() {
        let rec: FoodLogRecord = serde_json::from_value(json!({
            "id": 5,
            "food_id": 12,
            "action": "wasted",
            "quantity": 1.5,
            "action_date": "Wed, 15 Jan 2025 00:00:00 GMT",
            "reason": "Spoiled",
            "remarks": null
        }))
        .unwrap();

        let log = rec.normalize().unwrap();
        assert_eq!(log.action, LogAction::Wasted);
        assert_eq!(log.food_id, ItemId::from(12));
        assert_eq!(log.action_date, NaiveDate::from_ymd_opt(2025, 1, 15).unwrap());
        assert_eq!(log.action.final_status(), ItemStatus::Wasted);
    }

    #[test]
    fn test_wrong_typed_log_is_malformed() {
        let rec = FoodLogRecord::from_value(json!({
            "id": 8, "food_id": 1, "action": "USED", "quantity": "lots",
            "action_date": "2025-01-15"
        }));
        assert_eq!(rec.id, Some(LogId::new("8")));
        assert!(matches!(rec.normalize(), Err(CoreError::Malformed(_))));
    }

    #[test]
    fn test_log_rejects_unknown_action() {
        let rec = FoodLogRecord {
            id: Some(LogId::new("1")),
            food_id: Some(ItemId::from(1)),
            action: Some("EATEN".to_string()),
            quantity: Some(1.0),
            action_date: Some("2025-01-15".to_string()),
            ..Default::default()
        };
        assert!(matches!(rec.normalize(), Err(CoreError::UnknownStatus(_))));
    }
}
