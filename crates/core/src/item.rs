//! Food item model - the unit the classifier and aggregator work on.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::CoreError;
use crate::id::ItemId;

/// A validated food item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FoodItem {
    /// Unique identifier
    pub id: ItemId,

    /// Display name
    pub name: String,

    /// Category (Dairy, Vegetables, ...)
    pub category: String,

    /// Amount on hand, never negative
    pub quantity: f64,

    /// Unit of `quantity`
    pub unit: Unit,

    /// Purchase date, if recorded
    pub purchase_date: Option<NaiveDate>,

    /// Expiry date
    pub expiry_date: NaiveDate,

    /// Where the item is kept
    pub storage_location: Option<StorageLocation>,

    /// Real-world disposition
    pub status: ItemStatus,

    /// Why the item was wasted
    pub waste_reason: Option<String>,

    /// Classification the server computed, if it sent one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cached: Option<CachedExpiry>,
}

impl FoodItem {
    /// Create an available item with the minimum required fields.
    pub fn new(
        id: impl Into<ItemId>,
        name: impl Into<String>,
        category: impl Into<String>,
        expiry_date: NaiveDate,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            category: category.into(),
            quantity: 1.0,
            unit: Unit::Pieces,
            purchase_date: None,
            expiry_date,
            storage_location: None,
            status: ItemStatus::Available,
            waste_reason: None,
            cached: None,
        }
    }

    /// Builder: set status.
    pub fn with_status(mut self, status: ItemStatus) -> Self {
        self.status = status;
        self
    }

    /// Builder: mark wasted with an optional reason.
    pub fn wasted(mut self, reason: Option<&str>) -> Self {
        self.status = ItemStatus::Wasted;
        self.waste_reason = reason.map(str::to_string);
        self
    }

    /// Builder: set quantity and unit.
    pub fn with_quantity(mut self, quantity: f64, unit: Unit) -> Self {
        self.quantity = quantity;
        self.unit = unit;
        self
    }

    /// Whether the item can still be used, donated or wasted.
    pub fn is_available(&self) -> bool {
        self.status == ItemStatus::Available
    }
}

/// Item status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ItemStatus {
    /// Still in stock
    Available,
    /// Consumed
    Used,
    /// Given away
    Donated,
    /// Thrown out
    Wasted,
}

impl ItemStatus {
    /// All statuses in display order.
    pub const ALL: [ItemStatus; 4] = [
        ItemStatus::Available,
        ItemStatus::Used,
        ItemStatus::Donated,
        ItemStatus::Wasted,
    ];

    /// Wire spelling.
    pub fn as_str(&self) -> &'static str {
        match self {
            ItemStatus::Available => "AVAILABLE",
            ItemStatus::Used => "USED",
            ItemStatus::Donated => "DONATED",
            ItemStatus::Wasted => "WASTED",
        }
    }

    /// Title-case spelling used in listings.
    pub fn title(&self) -> &'static str {
        match self {
            ItemStatus::Available => "Available",
            ItemStatus::Used => "Used",
            ItemStatus::Donated => "Donated",
            ItemStatus::Wasted => "Wasted",
        }
    }

    /// Terminal statuses admit no further transitions.
    pub fn is_terminal(&self) -> bool {
        !matches!(self, ItemStatus::Available)
    }
}

impl fmt::Display for ItemStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for ItemStatus {
    type Err = CoreError;

    /// Case-insensitive; `Available`, `AVAILABLE` and `available` are one status.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "AVAILABLE" => Ok(ItemStatus::Available),
            "USED" => Ok(ItemStatus::Used),
            "DONATED" => Ok(ItemStatus::Donated),
            "WASTED" => Ok(ItemStatus::Wasted),
            _ => Err(CoreError::UnknownStatus(s.to_string())),
        }
    }
}

/// Freshness bucket derived from days until expiry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FreshnessState {
    /// More than the near-expiry window away
    Fresh,
    /// Within the near-expiry window, including today
    NearExpiry,
    /// Past its expiry date
    Expired,
}

impl FreshnessState {
    /// All states in display order.
    pub const ALL: [FreshnessState; 3] = [
        FreshnessState::Fresh,
        FreshnessState::NearExpiry,
        FreshnessState::Expired,
    ];

    /// Wire spelling.
    pub fn as_str(&self) -> &'static str {
        match self {
            FreshnessState::Fresh => "FRESH",
            FreshnessState::NearExpiry => "NEAR_EXPIRY",
            FreshnessState::Expired => "EXPIRED",
        }
    }

    /// Lenient parse for server-supplied values; unknown spellings yield `None`.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_uppercase().replace(&['-', ' '][..], "_").as_str() {
            "FRESH" => Some(FreshnessState::Fresh),
            "NEAR_EXPIRY" => Some(FreshnessState::NearExpiry),
            "EXPIRED" => Some(FreshnessState::Expired),
            _ => None,
        }
    }
}

impl fmt::Display for FreshnessState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Expiry fields precomputed by the server. Never authoritative.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CachedExpiry {
    /// Server's days until expiry
    pub days_left: Option<i64>,
    /// Server's freshness bucket
    pub state: Option<FreshnessState>,
}

/// Quantity unit.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Unit {
    /// `kg`
    Kilograms,
    /// `g`
    Grams,
    /// `L`
    Litres,
    /// `ml`
    Millilitres,
    /// `pieces`
    Pieces,
    /// `packets`
    Packets,
    /// `bottles`
    Bottles,
    /// `boxes`
    Boxes,
    /// Any other label, kept verbatim
    Other(String),
}

impl Unit {
    /// Short label.
    pub fn as_str(&self) -> &str {
        match self {
            Unit::Kilograms => "kg",
            Unit::Grams => "g",
            Unit::Litres => "L",
            Unit::Millilitres => "ml",
            Unit::Pieces => "pieces",
            Unit::Packets => "packets",
            Unit::Bottles => "bottles",
            Unit::Boxes => "boxes",
            Unit::Other(s) => s,
        }
    }
}

impl From<String> for Unit {
    fn from(s: String) -> Self {
        match s.trim().to_ascii_lowercase().as_str() {
            "kg" => Unit::Kilograms,
            "g" => Unit::Grams,
            "l" => Unit::Litres,
            "ml" => Unit::Millilitres,
            "pieces" | "piece" | "pcs" => Unit::Pieces,
            "packets" | "packet" => Unit::Packets,
            "bottles" | "bottle" => Unit::Bottles,
            "boxes" | "box" => Unit::Boxes,
            _ => Unit::Other(s.trim().to_string()),
        }
    }
}

impl From<Unit> for String {
    fn from(unit: Unit) -> Self {
        unit.as_str().to_string()
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Storage location. Advisory only.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum StorageLocation {
    /// Refrigerator
    Fridge,
    /// Freezer
    Freezer,
    /// Pantry shelf
    Pantry,
    /// Kitchen counter
    Counter,
    /// Cupboard
    Cupboard,
    /// Any other place, kept verbatim
    Other(String),
}

impl StorageLocation {
    /// Display label.
    pub fn as_str(&self) -> &str {
        match self {
            StorageLocation::Fridge => "Fridge",
            StorageLocation::Freezer => "Freezer",
            StorageLocation::Pantry => "Pantry",
            StorageLocation::Counter => "Counter",
            StorageLocation::Cupboard => "Cupboard",
            StorageLocation::Other(s) => s,
        }
    }
}

impl From<String> for StorageLocation {
    fn from(s: String) -> Self {
        match s.trim().to_ascii_lowercase().as_str() {
            "fridge" | "refrigerator" => StorageLocation::Fridge,
            "freezer" => StorageLocation::Freezer,
            "pantry" => StorageLocation::Pantry,
            "counter" => StorageLocation::Counter,
            "cupboard" => StorageLocation::Cupboard,
            _ => StorageLocation::Other(s.trim().to_string()),
        }
    }
}

impl From<StorageLocation> for String {
    fn from(location: StorageLocation) -> Self {
        location.as_str().to_string()
    }
}

impl fmt::Display for StorageLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
