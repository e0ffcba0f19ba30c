//! Pantry core data models.
//!
//! This crate defines the food item, status and log types shared by the
//! classifier, the aggregator and the calling layer, plus the boundary
//! where loosely typed API records become validated items.

#![warn(missing_docs)]

// Identities
mod id;

// Items and wire records
mod item;
mod record;
mod log;

// Boundary helpers
mod date;
mod error;

// Re-exports
pub use id::{ItemId, LogId};

pub use item::{CachedExpiry, FoodItem, FreshnessState, ItemStatus, StorageLocation, Unit};
pub use record::{FoodRecord, UNCATEGORIZED};
pub use log::{FoodLog, FoodLogRecord, LogAction};

pub use date::parse_date;
pub use error::{CoreError, Result};

/// Calendar date type used throughout the workspace.
pub type Date = chrono::NaiveDate;
