//! Inventory source trait abstraction.

use async_trait::async_trait;
use pantry_core::{FoodLogRecord, FoodRecord};

use crate::update::StatusUpdate;

/// Error type for source operations.
pub type Result<T> = std::result::Result<T, SourceError>;

/// Errors that can occur while fetching or submitting inventory data.
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The item already left AVAILABLE
    #[error("item {id} is already {status} and cannot change status")]
    NotAvailable {
        /// Item identifier
        id: String,
        /// Its terminal status
        status: String,
    },

    /// The requested status is not a valid action target
    #[error("invalid target status: {0}")]
    InvalidTarget(String),

    /// Item not found
    #[error("Not found: {0}")]
    NotFound(String),
}

/// Where item lists come from and where status changes go.
///
/// The remote API is the production implementation; file and memory
/// sources stand in for it locally and in tests.
#[async_trait]
pub trait InventorySource: Send + Sync {
    /// Fetch the current item list.
    async fn fetch_items(&self) -> Result<Vec<FoodRecord>>;

    /// Fetch the food log.
    async fn fetch_logs(&self) -> Result<Vec<FoodLogRecord>>;

    /// Send a status change for one item.
    async fn submit(&self, update: &StatusUpdate) -> Result<()>;
}
